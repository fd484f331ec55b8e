// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Config files are JSON. Reading is lenient by default ([`load_config_from_file`]),
//! and [`load_config_from_file_strict`] refuses anything [`validate_config`] flags.

use std::path::Path;

use miette::{Context, IntoDiagnostic};

use crate::{CommonResult, ConfigLoadError, HintJumpConfig, LoadedConfig, validate_config};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigErrorCouldNot {
    #[error("Could not read config file: '{path}'")]
    ReadFile { path: String },

    #[error("Could not parse config file as JSON: '{path}'")]
    ParseJson { path: String },
}

/// Reads JSON text leniently. Only a JSON syntax error fails.
///
/// # Errors
///
/// Returns an error if `text` is not JSON.
pub fn load_config_from_str(text: &str) -> CommonResult<LoadedConfig> {
    let value: serde_json::Value = serde_json::from_str(text).into_diagnostic()?;
    Ok(HintJumpConfig::from_json_value_lenient(&value))
}

/// Reads a config file leniently. Every defaulted field is logged as a warning.
///
/// # Errors
///
/// Returns an error if the file can't be read or is not JSON.
#[tracing::instrument]
pub fn load_config_from_file(path: &Path) -> CommonResult<LoadedConfig> {
    let value = read_json(path)?;
    let loaded = HintJumpConfig::from_json_value_lenient(&value);

    for warning in &loaded.warnings {
        // % is Display, ? is Debug.
        tracing::warn!(message = "Config", path = %path.display(), warning = %warning);
    }

    Ok(loaded)
}

/// Reads a config file and rejects it if it has any problem.
///
/// # Errors
///
/// Returns an error if the file can't be read, is not JSON, or fails
/// [`validate_config`]. The last case is a [`ConfigLoadError::Invalid`] listing every
/// problem.
#[tracing::instrument]
pub fn load_config_from_file_strict(path: &Path) -> CommonResult<HintJumpConfig> {
    let value = read_json(path)?;

    let errors = validate_config(&value);
    if !errors.is_empty() {
        return Err(miette::Report::new(ConfigLoadError::Invalid { errors }))
            .wrap_err(format!("Config file: '{}'", path.display()));
    }

    Ok(HintJumpConfig::from_json_value_lenient(&value).config)
}

fn read_json(path: &Path) -> CommonResult<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err(ConfigErrorCouldNot::ReadFile {
            path: path.display().to_string(),
        })?;

    serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err(ConfigErrorCouldNot::ParseJson {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HintPosition;

    fn write_temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_lenient() {
        let file = write_temp_file(r#"{ "hintPosition": "end", "maxHints": "lots" }"#);
        let loaded = load_config_from_file(file.path()).unwrap();
        assert_eq!(loaded.config.hint_position, HintPosition::End);
        assert_eq!(loaded.config.max_hints, HintJumpConfig::default().max_hints);
        // Two legacy names, one defaulted field.
        assert_eq!(loaded.warnings.len(), 3);
    }

    #[test]
    fn test_load_strict_rejects_problems() {
        let file = write_temp_file(r#"{ "hint_position": "middle", "max_hints": 0 }"#);
        let report = load_config_from_file_strict(file.path()).unwrap_err();
        match report.downcast_ref::<ConfigLoadError>() {
            Some(ConfigLoadError::Invalid { errors }) => assert_eq!(errors.len(), 2),
            None => panic!("expected ConfigLoadError, got {report:?}"),
        }
    }

    #[test]
    fn test_load_strict_accepts_valid_file() {
        let file = write_temp_file(r#"{ "hint_position": "overlay", "debounce_delay_ms": 10 }"#);
        let config = load_config_from_file_strict(file.path()).unwrap();
        assert_eq!(config.hint_position, HintPosition::Overlay);
        assert_eq!(config.debounce_delay_ms, 10);
    }

    #[test]
    fn test_missing_file_and_bad_json() {
        assert!(load_config_from_file(Path::new("/definitely/not/here.json")).is_err());
        let file = write_temp_file("{ not json");
        assert!(load_config_from_file(file.path()).is_err());
        assert!(load_config_from_str("[").is_err());
    }

    #[test]
    fn test_load_from_str() {
        let loaded = load_config_from_str(r#"{ "enabled": false }"#).unwrap();
        assert!(!loaded.config.enabled);
        assert!(loaded.warnings.is_empty());
    }
}
