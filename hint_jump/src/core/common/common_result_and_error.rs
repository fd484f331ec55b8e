// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error handling is done with [miette] at the boundaries (config files, logging setup,
//! the binary) and with small [thiserror] enums inside the engine. Each enum also
//! derives [`miette::Diagnostic`] so it can be turned into a [`miette::Report`] with
//! `?` and rendered with codes and help text.

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`].
/// It is basically `miette::Result<T, miette::Report>`.
pub type CommonResult<T> = miette::Result<T>;

/// Errors that are caught while checking a key pool. The generator never surfaces
/// these to its caller, it switches to the flat strategy instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum PoolValidationError {
    #[error("Key {key:?} is used more than once across the single and multi char pools")]
    #[diagnostic(
        code(r3bl_hint_jump::label_pool::duplicate_key),
        help("Every key must belong to exactly one pool, compared case-insensitively")
    )]
    DuplicateKey { key: String },

    #[error("Key pools can produce {capacity} labels but {requested} were requested")]
    #[diagnostic(
        code(r3bl_hint_jump::label_pool::empty_pool),
        help("Add keys to the multi char pool or enable numeric labels")
    )]
    EmptyPool { requested: usize, capacity: usize },
}

/// One problem found by [`crate::validate_config`]. Validation collects all of them
/// instead of stopping at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigValidationError {
    #[error("Config root must be a JSON object")]
    #[diagnostic(code(r3bl_hint_jump::config::not_an_object))]
    NotAnObject,

    #[error("Field {field:?} has the wrong type, expected {expected}")]
    #[diagnostic(code(r3bl_hint_jump::config::wrong_type))]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field {field:?} is out of range: {reason}")]
    #[diagnostic(code(r3bl_hint_jump::config::out_of_range))]
    OutOfRange { field: String, reason: String },

    #[error("Field {field:?} has unknown value {value:?}")]
    #[diagnostic(
        code(r3bl_hint_jump::config::unknown_value),
        help("Hint positions are one of: start, end, overlay")
    )]
    UnknownValue { field: String, value: String },

    #[error("Key pools are not usable")]
    #[diagnostic(code(r3bl_hint_jump::config::key_pool))]
    KeyPool(#[source] PoolValidationError),

    #[error("Config version {found} is newer than the supported version {supported}")]
    #[diagnostic(code(r3bl_hint_jump::config::unsupported_version))]
    UnsupportedVersion { found: u64, supported: u64 },
}

/// Errors at the file boundary of the config loader.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigLoadError {
    #[error("Config file has {} problem(s)", errors.len())]
    #[diagnostic(
        code(r3bl_hint_jump::config::invalid),
        help("Run the `check-config` subcommand to see every problem")
    )]
    Invalid {
        #[related]
        errors: Vec<ConfigValidationError>,
    },
}
