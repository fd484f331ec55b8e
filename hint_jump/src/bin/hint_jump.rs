// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Command line front end for poking at the engine without an editor.
//!
//! ```text
//! hint_jump labels --count 30
//! hint_jump show --file src/lib.rs --line 10 --col 1 --debug-info
//! hint_jump check-config hint_jump.json
//! ```

use std::{path::{Path, PathBuf},
          sync::Arc};

use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use miette::{Context, IntoDiagnostic};
use r3bl_hint_jump::{CommonResult, CursorPos, HintJumpConfig, HintMapping, HintPosition,
                     HintRenderer, RequestCoordinator, ShowParams, TracingConfig, Word,
                     generate_labels_with_strategy, load_config_from_file,
                     load_config_from_file_strict, setup_default_miette_global_report_handler,
                     throws, try_initialize_logging_global};

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

#[derive(Debug, Parser)]
#[command(bin_name = "hint_jump")]
#[command(about = "Label the words on screen so you can jump to any of them")]
#[command(version)]
#[command(arg_required_else_help(true))]
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `hint_jump_log.txt` for debugging"
    )]
    pub enable_logging: bool,

    #[arg(global = true, long, short = 'c', help = "Config file (JSON) to use")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(about = "Print the labels generated for a number of words")]
    Labels {
        #[arg(long, short = 'n')]
        count: usize,
    },

    #[clap(about = "Print the hints for every word of a file, given a cursor position")]
    Show {
        #[arg(long, short = 'f')]
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        line: usize,
        #[arg(long, default_value_t = 1)]
        col: usize,
        #[arg(long, help = "Print the hints as JSON")]
        json: bool,
        #[arg(long, help = "Print the coordinator state as JSON to stderr afterwards")]
        debug_info: bool,
    },

    #[clap(about = "Validate a config file and report every problem in it")]
    CheckConfig { file: PathBuf },
}

#[tokio::main]
async fn main() -> CommonResult<()> {
    throws!({
        setup_default_miette_global_report_handler(ISSUES_URL);

        let cli_arg = CLIArg::parse();

        let enable_logging = cli_arg.global_options.enable_logging;
        if enable_logging {
            try_initialize_logging_global(TracingConfig::new_file(
                None,
                tracing_core::LevelFilter::DEBUG,
            ))?;
            // % is Display, ? is Debug.
            tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
        }

        run_command(cli_arg).await?;

        if enable_logging {
            tracing::debug!(message = "Stop logging...");
        }
    })
}

async fn run_command(cli_arg: CLIArg) -> CommonResult<()> {
    match cli_arg.command {
        CLICommand::Labels { count } => {
            let config = load_config(cli_arg.global_options.config.as_deref())?;
            let generated = generate_labels_with_strategy(count, &config.label_pool());
            println!("{} {}", "strategy:".dim(), generated.strategy);
            for label in &generated.labels {
                println!("{label}");
            }
        }
        CLICommand::Show {
            file,
            line,
            col,
            json,
            debug_info,
        } => {
            let config = load_config(cli_arg.global_options.config.as_deref())?;
            let text = std::fs::read_to_string(&file)
                .into_diagnostic()
                .wrap_err(format!("Could not read file: '{}'", file.display()))?;
            let words = words_in_text(&text);

            let renderer: Arc<dyn HintRenderer> = if json {
                Arc::new(NoopRenderer)
            } else {
                Arc::new(StdoutRenderer)
            };
            let coordinator = RequestCoordinator::new(
                Arc::new(move || words.clone()),
                Arc::new(CursorPos::new(line, col)),
                renderer,
            );
            let hints = coordinator
                .show_immediately(ShowParams::new(Arc::new(config)))
                .await;

            if json {
                let output = serde_json::to_string_pretty(&*hints).into_diagnostic()?;
                println!("{output}");
            }

            if debug_info {
                let snapshot = serde_json::to_string_pretty(&coordinator.debug_snapshot())
                    .into_diagnostic()?;
                eprintln!("{snapshot}");
            }
        }
        CLICommand::CheckConfig { file } => {
            load_config_from_file_strict(&file)?;
            println!("{} {}", "ok:".green(), file.display());
        }
    }
    Ok(())
}

fn load_config(maybe_path: Option<&Path>) -> CommonResult<HintJumpConfig> {
    match maybe_path {
        Some(path) => {
            let loaded = load_config_from_file(path)?;
            for warning in &loaded.warnings {
                eprintln!("{} {warning}", "warning:".yellow());
            }
            Ok(loaded.config)
        }
        None => Ok(HintJumpConfig::default()),
    }
}

/// Splits `text` into runs of alphanumeric chars and `_`. Lines and columns are 1-based,
/// columns count chars and byte columns count bytes.
fn words_in_text(text: &str) -> Vec<Word> {
    let mut words = vec![];
    for (line_index, line) in text.lines().enumerate() {
        let mut current: Option<(usize, usize, String)> = None;
        for (col_index, (byte_index, ch)) in line.char_indices().enumerate() {
            if ch.is_alphanumeric() || ch == '_' {
                current
                    .get_or_insert_with(|| (col_index, byte_index, String::new()))
                    .2
                    .push(ch);
            } else if let Some((col, byte_col, word)) = current.take() {
                words.push(Word::new(word, line_index + 1, col + 1).with_byte_col(byte_col + 1));
            }
        }
        if let Some((col, byte_col, word)) = current.take() {
            words.push(Word::new(word, line_index + 1, col + 1).with_byte_col(byte_col + 1));
        }
    }
    words
}

#[derive(Debug)]
struct StdoutRenderer;

impl HintRenderer for StdoutRenderer {
    fn render(&self, hints: &[HintMapping]) {
        for hint in hints {
            let marker = match hint.placement {
                HintPosition::Start => "^",
                HintPosition::End => "$",
                HintPosition::Overlay => "#",
            };
            println!(
                "{:>5}:{:<4} {} {} {}",
                hint.word.line,
                hint.hint_col,
                hint.hint.as_str().black().on_yellow(),
                marker.dim(),
                hint.word.text
            );
        }
    }

    fn clear(&self) {}
}

#[derive(Debug)]
struct NoopRenderer;

impl HintRenderer for NoopRenderer {
    fn render(&self, _hints: &[HintMapping]) {}

    fn clear(&self) {}
}
