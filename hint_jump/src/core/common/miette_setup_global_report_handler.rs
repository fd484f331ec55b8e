// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::MietteHandlerOpts;
use tracing::debug;

/// Install the fancy [miette] report handler used by the `hint_jump` binary.
///
/// The [`miette::ErrorHook`] is lazily evaluated, so the terminal width is only
/// calculated when a report is actually printed.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = {
            let it = crossterm::terminal::size()
                .map(|(columns, _rows)| columns)
                .unwrap_or(80) as usize;
            // % is Display, ? is Debug.
            debug!(message = "miette::set_hook", terminal_width = %it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(2)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
