//! Human-readable reporting on stderr

use std::path::Path;

use crossterm::style::Stylize;
use siteweave::config::ConfigWarning;
use siteweave::{Diagnostic, Severity};

use crate::ui::context::UiContext;
use crate::ui::theme::{colors, Icon};

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    if ui.json {
        return;
    }
    for w in warnings {
        let icon = Icon::Warning.colored(ui.color, ui.unicode);
        match w.line {
            Some(line) => eprintln!(
                "{icon} Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            ),
            None => eprintln!("{icon} Unknown config key '{}' in {}", w.key, w.file.display()),
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// One line per diagnostic. Info records only show up when verbose.
pub fn render_diagnostics(ui: &UiContext, page: &Path, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        if d.severity == Severity::Info && !ui.verbose() {
            continue;
        }
        let icon = match d.severity {
            Severity::Error => Icon::Error,
            Severity::Warning => Icon::Warning,
            Severity::Info => Icon::Info,
        };
        let location = match &d.element {
            Some(element) => format!("{} ({})", page.display(), element),
            None => page.display().to_string(),
        };
        let code = if ui.color {
            format!("{}", format!("[{}]", d.code()).with(colors::DIM))
        } else {
            format!("[{}]", d.code())
        };
        out.push_str(&format!(
            "{} {location}: {} {code}\n",
            icon.colored(ui.color, ui.unicode),
            d.message
        ));
    }
    out
}

pub fn print_diagnostics(ui: &UiContext, page: &Path, diagnostics: &[Diagnostic]) {
    if ui.json {
        return;
    }
    eprint!("{}", render_diagnostics(ui, page, diagnostics));
}

/// Final status line
pub fn render_summary(ui: &UiContext, label: &str, errors: usize, warnings: usize) -> String {
    let icon = if errors > 0 {
        Icon::Error
    } else if warnings > 0 {
        Icon::Warning
    } else {
        Icon::Success
    };
    format!(
        "{} {label}: {errors} error(s), {warnings} warning(s)\n",
        icon.colored(ui.color, ui.unicode)
    )
}

pub fn print_summary(ui: &UiContext, label: &str, errors: usize, warnings: usize) {
    if ui.json || ui.quiet() {
        return;
    }
    eprint!("{}", render_summary(ui, label, errors, warnings));
}
