use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use siteweave::diagnostics::count_at_least;
use siteweave::{site, Diagnostic, Severity};

use super::{load_config, page_url, GlobalArgs};
use crate::ui::json::emit;
use crate::ui::output::{print_diagnostics, print_summary};

pub fn cmd_check(input: Option<&Path>, strict_warnings: bool, global: &GlobalArgs) -> Result<()> {
    let (config, ui) = load_config(global)?;
    let input = input.unwrap_or(&config.site.source);

    if ui.json {
        emit(serde_json::json!({
            "event": "start",
            "command": "check",
            "input": input.display().to_string(),
            "strict_warnings": strict_warnings,
        }))?;
    }

    let pages: Vec<(PathBuf, Vec<Diagnostic>)> = if input.is_file() {
        let page = site::render_file(input, &page_url(input, None), &config)?;
        vec![(input.to_path_buf(), page.diagnostics())]
    } else {
        site::plan(input, &config.site.output, &config)?
            .pages
            .into_iter()
            .map(|p| (p.source, p.diagnostics))
            .collect()
    };

    let mut errors = 0;
    let mut warnings = 0;
    for (source, diagnostics) in &pages {
        errors += count_at_least(diagnostics, Severity::Error);
        warnings += diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();

        if ui.json {
            for d in diagnostics {
                emit(serde_json::json!({
                    "event": "diagnostic",
                    "command": "check",
                    "page": source.display().to_string(),
                    "diagnostic": d,
                }))?;
            }
        } else {
            print_diagnostics(&ui, source, diagnostics);
        }
    }

    let failed = errors > 0 || (strict_warnings && warnings > 0);

    if ui.json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "check",
            "pages": pages.len(),
            "errors": errors,
            "warnings": warnings,
            "success": !failed,
        }))?;
    } else {
        print_summary(
            &ui,
            &format!("Checked {} page(s)", pages.len()),
            errors,
            warnings,
        );
    }

    if failed {
        if strict_warnings && errors == 0 {
            bail!("check failed: {warnings} warning(s) with --strict-warnings");
        }
        bail!("check failed: {errors} error(s)");
    }
    Ok(())
}
