use std::io::Write;
use std::path::Path;

use anyhow::Result;
use siteweave::site;

use super::{load_config, page_url, GlobalArgs};
use crate::ui::json::emit;
use crate::ui::output::{print_diagnostics, print_summary};
use crate::ui::theme::Icon;

pub fn cmd_render(
    input: Option<&Path>,
    out: Option<&Path>,
    path: Option<&str>,
    global: &GlobalArgs,
) -> Result<()> {
    let (config, ui) = load_config(global)?;
    let input = input.unwrap_or(&config.site.source);

    if input.is_file() {
        let url = page_url(input, path);
        let page = site::render_file(input, &url, &config)?;
        let html = page.render();
        let diagnostics = page.diagnostics();

        if let Some(out) = out {
            siteweave::fs::write_atomic(out, &html)?;
        }

        if ui.json {
            let mut event = serde_json::json!({
                "event": "page",
                "command": "render",
                "source": input.display().to_string(),
                "url_path": url,
                "menus": page.menus().len(),
                "footnotes": page.footnote_count(),
                "diagnostics": diagnostics,
            });
            if out.is_none() {
                event["html"] = serde_json::Value::String(html);
            }
            emit(event)?;
            return Ok(());
        }

        print_diagnostics(&ui, input, &diagnostics);
        match out {
            Some(out) => {
                if !ui.quiet() {
                    eprintln!(
                        "{} Rendered {} -> {}",
                        Icon::Success.colored(ui.color, ui.unicode),
                        input.display(),
                        out.display()
                    );
                }
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        return Ok(());
    }

    let output = out.unwrap_or(&config.site.output);
    if ui.verbose() && !ui.json {
        eprintln!(
            "{} Rendering {} -> {}",
            Icon::Arrow.colored(ui.color, ui.unicode),
            input.display(),
            output.display()
        );
    }

    let report = site::build(input, output, &config)?;

    if ui.json {
        for page in &report.pages {
            emit(serde_json::json!({
                "event": "page",
                "command": "render",
                "source": page.source.display().to_string(),
                "target": page.target.display().to_string(),
                "url_path": page.url_path,
                "menus": page.menus,
                "footnotes": page.footnotes,
                "diagnostics": page.diagnostics,
            }))?;
        }
        emit(serde_json::json!({
            "event": "complete",
            "command": "render",
            "pages": report.pages.len(),
            "copied": report.copied.len(),
            "feed": report.feed.as_ref().map(|f| f.display().to_string()),
            "errors": report.error_count(),
            "warnings": report.warning_count(),
        }))?;
        return Ok(());
    }

    for page in &report.pages {
        print_diagnostics(&ui, &page.source, &page.diagnostics);
        if ui.verbose() {
            eprintln!(
                "{} {} ({} menu node(s), {} footnote(s))",
                Icon::Success.colored(ui.color, ui.unicode),
                page.target.display(),
                page.menus,
                page.footnotes
            );
        }
    }

    if let Some(feed) = &report.feed {
        if ui.verbose() {
            eprintln!(
                "{} {}",
                Icon::Success.colored(ui.color, ui.unicode),
                feed.display()
            );
        }
    }

    print_summary(
        &ui,
        &format!(
            "Rendered {} page(s), copied {} file(s)",
            report.pages.len(),
            report.copied.len()
        ),
        report.error_count(),
        report.warning_count(),
    );
    Ok(())
}
