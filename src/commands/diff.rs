use std::fs;
use std::path::Path;

use anyhow::Result;
use siteweave::site;

use super::{load_config, GlobalArgs};
use crate::ui::diff::render_unified_diff_with_line_numbers;
use crate::ui::json::emit;
use crate::ui::theme::Icon;

pub fn cmd_diff(input: Option<&Path>, out: Option<&Path>, global: &GlobalArgs) -> Result<()> {
    let (config, ui) = load_config(global)?;
    let source = input.unwrap_or(&config.site.source);
    let output = out.unwrap_or(&config.site.output);

    let plan = site::plan(source, output, &config)?;

    let mut created = 0;
    let mut modified = 0;
    let mut unchanged = 0;

    let generated = plan
        .pages
        .iter()
        .map(|page| (&page.target, &page.html))
        .chain(plan.feed.iter().map(|(target, xml)| (target, xml)));

    for (target, html) in generated {
        let display = target
            .strip_prefix(output)
            .unwrap_or(target.as_path())
            .display()
            .to_string();
        let existing = fs::read_to_string(target).ok();

        let status = match &existing {
            None => "new",
            Some(old) if old == html => "unchanged",
            Some(_) => "modified",
        };
        match status {
            "new" => created += 1,
            "modified" => modified += 1,
            _ => unchanged += 1,
        }

        if ui.json {
            if status != "unchanged" {
                emit(serde_json::json!({
                    "event": "diff",
                    "command": "diff",
                    "path": display,
                    "status": status,
                }))?;
            }
            continue;
        }

        if status == "unchanged" {
            continue;
        }
        if ui.quiet() {
            println!("{status}: {display}");
        } else {
            print!(
                "{}",
                render_unified_diff_with_line_numbers(
                    &display,
                    existing.as_deref().unwrap_or(""),
                    html,
                    ui.color
                )
            );
        }
    }

    let assets = plan.assets.iter().filter(|(_, to)| !to.exists()).count();

    if ui.json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "diff",
            "new": created,
            "modified": modified,
            "unchanged": unchanged,
            "new_assets": assets,
        }))?;
    } else if !ui.quiet() {
        eprintln!(
            "{} {created} new, {modified} modified, {unchanged} unchanged page(s); {assets} new asset(s)",
            Icon::Diff.colored(ui.color, ui.unicode)
        );
    }
    Ok(())
}
