use std::path::Path;

use anyhow::Result;
use siteweave::{site, MenuTree, Trigger};

use super::{load_config, page_url, GlobalArgs};
use crate::ui::json::emit;
use crate::ui::output::print_diagnostics;
use crate::ui::theme::Icon;

/// Step names standing in for the configured overlay and top control ids
pub const OVERLAY_STEP: &str = "overlay";
pub const TOP_STEP: &str = "top";

pub fn cmd_simulate(
    file: &Path,
    steps: &[String],
    path: Option<&str>,
    html: bool,
    global: &GlobalArgs,
) -> Result<()> {
    let (config, ui) = load_config(global)?;
    let url = page_url(file, path);
    let mut page = site::render_file(file, &url, &config)?;

    print_diagnostics(&ui, file, &page.diagnostics());

    for (index, step) in steps.iter().enumerate() {
        let target = match step.as_str() {
            OVERLAY_STEP => config.menu.overlay_id.as_str(),
            TOP_STEP => config.menu.top_control_id.as_str(),
            other => other,
        };
        let trigger = page.activate(target)?;
        let tree = page.menus();
        let open = keys(tree, &tree.open_path());
        let deepest = keys(tree, &tree.deepest_nodes());

        let kind = match trigger {
            Trigger::Toggle(_) => "toggle",
            Trigger::Dismiss => "dismiss",
        };

        if ui.json {
            emit(serde_json::json!({
                "event": "step",
                "command": "simulate",
                "step": index + 1,
                "control": step,
                "trigger": kind,
                "open_path": open,
                "deepest": deepest,
                "overlay_active": tree.overlay().is_active(),
            }))?;
        } else {
            println!(
                "{} {step}: open [{}] deepest [{}]{}",
                Icon::Arrow.colored(ui.color, ui.unicode),
                open.join(" > "),
                deepest.join(", "),
                if tree.overlay().is_active() {
                    " (overlay)"
                } else {
                    ""
                }
            );
        }
    }

    if html {
        if ui.json {
            emit(serde_json::json!({
                "event": "html",
                "command": "simulate",
                "html": page.render(),
            }))?;
        } else {
            print!("{}", page.render());
        }
    }
    Ok(())
}

fn keys(tree: &MenuTree, ids: &[siteweave::MenuId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| tree.get(*id))
        .map(|node| node.key().to_string())
        .collect()
}
