use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use siteweave::{watch, WatchEvent, WatchOptions};

use super::{load_config, GlobalArgs};
use crate::ui::context::UiContext;
use crate::ui::theme::Icon;

pub fn cmd_watch(source: Option<&Path>, out: Option<&Path>, global: &GlobalArgs) -> Result<()> {
    let (config, ui) = load_config(global)?;
    let source = source.unwrap_or(&config.site.source).to_path_buf();
    let output = out.unwrap_or(&config.site.output).to_path_buf();

    let options = WatchOptions {
        source,
        output,
        config,
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    watch(options, running, |event| {
        if ui.json {
            println!("{}", event.to_json());
            return;
        }
        let line = render_event(&timestamp(), &event, &ui);
        match event {
            WatchEvent::Error { .. } => eprint!("{line}"),
            _ => print!("{line}"),
        }
    })?;

    Ok(())
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}

fn render_event(timestamp: &str, event: &WatchEvent, ui: &UiContext) -> String {
    let icon = |icon: Icon| icon.colored(ui.color, ui.unicode);
    match event {
        WatchEvent::WatchStarted { source } => {
            format!("{} Watching {source} (Ctrl+C to stop)\n", icon(Icon::Watch))
        }
        WatchEvent::FileChanged { path } => {
            format!("[{timestamp}] {} {path}\n", icon(Icon::Arrow))
        }
        WatchEvent::BuildStarted => {
            if ui.verbose() {
                format!("[{timestamp}] Rendering...\n")
            } else {
                String::new()
            }
        }
        WatchEvent::BuildComplete {
            pages,
            copied,
            errors,
            warnings,
        } => {
            let status = if *errors > 0 {
                Icon::Error
            } else if *warnings > 0 {
                Icon::Warning
            } else {
                Icon::Success
            };
            format!(
                "[{timestamp}] {} {pages} page(s), {copied} file(s) copied, {errors} error(s), {warnings} warning(s)\n",
                icon(status)
            )
        }
        WatchEvent::Error { message } => {
            format!("[{timestamp}] {} {message}\n", icon(Icon::Error))
        }
        WatchEvent::Shutdown => format!("{} Stopped\n", icon(Icon::Info)),
    }
}
