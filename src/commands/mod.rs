//! Subcommand implementations

pub mod check;
pub mod diff;
pub mod render;
pub mod simulate;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::Result;
use siteweave::config::{self, Config};

use crate::cli::ColorWhen;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// Flags shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub config: Option<PathBuf>,
}

/// Resolve configuration relative to the working directory and build the UI
/// context from it. Unknown keys are reported, not fatal.
pub fn load_config(global: &GlobalArgs) -> Result<(Config, UiContext)> {
    let project_root = std::env::current_dir()?;
    let (config, warnings) = config::resolve(global.config.as_deref(), &project_root)?;
    let ui = UiContext::new(global.json, global.verbose, global.color, &config);
    print_config_warnings(&ui, &warnings);
    Ok((config, ui))
}

/// URL path for a page rendered on its own: the explicit `--path`, or the
/// file name served from the site root.
pub fn page_url(file: &Path, explicit: Option<&str>) -> String {
    match explicit {
        Some(path) => path.to_string(),
        None => siteweave::site::url_path(Path::new(file.file_name().unwrap_or_default())),
    }
}
