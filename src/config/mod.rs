//! Configuration module for siteweave
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SITEWEAVE_*)
//! 3. Project config (siteweave.toml, or the file given with --config)
//! 4. User config (~/.config/siteweave/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{parse_with_warnings, resolve, ConfigWarning, PROJECT_CONFIG};
pub use types::{
    ColorMode, Config, FootnoteConfig, MenuConfig, OutputConfig, SiteConfig, Verbosity,
};
