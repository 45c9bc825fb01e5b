//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WeaveResult;

use super::loader::{self, ConfigWarning};

/// Menu widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Tag name of the menu widget
    pub tag: String,

    /// `id` attribute that marks the root menu
    pub root_id: String,

    /// Host element adopted as the overlay surface
    pub overlay_id: String,

    /// Host "back" control, disabled on site root pages
    pub back_control_id: String,

    /// Host "top" control; activating it dismisses every menu
    pub top_control_id: String,

    /// Paths treated as the site root
    pub site_root_paths: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            tag: "x-menu".to_string(),
            root_id: "top-menu".to_string(),
            overlay_id: "menu-overlay".to_string(),
            back_control_id: "back".to_string(),
            top_control_id: "back-to-top".to_string(),
            site_root_paths: vec!["/".to_string(), "/index.html".to_string(), String::new()],
        }
    }
}

impl MenuConfig {
    pub fn is_site_root(&self, path: &str) -> bool {
        self.site_root_paths.iter().any(|p| p == path)
    }
}

/// Footnote widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootnoteConfig {
    pub tag: String,

    /// Tag of the element footnotes are collected into
    pub content_host: String,

    /// `id` of the shared footnote container
    pub container_id: String,

    /// When present, the container is kept right before this element
    pub date_marker_id: String,
}

impl Default for FootnoteConfig {
    fn default() -> Self {
        Self {
            tag: "x-footnote".to_string(),
            content_host: "main".to_string(),
            container_id: "footnotes".to_string(),
            date_marker_id: "date-updated".to_string(),
        }
    }
}

/// Site layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub source: PathBuf,
    pub output: PathBuf,

    /// Site name, used in post headers and the feed
    pub title: String,

    /// Absolute base URL; the Atom feed is only written when set
    pub url: String,

    /// Feed author
    pub author: String,

    /// Stylesheet linked from the post template (empty for none)
    pub stylesheet: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("site"),
            output: PathBuf::from("public"),
            title: String::new(),
            url: String::new(),
            author: String::new(),
            stylesheet: "/style.css".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub footnote: FootnoteConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> WeaveResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WeaveResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (SITEWEAVE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
