//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WeaveError, WeaveResult};

use super::types::{ColorMode, Config, Verbosity};

/// File name of the project configuration
pub const PROJECT_CONFIG: &str = "siteweave.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WeaveResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for reporting.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> WeaveResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WeaveError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the effective configuration.
///
/// An explicit file must exist. Otherwise `siteweave.toml` in `project_root`
/// wins over the user config; defaults apply when neither exists.
/// Environment overrides are applied last.
pub fn resolve(
    explicit: Option<&Path>,
    project_root: &Path,
) -> WeaveResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [Some(project_root.join(PROJECT_CONFIG)), user_config_path()]
            .into_iter()
            .flatten()
            .find(|p| p.exists()),
    };

    let (config, warnings) = match candidate {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG);
        if project_config.exists() {
            if let Ok(config) = Config::load(&project_config) {
                return with_env_overrides(config);
            }
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            if let Ok(config) = Config::load(&user_config) {
                return with_env_overrides(config);
            }
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (SITEWEAVE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(crate) fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(verbosity) = lookup("SITEWEAVE_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    if let Some(color) = lookup("SITEWEAVE_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    if let Some(output) = lookup("SITEWEAVE_OUTPUT") {
        if !output.trim().is_empty() {
            config.site.output = PathBuf::from(output);
        }
    }

    if let Some(url) = lookup("SITEWEAVE_SITE_URL") {
        config.site.url = url.trim().to_string();
    }

    if let Some(root_id) = lookup("SITEWEAVE_ROOT_ID") {
        if !root_id.trim().is_empty() {
            config.menu.root_id = root_id;
        }
    }

    config
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("siteweave").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "menu",
        "tag",
        "root_id",
        "overlay_id",
        "back_control_id",
        "top_control_id",
        "site_root_paths",
        "footnote",
        "content_host",
        "container_id",
        "date_marker_id",
        "site",
        "source",
        "output",
        "title",
        "url",
        "author",
        "stylesheet",
        "verbosity",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
