//! Design tokens for the siteweave CLI.

use crossterm::style::{Color, Stylize};

pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "●";
    pub const ARROW: &str = "↳";
    pub const WATCH: &str = "⟳";
    pub const DIFF: &str = "Δ";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const INFO: &str = "[INFO]";
    pub const ARROW: &str = "->";
    pub const WATCH: &str = "[~]";
    pub const DIFF: &str = "[DIFF]";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
    Arrow,
    Watch,
    Diff,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => icons::SUCCESS,
            (true, Icon::Error) => icons::ERROR,
            (true, Icon::Warning) => icons::WARNING,
            (true, Icon::Info) => icons::INFO,
            (true, Icon::Arrow) => icons::ARROW,
            (true, Icon::Watch) => icons::WATCH,
            (true, Icon::Diff) => icons::DIFF,
            (false, Icon::Success) => icons_ascii::SUCCESS,
            (false, Icon::Error) => icons_ascii::ERROR,
            (false, Icon::Warning) => icons_ascii::WARNING,
            (false, Icon::Info) => icons_ascii::INFO,
            (false, Icon::Arrow) => icons_ascii::ARROW,
            (false, Icon::Watch) => icons_ascii::WATCH,
            (false, Icon::Diff) => icons_ascii::DIFF,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => colors::SUCCESS,
            Icon::Error => colors::ERROR,
            Icon::Warning => colors::WARNING,
            Icon::Arrow => colors::DIM,
            Icon::Info | Icon::Watch | Icon::Diff => colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
