use siteweave::config::{ColorMode, Config, Verbosity};

use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbosity: Verbosity,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        Self::from_caps(json, verbose, cli_color, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let verbosity = match verbose {
            0 => config.output.verbosity,
            1 => config.output.verbosity.max(Verbosity::Verbose),
            _ => Verbosity::Debug,
        };

        Self {
            json,
            verbosity,
            color: color && !json,
            unicode: caps.supports_unicode,
        }
    }

    pub fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}
