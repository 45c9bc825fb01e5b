use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Siteweave - prerender nested menus and footnotes for static sites
#[derive(Parser, Debug)]
#[command(name = "siteweave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Configuration file (defaults to ./siteweave.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prerender a page or a whole site
    Render {
        /// Page or source directory (defaults to [site] source)
        input: Option<PathBuf>,

        /// Output file or directory (pages print to stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// URL path of a single page (decides whether it is the site root)
        #[arg(long)]
        path: Option<String>,
    },

    /// Validate pages and report widget problems
    Check {
        /// Page or source directory (defaults to [site] source)
        input: Option<PathBuf>,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict_warnings: bool,
    },

    /// Replay menu interactions against a page
    Simulate {
        /// Page to load
        file: PathBuf,

        /// Controls to activate in order: a menu id, `overlay` or `top`
        steps: Vec<String>,

        /// URL path of the page
        #[arg(long)]
        path: Option<String>,

        /// Print the final markup to stdout
        #[arg(long)]
        html: bool,
    },

    /// Preview rendered changes without writing
    Diff {
        /// Source directory (defaults to [site] source)
        input: Option<PathBuf>,

        /// Output directory to compare against (defaults to [site] output)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Watch the source directory and re-render on changes
    Watch {
        /// Source directory (defaults to [site] source)
        source: Option<PathBuf>,

        /// Output directory (defaults to [site] output)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
