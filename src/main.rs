//! Siteweave CLI - prerender nested menus and footnotes
//!
//! Usage: siteweave <COMMAND>
//!
//! Commands:
//!   render    Prerender a page or a whole site
//!   check     Validate pages and report widget problems
//!   simulate  Replay menu interactions against a page
//!   diff      Preview rendered changes without writing
//!   watch     Watch the source directory and re-render on changes

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::GlobalArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = GlobalArgs {
        json: cli.json,
        verbose: cli.verbose,
        color: cli.color,
        config: cli.config,
    };

    match cli.command {
        Commands::Render { input, out, path } => commands::render::cmd_render(
            input.as_deref(),
            out.as_deref(),
            path.as_deref(),
            &global,
        ),
        Commands::Check {
            input,
            strict_warnings,
        } => commands::check::cmd_check(input.as_deref(), strict_warnings, &global),
        Commands::Simulate {
            file,
            steps,
            path,
            html,
        } => commands::simulate::cmd_simulate(&file, &steps, path.as_deref(), html, &global),
        Commands::Diff { input, out } => {
            commands::diff::cmd_diff(input.as_deref(), out.as_deref(), &global)
        }
        Commands::Watch { source, out } => {
            commands::watch::cmd_watch(source.as_deref(), out.as_deref(), &global)
        }
    }
}
