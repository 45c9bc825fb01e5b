//! Terminal and JSON presentation for the CLI

pub mod context;
pub mod diff;
pub mod json;
pub mod output;
pub mod terminal;
pub mod theme;
