//! Source watcher for continuous rendering
//!
//! Implements the `watch` command with:
//! - Debouncing (100ms)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod rebuild;

pub use event::{WatchEvent, WatchOptions};
pub use rebuild::watch;
