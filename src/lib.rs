//! Siteweave - prerenderer for nested disclosure menus and footnotes
//!
//! Siteweave expands two declarative page widgets into static markup: nested
//! disclosure menus (`<x-menu>`, up to three levels) with single-open-path
//! toggle behavior and an overlay for dismissal, and inline footnotes
//! (`<x-footnote>`) collected into a numbered list at the end of the page.
//! Pages that start with a `title:`/`created:` header are posts: they are
//! wrapped in a template, listed on the site index and published in an Atom
//! feed.

pub mod config;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod feed;
pub mod footnote;
pub mod fs;
pub mod markup;
pub mod menu;
pub mod page;
pub mod post;
pub mod site;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{WeaveError, WeaveResult};
pub use menu::{Lifecycle, MenuId, MenuTree, Trigger, MAX_LEVEL};
pub use page::{Page, PageOptions};
pub use post::{PostHeader, PostSummary};
pub use site::{SitePlan, SiteReport};
pub use watcher::{watch, WatchEvent, WatchOptions};
