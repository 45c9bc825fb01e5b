//! Nested disclosure menus
//!
//! # Module Structure
//!
//! - `node` - Menu node data and lifecycle
//! - `tree` - Registry of nodes and the overlay
//! - `materialize` - One-time rendering of a node's panel and control
//! - `toggle` - State machine reacting to triggers
//! - `deepest` - Derived "deepest open node" pass
//! - `render` - Writes presentation flags back onto the document

mod deepest;
mod materialize;
mod node;
pub mod render;
mod toggle;
mod tree;

pub use deepest::recompute as recompute_deepest;
pub use materialize::{materialize, MaterializeContext, Outcome};
pub(crate) use materialize::prune;
pub use node::{Lifecycle, MenuEntry, MenuId, MenuNode, Presentation, MAX_LEVEL};
pub use toggle::{apply as apply_trigger, Trigger};
pub use tree::{MenuTree, Overlay};
