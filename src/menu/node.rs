//! Menu node data.

use serde::Serialize;

use crate::markup::NodeId;

/// Deepest supported nesting level; the root menu is level 1.
pub const MAX_LEVEL: u8 = 3;

/// Index of a menu inside its [`super::MenuTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MenuId(pub(crate) usize);

impl MenuId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a node is in its one-time setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Attached, waiting for its content
    Pending,
    /// Panel and control rendered, control wired
    Materialized,
    /// Configuration error; never renders and has no control
    Rejected,
}

/// One entry of a menu panel, in markup order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Plain actionable element
    Item(NodeId),
    /// Nested menu
    Menu(MenuId),
}

/// Elements created by materialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub control: NodeId,
    pub panel: NodeId,
    pub list: NodeId,
}

/// A disclosure menu
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub(crate) id: MenuId,
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) level: u8,
    pub(crate) parent: Option<MenuId>,
    pub(crate) is_top: bool,
    pub(crate) is_open: bool,
    pub(crate) is_deepest: bool,
    pub(crate) children: Vec<MenuEntry>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) element: Option<NodeId>,
    pub(crate) presentation: Option<Presentation>,
}

impl MenuNode {
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Markup identifier (the element's `id` attribute)
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn is_top(&self) -> bool {
        self.is_top
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_deepest(&self) -> bool {
        self.is_deepest
    }

    pub fn children(&self) -> &[MenuEntry] {
        &self.children
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.presentation
    }

    pub fn exceeds_max_level(&self) -> bool {
        self.level > MAX_LEVEL
    }
}
