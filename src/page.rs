//! Page controller
//!
//! A [`Page`] owns the parsed document, the menu registry and the footnote
//! collector. It attaches widgets in document order, delivers content
//! notifications, routes user interaction to the toggle controller and keeps
//! the presentation flags on the markup in sync.

use crate::config::{Config, FootnoteConfig, MenuConfig};
use crate::content::ContentWatch;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{WeaveError, WeaveResult};
use crate::footnote::{FootnoteCollector, FootnoteId, FootnoteOutcome};
use crate::markup::{parse_document, parse_fragment_into, Document, NodeId};
use crate::menu::{
    self, render, Lifecycle, MaterializeContext, MenuId, MenuTree, Outcome, Trigger,
};

/// Everything a page needs besides its markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub menu: MenuConfig,
    pub footnote: FootnoteConfig,
    /// URL path the page is served at
    pub current_path: String,
}

impl PageOptions {
    pub fn from_config(config: &Config, current_path: impl Into<String>) -> Self {
        Self {
            menu: config.menu.clone(),
            footnote: config.footnote.clone(),
            current_path: current_path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Widget {
    Menu(MenuId),
    Footnote(FootnoteId),
}

/// A page with its widgets attached
#[derive(Debug, Clone)]
pub struct Page {
    doc: Document,
    menus: MenuTree,
    footnotes: FootnoteCollector,
    watches: Vec<(Widget, ContentWatch)>,
    options: PageOptions,
    diagnostics: Vec<Diagnostic>,
    /// Last generated `menu-N` key; never reused within a page
    auto_keys: usize,
}

impl Page {
    /// Parse `source` and attach every widget in it
    pub fn parse(source: &str, options: PageOptions) -> Self {
        let doc = parse_document(source);
        let mut page = Self {
            doc,
            menus: MenuTree::new(),
            footnotes: FootnoteCollector::new(),
            watches: Vec::new(),
            options,
            diagnostics: Vec::new(),
            auto_keys: 0,
        };
        let root = page.doc.root();
        page.attach(&[root]);
        page.sync_presentation();
        page
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn menus(&self) -> &MenuTree {
        &self.menus
    }

    pub fn footnotes(&self) -> &FootnoteCollector {
        &self.footnotes
    }

    pub fn footnote_count(&self) -> usize {
        self.footnotes.placed_count()
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Diagnostics recorded so far, plus one info record per widget still
    /// waiting for content
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = self.diagnostics.clone();
        for (widget, watch) in &self.watches {
            if !watch.is_armed() {
                continue;
            }
            let element = self.widget_label(*widget);
            out.push(Diagnostic::new(
                DiagnosticKind::PendingContent,
                "widget has no content yet and was left unrendered",
                element,
            ));
        }
        out
    }

    /// Append `markup` to `element` the way content streams into a live page.
    ///
    /// New widgets inside the fragment are attached, then armed watches that
    /// observe `element` are notified. Returns the top-level inserted nodes.
    pub fn insert_content(&mut self, element: NodeId, markup: &str) -> Vec<NodeId> {
        let inserted = parse_fragment_into(&mut self.doc, element, markup);
        self.attach(&inserted);
        self.notify(element);
        self.sync_presentation();
        inserted
    }

    /// Activate a node's disclosure control.
    ///
    /// Ignored unless the node and all of its ancestors are materialized.
    pub fn toggle(&mut self, id: MenuId) {
        if self.is_interactive(id) {
            self.fire(Trigger::Toggle(id));
        }
    }

    /// Activate the overlay
    pub fn dismiss(&mut self) {
        self.fire(Trigger::Dismiss);
    }

    /// Activate the control identified by `target`: a menu key, the overlay id
    /// or the top control id
    pub fn activate(&mut self, target: &str) -> WeaveResult<Trigger> {
        let trigger = self.resolve(target)?;
        self.fire(trigger);
        Ok(trigger)
    }

    /// Serialize the page with the current presentation
    pub fn render(&self) -> String {
        self.doc.to_html()
    }

    fn resolve(&self, target: &str) -> WeaveResult<Trigger> {
        let overlay = self.menus.overlay();
        let dismiss_surfaces = [overlay.surface(), overlay.top_control()];
        if dismiss_surfaces
            .into_iter()
            .flatten()
            .any(|node| self.doc.attr(node, "id") == Some(target))
        {
            return Ok(Trigger::Dismiss);
        }

        self.menus
            .find_by_key(target)
            .filter(|id| self.is_interactive(*id))
            .map(Trigger::Toggle)
            .ok_or_else(|| WeaveError::UnknownControl {
                target: target.to_string(),
            })
    }

    /// A rejected ancestor has no panel to reveal, so its descendants stay
    /// inert too.
    fn is_interactive(&self, id: MenuId) -> bool {
        let materialized = |id: MenuId| {
            self.menus
                .get(id)
                .is_some_and(|n| n.lifecycle() == Lifecycle::Materialized)
        };
        materialized(id) && self.menus.ancestors(id).into_iter().all(materialized)
    }

    fn fire(&mut self, trigger: Trigger) {
        menu::apply_trigger(&mut self.menus, trigger);
        self.sync_presentation();
    }

    fn sync_presentation(&mut self) {
        render::apply(&mut self.doc, &self.menus);
    }

    /// Register widgets found in `scopes` (and below), then materialize those
    /// whose content is already there. Registration completes first so that
    /// nested menus are known when their parent classifies its children.
    fn attach(&mut self, scopes: &[NodeId]) {
        let mut found = Vec::new();
        for scope in scopes {
            let mut nodes = vec![*scope];
            nodes.extend(self.doc.descendants(*scope));
            for node in nodes {
                if let Some(widget) = self.register(node) {
                    found.push(widget);
                }
            }
        }

        for widget in found {
            // An enclosing menu may have been removed since registration
            if !self.is_live(widget) {
                continue;
            }
            let element = self.widget_element(widget);
            let mut watch = ContentWatch::arm(element);
            if watch.notify(&self.doc) {
                self.materialize(widget);
            }
            if self.is_live(widget) {
                self.watches.push((widget, watch));
            }
        }
    }

    fn register(&mut self, node: NodeId) -> Option<Widget> {
        let tag = self.doc.tag_name(node)?;
        let is_menu = tag == self.options.menu.tag;
        if !is_menu && tag != self.options.footnote.tag {
            return None;
        }
        // Inside a subtree pruned earlier in this pass
        if !self.doc.is_attached(node) {
            return None;
        }

        if is_menu {
            if self.menus.find_by_element(node).is_some() {
                return None;
            }
            return self.register_menu(node).map(Widget::Menu);
        }

        if self.footnotes.find_by_element(node).is_some() {
            return None;
        }
        Some(Widget::Footnote(self.footnotes.register(node)))
    }

    /// Register a menu element. Returns `None` when it sits too deep and was
    /// removed on the spot.
    fn register_menu(&mut self, node: NodeId) -> Option<MenuId> {
        let parent = self
            .doc
            .ancestors(node)
            .find_map(|a| self.menus.find_by_element(a));
        let key = match self.doc.attr(node, "id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.next_auto_key(),
        };
        let label = self.doc.attr(node, "label").unwrap_or_default().to_string();

        let id = self.menus.insert(parent, key.as_str(), label);
        self.menus.bind_element(id, node);

        if let Some(Outcome::Detached { level, removed }) =
            menu::prune(&mut self.doc, &mut self.menus, id)
        {
            self.record_detached(level, &removed, Some(key));
            return None;
        }

        if key == self.options.menu.root_id && !self.menus.mark_top(id) {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicateRoot,
                "another menu already is the root, or the menu is nested; treating it as a nested menu",
                Some(key),
            ));
        }
        Some(id)
    }

    /// Next `menu-N` key not taken by a registered menu or an element id
    fn next_auto_key(&mut self) -> String {
        loop {
            self.auto_keys += 1;
            let key = format!("menu-{}", self.auto_keys);
            if self.menus.find_by_key(&key).is_none() && self.doc.find_by_id(&key).is_none() {
                return key;
            }
        }
    }

    fn record_detached(&mut self, level: u8, removed: &[MenuId], key: Option<String>) {
        let watches = std::mem::take(&mut self.watches);
        self.watches = watches
            .into_iter()
            .filter(|(w, _)| !matches!(w, Widget::Menu(m) if removed.contains(m)))
            .filter(|(w, _)| self.is_live(*w))
            .collect();
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::DepthExceeded { level },
            format!(
                "menu nested at level {level}, deeper than {}; removed",
                menu::MAX_LEVEL
            ),
            key,
        ));
    }

    fn notify(&mut self, changed: NodeId) {
        let mut ready = Vec::new();
        for (widget, watch) in &mut self.watches {
            if watch.is_armed() && watch.observes(&self.doc, changed) && watch.notify(&self.doc) {
                ready.push(*widget);
            }
        }
        for widget in ready {
            self.materialize(widget);
        }
    }

    fn materialize(&mut self, widget: Widget) {
        match widget {
            Widget::Menu(id) => self.materialize_menu(id),
            Widget::Footnote(id) => self.materialize_footnote(id),
        }
    }

    fn materialize_menu(&mut self, id: MenuId) {
        let key = self.menus.get(id).map(|n| n.key().to_string());
        let ctx = MaterializeContext {
            config: &self.options.menu,
            current_path: &self.options.current_path,
        };

        match menu::materialize(&mut self.doc, &mut self.menus, id, &ctx) {
            Ok(Outcome::Ready) | Ok(Outcome::Skipped) => {}
            Ok(Outcome::Detached { level, removed }) => {
                self.record_detached(level, &removed, key)
            }
            Err(err) => self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::MissingLabel,
                err.to_string(),
                key,
            )),
        }
    }

    fn materialize_footnote(&mut self, id: FootnoteId) {
        let number = self.footnotes.get(id).map(|n| n.number());
        let element = number.map(|n| format!("footnote {n}"));

        match self.footnotes.process(&mut self.doc, id, &self.options.footnote) {
            Ok(FootnoteOutcome::Placed { .. }) | Ok(FootnoteOutcome::Skipped) => {}
            Ok(FootnoteOutcome::Empty) => self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyFootnote,
                "footnote content is empty; tag removed",
                element,
            )),
            Err(err @ WeaveError::ContentHostNotFound { .. }) => self.diagnostics.push(
                Diagnostic::new(DiagnosticKind::ContentHostMissing, err.to_string(), element),
            ),
            Err(err) => self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::FootnoteListMissing,
                err.to_string(),
                element,
            )),
        }
    }

    /// Still registered and still part of the document
    fn is_live(&self, widget: Widget) -> bool {
        let registered = match widget {
            Widget::Menu(id) => self.menus.get(id).is_some(),
            Widget::Footnote(id) => self.footnotes.get(id).is_some(),
        };
        registered && self.doc.is_attached(self.widget_element(widget))
    }

    fn widget_element(&self, widget: Widget) -> NodeId {
        match widget {
            Widget::Menu(id) => self
                .menus
                .get(id)
                .and_then(|n| n.element())
                .unwrap_or_else(|| self.doc.root()),
            Widget::Footnote(id) => self
                .footnotes
                .get(id)
                .map(|n| n.element())
                .unwrap_or_else(|| self.doc.root()),
        }
    }

    fn widget_label(&self, widget: Widget) -> Option<String> {
        match widget {
            Widget::Menu(id) => self.menus.get(id).map(|n| n.key().to_string()),
            Widget::Footnote(id) => self
                .footnotes
                .get(id)
                .map(|n| format!("footnote {}", n.number())),
        }
    }
}
