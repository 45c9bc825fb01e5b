//! Arena document tree.

use super::serialize;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single attribute. `value` is `None` for bare attributes like `hidden`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Element name plus attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    /// Create an element with no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style bare attribute setter
    pub fn with_flag(mut self, name: &str) -> Self {
        self.set_flag(name);
        self
    }

    /// Attribute value; bare attributes read as `""`
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.put(name, Some(value.into()));
    }

    pub fn set_flag(&mut self, name: &str) {
        self.put(name, None);
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|a| a.name != name);
    }

    fn put(&mut self, name: &str, value: Option<String>) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = remaining.join(" ");
            self.set_attr("class", joined);
        }
    }

    /// Add or remove `class` depending on `on`
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root; never serialized itself
    Root,
    Element(Element),
    /// Source text, kept verbatim (entities are not decoded)
    Text(String),
    Comment(String),
    /// Everything between `<!` and `>`
    Doctype(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed markup tree.
///
/// Nodes are never freed: detaching a node only unlinks it from its parent, so
/// ids held by widgets stay valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the contents of a text node. Ignored for other node kinds.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        if let NodeData::Text(text) = &mut self.nodes[id.0].data {
            *text = value.into();
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeData::Element(element))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Comment(text.into()))
    }

    pub fn create_doctype(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Doctype(text.into()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// Unlink `id` from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Move `child` to the end of `parent`'s children
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Move `child` right before `reference`. Falls back to nothing when
    /// `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        let Some(parent) = self.nodes[reference.0].parent else {
            return;
        };
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(pos, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Put `replacement` where `old` is and detach `old`
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) {
        if old == replacement || self.nodes[old.0].parent.is_none() {
            return;
        }
        self.insert_before(old, replacement);
        self.detach(old);
    }

    /// Detach every child of `id`, returning them in order
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Iterate over the parent chain of `id`, nearest first, excluding `id`
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.nodes[id.0].parent,
        }
    }

    /// Whether `id` is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.ancestors(id).any(|a| a == self.root())
    }

    /// All nodes below `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    /// First attached element whose `id` attribute equals `value`
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.element(*n).and_then(|el| el.id()) == Some(value))
    }

    /// First attached element with the given tag name
    pub fn find_first_by_tag(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.tag_name(*n) == Some(name))
    }

    /// Whether the node's inner markup is non-empty once trimmed
    pub fn has_content(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.iter().any(|c| match self.data(*c) {
            NodeData::Text(text) => !text.trim().is_empty(),
            NodeData::Root => false,
            _ => true,
        })
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            serialize::write_node(self, *child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serialize::write_node(self, id, &mut out);
        out
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }
}

/// Iterator returned by [`Document::ancestors`]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let main = doc.create_element(Element::new("main"));
        let p = doc.create_element(Element::new("p").with_attr("id", "intro"));
        let text = doc.create_text("hello");
        let root = doc.root();
        doc.append_child(root, main);
        doc.append_child(main, p);
        doc.append_child(p, text);
        (doc, main, p, text)
    }

    #[test]
    fn append_moves_node_between_parents() {
        let (mut doc, main, p, _) = sample();
        let aside = doc.create_element(Element::new("aside"));
        doc.append_child(main, aside);
        doc.append_child(aside, p);

        assert_eq!(doc.children(main), &[aside]);
        assert_eq!(doc.parent(p), Some(aside));
    }

    #[test]
    fn insert_before_places_node_in_order() {
        let (mut doc, main, p, _) = sample();
        let hr = doc.create_element(Element::new("hr"));
        doc.insert_before(p, hr);

        assert_eq!(doc.children(main), &[hr, p]);
    }

    #[test]
    fn replace_swaps_position() {
        let (mut doc, main, p, _) = sample();
        let sup = doc.create_element(Element::new("sup"));
        doc.replace(p, sup);

        assert_eq!(doc.children(main), &[sup]);
        assert!(!doc.is_attached(p));
    }

    #[test]
    fn find_by_id_ignores_detached_nodes() {
        let (mut doc, _, p, _) = sample();
        assert_eq!(doc.find_by_id("intro"), Some(p));

        doc.detach(p);
        assert_eq!(doc.find_by_id("intro"), None);
    }

    #[test]
    fn has_content_ignores_whitespace() {
        let mut doc = Document::new();
        let el = doc.create_element(Element::new("x-menu"));
        let ws = doc.create_text("  \n ");
        doc.append_child(el, ws);
        assert!(!doc.has_content(el));

        let item = doc.create_element(Element::new("a"));
        doc.append_child(el, item);
        assert!(doc.has_content(el));
    }

    #[test]
    fn class_helpers_keep_single_copy() {
        let mut el = Element::new("div").with_attr("class", "menu-node");
        el.add_class("open");
        el.add_class("open");
        assert_eq!(el.attr("class"), Some("menu-node open"));

        el.remove_class("menu-node");
        assert_eq!(el.attr("class"), Some("open"));

        el.toggle_class("open", false);
        assert!(!el.has_attr("class"));
    }
}
