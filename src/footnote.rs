//! Footnotes
//!
//! Each footnote tag takes the next number from the page counter when it is
//! attached. Once its content exists the tag is replaced by a superscript
//! reference and the content moves into a numbered entry of the shared
//! footnote list.

use crate::config::FootnoteConfig;
use crate::error::{WeaveError, WeaveResult};
use crate::markup::{Document, Element, NodeId};

const CLASS_REF: &str = "footnote-ref";
const CLASS_BACK: &str = "footnote-back";
const BACK_ARROW: &str = "\u{21a9}";

/// Index of a footnote inside its [`FootnoteCollector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FootnoteId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootnoteState {
    /// Waiting for content
    Pending,
    /// Reference and entry rendered
    Placed,
    /// Content was empty; the tag was dropped
    Removed,
    /// A collaborator was missing; the tag stays in place
    Failed,
}

#[derive(Debug, Clone)]
pub struct Footnote {
    number: u32,
    element: NodeId,
    state: FootnoteState,
}

impl Footnote {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn state(&self) -> FootnoteState {
        self.state
    }
}

/// What processing did to a footnote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootnoteOutcome {
    Placed { number: u32 },
    Empty,
    Skipped,
}

/// Owns the page counter and the shared container
#[derive(Debug, Clone, Default)]
pub struct FootnoteCollector {
    notes: Vec<Footnote>,
    counter: u32,
    container: Option<NodeId>,
}

impl FootnoteCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a footnote tag and hand out its number
    pub fn register(&mut self, element: NodeId) -> FootnoteId {
        self.counter += 1;
        let id = FootnoteId(self.notes.len());
        self.notes.push(Footnote {
            number: self.counter,
            element,
            state: FootnoteState::Pending,
        });
        id
    }

    pub fn get(&self, id: FootnoteId) -> Option<&Footnote> {
        self.notes.get(id.0)
    }

    pub fn notes(&self) -> &[Footnote] {
        &self.notes
    }

    pub fn find_by_element(&self, element: NodeId) -> Option<FootnoteId> {
        self.notes
            .iter()
            .position(|n| n.element == element)
            .map(FootnoteId)
    }

    pub fn placed_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|n| n.state == FootnoteState::Placed)
            .count()
    }

    /// Render footnote `id` into `doc`
    pub fn process(
        &mut self,
        doc: &mut Document,
        id: FootnoteId,
        config: &FootnoteConfig,
    ) -> WeaveResult<FootnoteOutcome> {
        let Some(note) = self.notes.get(id.0) else {
            return Ok(FootnoteOutcome::Skipped);
        };
        if note.state != FootnoteState::Pending {
            return Ok(FootnoteOutcome::Skipped);
        }
        let (number, element) = (note.number, note.element);

        let Some(host) = doc.find_first_by_tag(&config.content_host) else {
            self.set_state(id, FootnoteState::Failed);
            return Err(WeaveError::ContentHostNotFound {
                tag: config.content_host.clone(),
            });
        };

        let container = self.ensure_container(doc, host, config);

        if !doc.has_content(element) {
            doc.detach(element);
            self.set_state(id, FootnoteState::Removed);
            return Ok(FootnoteOutcome::Empty);
        }

        let Some(list) = doc
            .descendants(container)
            .into_iter()
            .find(|n| doc.tag_name(*n) == Some("ol"))
        else {
            self.set_state(id, FootnoteState::Failed);
            return Err(WeaveError::FootnoteListNotFound {
                container: config.container_id.clone(),
            });
        };

        let entry = build_entry(doc, element, number);
        doc.append_child(list, entry);
        place_container(doc, container, host, config);

        let reference = build_reference(doc, number);
        doc.replace(element, reference);

        self.set_state(id, FootnoteState::Placed);
        Ok(FootnoteOutcome::Placed { number })
    }

    fn set_state(&mut self, id: FootnoteId, state: FootnoteState) {
        if let Some(note) = self.notes.get_mut(id.0) {
            note.state = state;
        }
    }

    /// Reuse the container on the page, or create `<div id=..><ol></ol></div>`
    /// at the end of the host.
    fn ensure_container(
        &mut self,
        doc: &mut Document,
        host: NodeId,
        config: &FootnoteConfig,
    ) -> NodeId {
        if let Some(existing) = doc.find_by_id(&config.container_id) {
            self.container = Some(existing);
            return existing;
        }
        if let Some(known) = self.container.filter(|c| doc.is_attached(*c)) {
            return known;
        }

        let container = doc.create_element(
            Element::new("div").with_attr("id", config.container_id.as_str()),
        );
        let list = doc.create_element(Element::new("ol"));
        doc.append_child(container, list);
        doc.append_child(host, container);
        self.container = Some(container);
        container
    }
}

/// `<li id="footnote-N"><p>CONTENT<a class="footnote-back" ...>↩</a></p></li>`
fn build_entry(doc: &mut Document, element: NodeId, number: u32) -> NodeId {
    let li = doc.create_element(
        Element::new("li").with_attr("id", format!("footnote-{number}")),
    );
    let p = doc.create_element(Element::new("p"));

    for child in doc.take_children(element) {
        doc.append_child(p, child);
    }
    trim_edges(doc, p);

    let back = doc.create_element(
        Element::new("a")
            .with_attr("class", CLASS_BACK)
            .with_attr("href", format!("#footnote-ref-{number}")),
    );
    let arrow = doc.create_text(BACK_ARROW);
    doc.append_child(back, arrow);

    doc.append_child(p, back);
    doc.append_child(li, p);
    li
}

/// `<sup><a class="footnote-ref" href="#footnote-N" id="footnote-ref-N">N</a></sup>`
fn build_reference(doc: &mut Document, number: u32) -> NodeId {
    let sup = doc.create_element(Element::new("sup"));
    let link = doc.create_element(
        Element::new("a")
            .with_attr("class", CLASS_REF)
            .with_attr("href", format!("#footnote-{number}"))
            .with_attr("id", format!("footnote-ref-{number}")),
    );
    let text = doc.create_text(number.to_string());
    doc.append_child(link, text);
    doc.append_child(sup, link);
    sup
}

/// Keep the container right before the date marker, or last in the host
fn place_container(doc: &mut Document, container: NodeId, host: NodeId, config: &FootnoteConfig) {
    let marker = doc
        .find_by_id(&config.date_marker_id)
        .filter(|m| *m != container && !doc.ancestors(*m).any(|a| a == container));

    match marker {
        Some(marker) => doc.insert_before(marker, container),
        None => doc.append_child(host, container),
    }
}

/// Trim leading whitespace of the first text child and trailing whitespace of
/// the last one
fn trim_edges(doc: &mut Document, parent: NodeId) {
    let children = doc.children(parent).to_vec();

    if let Some(first) = children.first() {
        if let Some(text) = doc.text(*first).map(|t| t.trim_start().to_string()) {
            doc.set_text(*first, text);
        }
    }
    if let Some(last) = children.last() {
        if let Some(text) = doc.text(*last).map(|t| t.trim_end().to_string()) {
            doc.set_text(*last, text);
        }
    }
}
