//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` nodes. Everything in this crate reads the
//! tree through these functions, so the tree itself stays read-only.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// First node of a selection, the crate's notion of a possibly-nil node.
#[inline]
#[must_use]
pub fn first_node<'a>(sel: &Selection<'a>) -> Option<NodeRef<'a>> {
    sel.nodes().first().copied()
}

/// Document root node (the node above `<html>`).
#[inline]
#[must_use]
pub fn root(doc: &Document) -> NodeRef<'_> {
    doc.root()
}

/// Resolve a node id back to its node.
#[inline]
#[must_use]
pub fn node_by_id(doc: &Document, id: NodeId) -> Option<NodeRef<'_>> {
    doc.tree.get(&id)
}

// === Tag/Node Information ===

/// Get tag name (lowercase) of an element node.
///
/// Returns `None` for text, comment and document nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether an element has the given (lowercase) tag name.
#[inline]
#[must_use]
pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Check whether an element is `h1`..`h6`.
#[must_use]
pub fn is_heading(node: &NodeRef) -> bool {
    node.is_element()
        && node.node_name().is_some_and(|name| {
            let bytes = name.as_bytes();
            bytes.len() == 2
                && bytes[0].eq_ignore_ascii_case(&b'h')
                && (b'1'..=b'6').contains(&bytes[1])
        })
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get an attribute value trimmed and lower-cased.
#[must_use]
pub fn get_attribute_lower(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.trim().to_ascii_lowercase())
}

/// Get all attributes as key-value pairs, in document order.
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

// === Tree Navigation ===

/// Iterate over all direct child nodes (elements, text, comments).
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    std::iter::successors(node.first_child(), NodeRef::next_sibling)
}

/// Iterate over direct element children only.
pub fn element_children<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    child_nodes(node).filter(NodeRef::is_element)
}

/// Check whether a node has at least one element child.
#[must_use]
pub fn has_element_children(node: &NodeRef) -> bool {
    element_children(node).next().is_some()
}

/// Check whether any node follows this one among its siblings.
#[inline]
#[must_use]
pub fn has_next_sibling(node: &NodeRef) -> bool {
    node.next_sibling().is_some()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Replace non-breaking-space variants with a regular space.
#[must_use]
pub fn normalize_spaces(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect()
}
