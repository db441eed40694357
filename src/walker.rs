//! Pre-order DOM traversal with early stopping.
//!
//! The walker uses an explicit stack, so arbitrarily deep documents cannot
//! exhaust the call stack.

use dom_query::NodeRef;

use crate::dom;

/// Visitor decision for the node just visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Do not descend into this node's children; continue with its siblings.
    SkipChildren,
    /// Abort the whole traversal.
    Stop,
}

/// Visit `root` and its descendants in document (pre-)order.
///
/// Returns `true` if the visitor stopped the traversal early.
///
/// # Example
///
/// ```rust
/// use rs_maintext::dom;
/// use rs_maintext::walker::{walk, Walk};
///
/// let doc = dom::parse("<div><p>a</p><p>b</p></div>");
/// let div = dom::first_node(&doc.select("div")).unwrap();
///
/// let mut tags = Vec::new();
/// walk(&div, |node| {
///     if let Some(tag) = dom::tag_name(node) {
///         tags.push(tag);
///     }
///     Walk::Continue
/// });
/// assert_eq!(tags, ["div", "p", "p"]);
/// ```
pub fn walk<'a, F>(root: &NodeRef<'a>, mut visit: F) -> bool
where
    F: FnMut(&NodeRef<'a>) -> Walk,
{
    let mut stack: Vec<NodeRef<'a>> = vec![*root];

    while let Some(node) = stack.pop() {
        match visit(&node) {
            Walk::Stop => return true,
            Walk::SkipChildren => {}
            Walk::Continue => {
                let mark = stack.len();
                stack.extend(dom::child_nodes(&node));
                stack[mark..].reverse();
            }
        }
    }

    false
}

/// Find the first node (pre-order) matching `predicate`.
pub fn find_first<'a, P>(root: &NodeRef<'a>, mut predicate: P) -> Option<NodeRef<'a>>
where
    P: FnMut(&NodeRef<'a>) -> bool,
{
    let mut found = None;
    walk(root, |node| {
        if predicate(node) {
            found = Some(*node);
            Walk::Stop
        } else {
            Walk::Continue
        }
    });
    found
}
