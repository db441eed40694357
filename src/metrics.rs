//! Text-shape metrics for a candidate subtree.
//!
//! A single pass counts tags, paragraphs and headings and measures visible
//! text, link text and commas. The same pass can report every element's
//! subtree totals, which is how all candidates of a document are scored at
//! once.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::extractor::DescentGuard;

/// Aggregate counts for one subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentMetrics {
    /// Number of `p` elements.
    pub paragraph_count: usize,
    /// Number of `h1`..`h6` elements.
    pub heading_count: usize,
    /// Characters of trimmed, non-empty text.
    pub text_length: usize,
    /// Characters of text that sit inside an `a` element.
    pub link_text_length: usize,
    /// Denominator for link density; tracks `text_length`.
    pub total_text_length: usize,
    /// Number of elements, the root included.
    pub tag_count: usize,
    /// Number of `,` and `，` characters.
    pub comma_count: usize,
}

impl ContentMetrics {
    /// Ratio of text to markup, clamped to `[0, 1]`.
    ///
    /// Ten characters per tag count as fully dense. A subtree with text but
    /// no tags is dense; one with neither is not.
    #[must_use]
    pub fn content_density(&self) -> f64 {
        if self.tag_count == 0 {
            return if self.text_length > 0 { 1.0 } else { 0.0 };
        }
        let ratio = self.text_length as f64 / (self.tag_count as f64 * 10.0);
        ratio.clamp(0.0, 1.0)
    }

    /// Fraction of text inside anchors, `0` when there is no text.
    #[must_use]
    pub fn link_density(&self) -> f64 {
        if self.total_text_length == 0 {
            return 0.0;
        }
        (self.link_text_length as f64 / self.total_text_length as f64).clamp(0.0, 1.0)
    }

    fn absorb(&mut self, other: &Self) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.text_length += other.text_length;
        self.link_text_length += other.link_text_length;
        self.total_text_length += other.total_text_length;
        self.tag_count += other.tag_count;
        self.comma_count += other.comma_count;
    }
}

/// Collect metrics for the subtree rooted at the first node of `sel`.
///
/// An empty selection yields all-zero metrics.
///
/// # Example
///
/// ```rust
/// use rs_maintext::dom;
/// use rs_maintext::metrics::collect_metrics;
///
/// let doc = dom::parse(r#"<div><p>One, two</p><p><a href="/">link</a></p></div>"#);
/// let metrics = collect_metrics(&doc.select("div"));
///
/// assert_eq!(metrics.paragraph_count, 2);
/// assert_eq!(metrics.text_length, 12);
/// assert_eq!(metrics.link_text_length, 4);
/// assert_eq!(metrics.comma_count, 1);
/// ```
#[must_use]
pub fn collect_metrics(sel: &Selection) -> ContentMetrics {
    dom::first_node(sel).map_or_else(ContentMetrics::default, |root| collect_node_metrics(&root))
}

/// Collect metrics for the subtree rooted at `root`.
#[must_use]
pub fn collect_node_metrics(root: &NodeRef) -> ContentMetrics {
    fold_metrics(root, &mut DescentGuard::default(), |_, _, _| {}).unwrap_or_default()
}

enum Step<'a> {
    Enter(NodeRef<'a>, bool),
    Exit,
}

/// Measure every element under `root` in one post-order pass.
///
/// `on_element` receives each element once its whole subtree has been
/// measured, together with the element's pre-order position. Child totals
/// are folded into their parent, so the pass is linear in the subtree size.
/// Whether text sits inside a link is carried down the walk, starting from
/// the anchors above `root`.
///
/// Returns `None` as soon as `guard` refuses to continue.
pub fn fold_metrics<'a, F>(
    root: &NodeRef<'a>,
    guard: &mut DescentGuard,
    mut on_element: F,
) -> Option<ContentMetrics>
where
    F: FnMut(&NodeRef<'a>, usize, &ContentMetrics),
{
    let mut stack = vec![Step::Enter(*root, has_anchor_ancestor(root))];
    let mut open: Vec<(NodeRef<'a>, usize, ContentMetrics)> = Vec::new();
    let mut total = ContentMetrics::default();
    let mut entered = 0;

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node, in_link) => {
                if !guard.check() {
                    return None;
                }

                if node.is_text() {
                    let target = match open.last_mut() {
                        Some((_, _, metrics)) => metrics,
                        None => &mut total,
                    };
                    record_text(target, &node, in_link);
                    continue;
                }

                let mut own = ContentMetrics::default();
                let mut in_link = in_link;
                if let Some(tag) = dom::tag_name(&node) {
                    own.tag_count = 1;
                    match tag.as_str() {
                        "p" => own.paragraph_count = 1,
                        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => own.heading_count = 1,
                        "a" => in_link = true,
                        _ => {}
                    }
                }

                open.push((node, entered, own));
                entered += 1;
                stack.push(Step::Exit);
                let mark = stack.len();
                stack.extend(dom::child_nodes(&node).map(|child| Step::Enter(child, in_link)));
                stack[mark..].reverse();
            }
            Step::Exit => {
                let Some((node, position, metrics)) = open.pop() else {
                    continue;
                };
                if node.is_element() {
                    on_element(&node, position, &metrics);
                }
                match open.last_mut() {
                    Some((_, _, parent)) => parent.absorb(&metrics),
                    None => total.absorb(&metrics),
                }
            }
        }
    }

    Some(total)
}

fn record_text(metrics: &mut ContentMetrics, node: &NodeRef, in_link: bool) {
    let raw = node.text();
    let normalized = dom::normalize_spaces(&raw);
    let text = normalized.trim();
    if text.is_empty() {
        return;
    }

    let len = text.chars().count();
    metrics.text_length += len;
    metrics.total_text_length += len;
    metrics.comma_count += text.chars().filter(|c| matches!(c, ',' | '，')).count();

    if in_link {
        metrics.link_text_length += len;
    }
}

/// Whether any element above `node` is an anchor.
fn has_anchor_ancestor(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if dom::has_tag(&ancestor, "a") {
            return true;
        }
        current = ancestor.parent();
    }
    false
}
