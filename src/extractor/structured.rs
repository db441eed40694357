//! Recursive tree-to-text serializer.
//!
//! Walks a content subtree and writes paragraph-structured text: block
//! elements are separated by line breaks, inline elements by single spaces,
//! tables are handed to the table serializer and images become numbered
//! `[IMAGE:n]` placeholders.
//!
//! Descent is bounded by a [`DescentGuard`]. When the guard refuses, the
//! subtree is skipped and the interruption is kept for the caller to read;
//! the serializer itself never fails.

use dom_query::{NodeRef, Selection};

use super::buffer::TextBuffer;
use super::state::{DescentGuard, ImageCounter, Interruption};
use super::table::serialize_table_node;
use super::tags::{classify, is_non_content_tag, Display};
use crate::dom;
use crate::options::TableFormat;

/// Serializer state for one extraction call.
pub struct StructuredExtractor<'c> {
    format: TableFormat,
    images: Option<&'c mut ImageCounter>,
    guard: DescentGuard,
}

impl<'c> StructuredExtractor<'c> {
    /// Serializer with the default depth limit and no image counter.
    #[must_use]
    pub fn new(format: TableFormat) -> Self {
        Self {
            format,
            images: None,
            guard: DescentGuard::default(),
        }
    }

    /// Number images with `counter`. Without one, images are dropped.
    #[must_use]
    pub fn with_images(mut self, counter: &'c mut ImageCounter) -> Self {
        self.images = Some(counter);
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: DescentGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Why descent stopped early, if it did.
    #[must_use]
    pub fn interruption(&self) -> Option<Interruption> {
        self.guard.interruption()
    }

    /// Serialize the first node of `sel` into `buf`.
    pub fn extract(&mut self, sel: &Selection, buf: &mut TextBuffer) {
        if let Some(node) = dom::first_node(sel) {
            self.extract_node(&node, buf, 0);
        }
    }

    /// Serialize `node` at nesting `depth` into `buf`.
    pub fn extract_node(&mut self, node: &NodeRef, buf: &mut TextBuffer, depth: usize) {
        if !self.guard.allow(depth) {
            return;
        }

        if node.is_text() {
            let text = node.text();
            let text = text.trim();
            if !text.is_empty() {
                buf.ensure_spacing();
                buf.push_str(text);
            }
            return;
        }

        let Some(tag) = dom::tag_name(node) else {
            // comments, doctypes
            return;
        };
        if is_non_content_tag(&tag) {
            return;
        }

        match tag.as_str() {
            "img" => self.emit_image(buf),
            "table" => {
                buf.ensure_newline();
                buf.push_str(&serialize_table_node(node, self.format));
                buf.ensure_newline();
            }
            _ => self.extract_element(node, &tag, buf, depth),
        }
    }

    fn emit_image(&mut self, buf: &mut TextBuffer) {
        if let Some(counter) = self.images.as_deref_mut() {
            let number = counter.next_number();
            buf.ensure_newline();
            buf.push_str(&format!("[IMAGE:{number}]\n"));
        }
    }

    fn extract_element(&mut self, node: &NodeRef, tag: &str, buf: &mut TextBuffer, depth: usize) {
        let display = classify(node, tag);

        if display == Display::Block && !buf.is_empty() {
            buf.ensure_newline();
        }
        let start = buf.len();

        for child in dom::child_nodes(node) {
            self.extract_node(&child, buf, depth + 1);
        }

        if buf.len() == start {
            return;
        }
        match display {
            Display::Block => buf.ensure_newline(),
            Display::Inline if depth > 0 && dom::has_next_sibling(node) => buf.ensure_spacing(),
            Display::Inline => {}
        }
    }
}

/// Serialize the first node of `sel` with the default depth limit.
///
/// Pass an [`ImageCounter`] to number images; its count continues across
/// calls that share it.
///
/// # Example
///
/// ```rust
/// use rs_maintext::dom;
/// use rs_maintext::extractor::{extract_text, ImageCounter};
/// use rs_maintext::TableFormat;
///
/// let doc = dom::parse("<div><p>Hello <b>world</b></p><img src='a.png'></div>");
/// let mut images = ImageCounter::new();
/// let text = extract_text(&doc.select("div"), TableFormat::Markdown, Some(&mut images));
///
/// assert_eq!(text, "Hello world\n[IMAGE:1]\n");
/// assert_eq!(images.count(), 1);
/// ```
#[must_use]
pub fn extract_text(sel: &Selection, format: TableFormat, images: Option<&mut ImageCounter>) -> String {
    let mut buf = TextBuffer::new();
    let mut extractor = StructuredExtractor::new(format);
    if let Some(counter) = images {
        extractor = extractor.with_images(counter);
    }
    extractor.extract(sel, &mut buf);
    buf.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(html: &str, selector: &str) -> String {
        let doc = dom::parse(html);
        extract_text(&doc.select(selector), TableFormat::Markdown, None)
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        assert_eq!(text_of("<div>x</div>", "article"), "");
    }

    #[test]
    fn test_paragraphs_are_separated_by_newlines() {
        assert_eq!(text_of("<div><p>One</p><p>Two</p></div>", "div"), "One\nTwo\n");
    }

    #[test]
    fn test_inline_elements_are_spaced() {
        assert_eq!(
            text_of("<p>Hello<b>big</b><i>world</i>!</p>", "p"),
            "Hello big world !\n"
        );
    }

    #[test]
    fn test_non_content_subtrees_are_skipped() {
        let html = "<div><p>Keep</p><script>drop()</script><nav>Menu</nav><style>p{}</style></div>";
        assert_eq!(text_of(html, "div"), "Keep\n");
    }

    #[test]
    fn test_headings_and_lists() {
        let html = "<article><h1>Title</h1><ul><li>a</li><li>b</li></ul></article>";
        assert_eq!(text_of(html, "article"), "Title\na\nb\n");
    }

    #[test]
    fn test_images_without_counter_are_dropped() {
        assert_eq!(text_of("<div><p>a</p><img src='x'><p>b</p></div>", "div"), "a\nb\n");
    }

    #[test]
    fn test_images_are_numbered_across_calls() {
        let doc = dom::parse("<div id='a'><img><img></div><div id='b'><img></div>");
        let mut counter = ImageCounter::new();

        let first = extract_text(&doc.select("#a"), TableFormat::Markdown, Some(&mut counter));
        let second = extract_text(&doc.select("#b"), TableFormat::Markdown, Some(&mut counter));

        assert_eq!(first, "[IMAGE:1]\n[IMAGE:2]\n");
        assert_eq!(second, "[IMAGE:3]\n");
    }

    #[test]
    fn test_table_is_delegated() {
        let html = "<div><p>Before</p><table><tr><td>A</td></tr></table><p>After</p></div>";
        assert_eq!(text_of(html, "div"), "Before\n| A |\n| --- |\nAfter\n");
    }

    #[test]
    fn test_table_in_html_format() {
        let doc = dom::parse("<div><table><tr><td>A</td></tr></table></div>");
        let text = extract_text(&doc.select("div"), TableFormat::Html, None);
        assert_eq!(text, "<table>\n<tr>\n<td>A</td>\n</tr>\n</table>\n");
    }

    #[test]
    fn test_depth_guard_fails_closed() {
        let html = format!("{}deep{}", "<div>".repeat(20), "</div>".repeat(20));
        let doc = dom::parse(&html);
        let mut buf = TextBuffer::new();
        let mut extractor = StructuredExtractor::new(TableFormat::Markdown).with_guard(DescentGuard::new(5));

        extractor.extract(&doc.select("body"), &mut buf);

        assert!(buf.is_empty());
        assert_eq!(extractor.interruption(), Some(Interruption::DepthExceeded { limit: 5 }));
    }

    #[test]
    fn test_shallow_document_is_not_interrupted() {
        let doc = dom::parse("<div><p>ok</p></div>");
        let mut buf = TextBuffer::new();
        let mut extractor = StructuredExtractor::new(TableFormat::Markdown);
        extractor.extract(&doc.select("div"), &mut buf);
        assert_eq!(buf.as_str(), "ok\n");
        assert!(extractor.interruption().is_none());
    }
}
