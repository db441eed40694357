//! Tag catalogs and block/inline classification.
//!
//! Provides both arrays (for iteration) and `HashSets` (for O(1) lookup).

use std::collections::HashSet;
use std::sync::LazyLock;

use dom_query::NodeRef;

use crate::dom;

// === Tag Lists (arrays for iteration) ===

/// Tags whose subtrees never contribute content and are never candidates.
pub static NON_CONTENT_TAGS: [&str; 8] = [
    "script", "style", "noscript", "nav", "aside", "footer", "header", "form",
];

/// Tags an upstream sanitizer strips as dangerous.
///
/// Kept next to `NON_CONTENT_TAGS` because both layers share this vocabulary.
pub static SANITIZER_STRIP_TAGS: [&str; 8] = [
    "script", "style", "iframe", "object", "embed", "form", "input", "button",
];

/// Elements that force line breaks around their content.
pub static BLOCK_TAGS: [&str; 50] = [
    "p", "div", "pre", "blockquote",
    "h1", "h2", "h3", "h4", "h5", "h6",
    "article", "section", "main", "nav", "aside", "header", "footer",
    "figure", "figcaption",
    "ul", "ol", "li", "dl", "dt", "dd",
    "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption", "colgroup",
    "form", "fieldset", "legend",
    "details", "summary", "dialog",
    "hr", "address", "body", "html", "head",
    "center", "canvas", "menu", "hgroup", "search",
];

/// Elements that flow with surrounding text.
pub static INLINE_TAGS: [&str; 52] = [
    // formatting
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "cite", "code", "data", "del", "dfn",
    "em", "font", "i", "ins", "kbd", "mark", "q", "s", "samp", "small", "span", "strike",
    "strong", "sub", "sup", "time", "tt", "u", "var", "wbr", "br",
    // media and embeds
    "img", "picture", "video", "audio", "source", "track", "iframe", "embed", "object", "svg",
    // form controls
    "input", "button", "label", "select", "option", "textarea",
    // metadata
    "meta", "link", "title",
];

/// Namespace prefixes whose elements are always inline (XBRL and friends).
pub static INLINE_NAMESPACE_PREFIXES: [&str; 6] = ["ix", "xbrl", "dei", "us-gaap", "ifrs", "link"];

/// Unknown tags with less trimmed text than this are treated as inline.
pub const SHORT_TEXT_LIMIT: usize = 50;

// === Tag Sets (HashSets for O(1) lookup) ===

/// `NON_CONTENT_TAGS` as a `HashSet`
pub static NON_CONTENT_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NON_CONTENT_TAGS.into_iter().collect());

/// `BLOCK_TAGS` as a `HashSet`
pub static BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_TAGS.into_iter().collect());

/// `INLINE_TAGS` as a `HashSet`
pub static INLINE_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INLINE_TAGS.into_iter().collect());

// === Helper Functions ===

/// Check if tag is excluded from content and candidacy
#[inline]
#[must_use]
pub fn is_non_content_tag(tag: &str) -> bool {
    NON_CONTENT_TAG_SET.contains(tag)
}

/// Check if tag is on the block allow-list
#[inline]
#[must_use]
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAG_SET.contains(tag)
}

/// Check if tag is on the inline allow-list
#[inline]
#[must_use]
pub fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAG_SET.contains(tag)
}

/// Namespace prefix of a tag like `ix:nonnumeric`, if any.
#[inline]
#[must_use]
pub fn namespace_prefix(tag: &str) -> Option<&str> {
    tag.split_once(':').map(|(prefix, _)| prefix)
}

/// Layout role of an element in the serialized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Separated from neighbours by line breaks.
    Block,
    /// Flows with neighbouring text.
    Inline,
}

/// Classify an element as block or inline.
///
/// Allow-listed tags are answered directly. Anything else, including every
/// namespace-prefixed tag, falls back to a heuristic: inline when the
/// prefix is a known inline namespace, or when the element is a short leaf;
/// block otherwise.
#[must_use]
pub fn classify(node: &NodeRef, tag: &str) -> Display {
    if !tag.contains(':') {
        if is_block_tag(tag) {
            return Display::Block;
        }
        if is_inline_tag(tag) {
            return Display::Inline;
        }
    }

    if namespace_prefix(tag).is_some_and(|prefix| INLINE_NAMESPACE_PREFIXES.contains(&prefix)) {
        return Display::Inline;
    }

    if !dom::has_element_children(node) && is_short_text(node) {
        Display::Inline
    } else {
        Display::Block
    }
}

fn is_short_text(node: &NodeRef) -> bool {
    let text = dom::text_content(node);
    text.trim().chars().count() < SHORT_TEXT_LIMIT
}
