//! Word-boundary pattern matching for class, id and style attributes.
//!
//! Patterns are plain lowercase tokens rather than regexes: a pattern
//! matches only where it is not glued to neighbouring word characters.
//! Case folding is the caller's job.

/// Which characters count as token boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Anything that is not ASCII alphanumeric separates tokens, so `-` and
    /// `_` split compound class names like `main-article`.
    Standard,
    /// CSS declaration boundaries: whitespace, `:`, `;`, quotes, braces and
    /// commas. Hyphens stay inside tokens, so `width` does not match
    /// `max-width`.
    Css,
}

impl BoundaryMode {
    #[inline]
    fn is_boundary(self, c: char) -> bool {
        match self {
            Self::Standard => !c.is_ascii_alphanumeric(),
            Self::Css => {
                c.is_whitespace() || matches!(c, ':' | ';' | '"' | '\'' | '{' | '}' | ',')
            }
        }
    }
}

/// Check whether `pattern` occurs in `haystack` as a whole token.
///
/// # Examples
///
/// ```
/// use rs_maintext::patterns::{matches_word, BoundaryMode};
///
/// assert!(matches_word("article-content", "article", BoundaryMode::Standard));
/// assert!(!matches_word("article123", "article", BoundaryMode::Standard));
/// assert!(matches_word("text-align:center", "text-align", BoundaryMode::Css));
/// assert!(!matches_word("max-width:10px", "width", BoundaryMode::Css));
/// ```
#[must_use]
pub fn matches_word(haystack: &str, pattern: &str, mode: BoundaryMode) -> bool {
    if haystack.is_empty() || pattern.is_empty() {
        return false;
    }

    haystack.match_indices(pattern).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| mode.is_boundary(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| mode.is_boundary(c));
        before_ok && after_ok
    })
}

/// Check whether any of `patterns` matches `haystack` as a whole token.
#[must_use]
pub fn matches_any(haystack: &str, patterns: &[&str], mode: BoundaryMode) -> bool {
    patterns.iter().any(|p| matches_word(haystack, p, mode))
}

/// Count how many of `patterns` match `haystack` as whole tokens.
#[must_use]
pub fn count_matches(haystack: &str, patterns: &[&str], mode: BoundaryMode) -> usize {
    patterns
        .iter()
        .filter(|p| matches_word(haystack, p, mode))
        .count()
}

/// Value of a declaration in an inline `style` attribute.
///
/// `style` must already be lower-cased. Returns the trimmed value of the
/// last declaration whose property name is exactly `property`.
#[must_use]
pub fn css_declaration<'s>(style: &'s str, property: &str) -> Option<&'s str> {
    if !matches_word(style, property, BoundaryMode::Css) {
        return None;
    }

    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim() == property)
        .map(|(_, value)| value.trim())
        .last()
}

// =============================================================================
// Class / id pattern sets
// =============================================================================

/// Tokens that almost always name the main content container.
pub const STRONG_POSITIVE: &[&str] = &[
    "article",
    "content",
    "main-content",
    "article-body",
    "article-content",
    "post-content",
    "post-body",
    "entry-content",
    "story-body",
    "story-content",
];

/// Tokens that often name a content container.
pub const MEDIUM_POSITIVE: &[&str] = &[
    "main", "post", "entry", "story", "text", "body", "blog", "prose", "hentry", "page",
];

/// Tokens that almost always name boilerplate.
pub const STRONG_NEGATIVE: &[&str] = &[
    "sidebar",
    "comment",
    "comments",
    "ad",
    "ads",
    "advert",
    "advertisement",
    "sponsor",
    "sponsored",
    "promo",
    "banner",
    "footer",
    "nav",
    "navbar",
    "navigation",
    "menu",
];

/// Tokens that usually name secondary page furniture.
pub const MEDIUM_NEGATIVE: &[&str] = &[
    "share",
    "sharing",
    "social",
    "related",
    "recommended",
    "widget",
    "popup",
    "modal",
    "cookie",
    "newsletter",
    "subscribe",
    "breadcrumb",
    "breadcrumbs",
    "pagination",
    "header",
    "masthead",
];

/// Tokens that mildly suggest metadata rather than prose.
pub const WEAK_NEGATIVE: &[&str] = &[
    "meta", "byline", "author", "tags", "date", "caption", "credit", "hidden", "print", "toolbar",
];
