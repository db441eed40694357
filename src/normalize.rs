//! Whitespace post-processing for extracted text.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static TRAILING_WS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)[ \t]+$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static INLINE_WS_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]{2,}").expect("valid regex")
});

#[allow(clippy::expect_used)]
static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("valid regex")
});

/// Collapse redundant whitespace.
///
/// Trailing spaces and tabs are removed from every line, remaining runs of
/// spaces and tabs become one space, three or more newlines become one blank
/// line, and the ends are trimmed.
///
/// # Example
///
/// ```rust
/// use rs_maintext::normalize::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a \t b  \n\n\n\nc\n"), "a b\n\nc");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let text = TRAILING_WS.replace_all(text, "");
    let text = INLINE_WS_RUN.replace_all(&text, " ");
    let text = BLANK_LINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}
