//! Result type for extraction output.

use serde::Serialize;

use crate::options::TableFormat;

/// Result of content extraction from an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    /// Main content as structured text.
    pub content_text: String,

    /// Tag of the node the text was taken from (`article`, `div`, ...).
    pub content_tag: String,

    /// Score of that node.
    pub score: i64,

    /// Number of `[IMAGE:n]` placeholders emitted.
    pub image_count: usize,

    /// Table rendering used in `content_text`.
    pub table_format: TableFormat,

    /// Warnings encountered during extraction.
    ///
    /// Non-fatal issues such as falling back to `<body>` because no
    /// candidate scored above zero.
    pub warnings: Vec<String>,
}

impl ExtractResult {
    /// Whether any text was extracted.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content_text.trim().is_empty()
    }
}
