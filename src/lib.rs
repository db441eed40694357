//! # rs-maintext
//!
//! Main-content extraction for messy HTML.
//!
//! The library scores candidate subtrees of a document by tag, by class/id
//! hints and by the shape of their text, picks the best one, and serializes
//! it as paragraph-structured text with markdown or HTML tables and numbered
//! image placeholders.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_maintext::extract;
//!
//! let html = r#"<html><body>
//!   <nav><a href="/">Home</a></nav>
//!   <article><h1>Title</h1><p>First, second, and third thoughts.</p><p>More.</p><p>End.</p></article>
//! </body></html>"#;
//!
//! let result = extract(html)?;
//! assert_eq!(result.content_tag, "article");
//! assert!(result.content_text.starts_with("Title\nFirst"));
//! # Ok::<(), rs_maintext::Error>(())
//! ```
//!
//! ## Building blocks
//!
//! - [`scoring::score`]: integer relevance score of one subtree
//! - [`metrics::collect_metrics`]: text-shape metrics behind the score
//! - [`candidate::select_best`]: strict-maximum selection with first-wins ties
//! - [`extractor::extract_text`]: the structured serializer
//! - [`extractor::table::serialize_table`]: markdown / HTML table grids
//! - [`patterns::matches_word`]: word-boundary pattern matching

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Iterative pre-order traversal.
pub mod walker;

/// Word-boundary pattern matching and the class/id pattern sets.
pub mod patterns;

/// Text-shape metrics for scoring.
pub mod metrics;

/// Content scoring.
pub mod scoring;

/// Candidate collection and selection.
pub mod candidate;

/// Structured text extraction (tags, buffer, tables, serializer).
pub mod extractor;

/// Markdown table emission.
pub mod markdown;

/// Whitespace post-processing.
pub mod normalize;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, TableFormat, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE};
pub use result::ExtractResult;
pub use scoring::ScoringWeights;

/// Extracts main content from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_maintext::extract;
///
/// let html = "<html><body><article><p>Content</p></article></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.content_text);
/// # Ok::<(), rs_maintext::Error>(())
/// ```
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_maintext::{extract_with_options, Options, TableFormat};
///
/// let html = "<article><table><tr><th>A</th></tr><tr><td>1</td></tr></table></article>";
/// let options = Options {
///     table_format: TableFormat::Html,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// assert!(result.content_text.contains("<th>A</th>"));
/// # Ok::<(), rs_maintext::Error>(())
/// ```
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    extract::extract_content(html, options, None)
}

/// Like [`extract_with_options`], but stops with [`Error::Timeout`] once
/// `cancel` is set from another thread.
pub fn extract_with_cancel(html: &str, options: &Options, cancel: Arc<AtomicBool>) -> Result<ExtractResult> {
    extract::extract_content(html, options, Some(cancel))
}
