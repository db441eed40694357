//! Configuration options for content extraction.
//!
//! The `Options` struct controls table rendering, image placeholders,
//! resource limits and the scoring constants.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringWeights;

/// Default nesting limit for the serializer.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default input size limit in bytes.
pub const DEFAULT_MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Output format for tables.
///
/// Parsing is lenient: any unrecognized value becomes `Markdown`.
///
/// ```rust
/// use rs_maintext::TableFormat;
///
/// assert_eq!(TableFormat::from("html"), TableFormat::Html);
/// assert_eq!(TableFormat::from("csv"), TableFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableFormat {
    /// GitHub Flavored Markdown pipe tables.
    #[default]
    Markdown,
    /// Literal `<table>` markup.
    Html,
}

impl TableFormat {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }
}

impl From<&str> for TableFormat {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("html") {
            Self::Html
        } else {
            Self::Markdown
        }
    }
}

impl From<String> for TableFormat {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<TableFormat> for String {
    fn from(value: TableFormat) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for TableFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_maintext::{Options, TableFormat};
///
/// let options = Options {
///     table_format: TableFormat::Html,
///     include_images: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// How tables are rendered in the output text.
    ///
    /// Default: `TableFormat::Markdown`
    pub table_format: TableFormat,

    /// Emit numbered `[IMAGE:n]` placeholders for `<img>` elements.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Maximum element nesting depth the serializer descends into.
    ///
    /// Deeper documents fail with `Error::MaxDepthExceeded` instead of
    /// risking stack exhaustion.
    ///
    /// Default: `256`
    pub max_depth: usize,

    /// Maximum input size in bytes.
    ///
    /// Default: `10 MiB`
    pub max_input_size: usize,

    /// Wall-clock budget for a single extraction.
    ///
    /// Default: `None` (unbounded)
    pub timeout: Option<Duration>,

    /// Collapse redundant whitespace and blank lines in the final text.
    ///
    /// Default: `true`
    pub normalize_whitespace: bool,

    /// Scoring constants used to rank content candidates.
    pub weights: ScoringWeights,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            table_format: TableFormat::Markdown,
            include_images: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            timeout: None,
            normalize_whitespace: true,
            weights: ScoringWeights::default(),
        }
    }
}
