//! Error types for rs-maintext.
//!
//! The scoring and serialization core never fails; these variants are the
//! limits the extraction pipeline enforces around it.

use std::time::Duration;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input exceeded `Options::max_input_size` and was not parsed.
    #[error("Input too large: {size} bytes (limit {limit})")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The document nests deeper than `Options::max_depth`.
    #[error("Maximum tree depth exceeded (limit {limit})")]
    MaxDepthExceeded {
        /// Configured depth limit.
        limit: usize,
    },

    /// Extraction ran past its deadline or was cancelled.
    #[error("Processing timed out (limit {limit:?})")]
    Timeout {
        /// Configured time budget, if one was set.
        limit: Option<Duration>,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
