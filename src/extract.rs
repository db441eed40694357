//! Core extraction pipeline.
//!
//! size check → parse → pick the main-content candidate → serialize it →
//! optional whitespace normalization. One guard spans scoring and
//! serialization, so the timeout and cancel flag cover the whole call.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use dom_query::{Document, NodeRef};
use tracing::{debug, warn};

use crate::candidate::find_main_content_with_guard;
use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::{DescentGuard, ImageCounter, Interruption, StructuredExtractor, TextBuffer};
use crate::metrics::fold_metrics;
use crate::normalize::normalize_whitespace;
use crate::options::Options;
use crate::result::ExtractResult;
use crate::scoring::score_with_metrics;

/// Run the pipeline, optionally watching a cancellation flag.
pub(crate) fn extract_content(
    html: &str,
    options: &Options,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<ExtractResult> {
    if html.len() > options.max_input_size {
        warn!(size = html.len(), limit = options.max_input_size, "input rejected");
        return Err(Error::InputTooLarge {
            size: html.len(),
            limit: options.max_input_size,
        });
    }
    debug!(bytes = html.len(), "starting content extraction");

    let mut guard = DescentGuard::new(options.max_depth).with_timeout(options.timeout);
    if let Some(flag) = cancel {
        guard = guard.with_cancel_flag(flag);
    }

    let document = dom::parse(html);
    let mut warnings = Vec::new();

    let (root, content_tag, score) = select_root(&document, options, &mut guard, &mut warnings);
    if let Some(interruption) = guard.interruption() {
        warn!(?interruption, "candidate scoring interrupted");
        return Err(interruption_error(interruption, options));
    }
    let Some(root) = root else {
        warnings.push("Document has no element to extract from".to_string());
        return Ok(ExtractResult {
            table_format: options.table_format,
            warnings,
            ..ExtractResult::default()
        });
    };

    let mut images = ImageCounter::new();
    let mut buf = TextBuffer::new();
    let interruption = {
        let mut extractor = StructuredExtractor::new(options.table_format).with_guard(guard);
        if options.include_images {
            extractor = extractor.with_images(&mut images);
        }
        extractor.extract_node(&root, &mut buf, 0);
        extractor.interruption()
    };

    if let Some(interruption) = interruption {
        warn!(?interruption, "extraction interrupted");
        return Err(interruption_error(interruption, options));
    }

    let content_text = if options.normalize_whitespace {
        normalize_whitespace(buf.as_str())
    } else {
        buf.into_string()
    };
    debug!(chars = content_text.len(), images = images.count(), "extraction complete");

    Ok(ExtractResult {
        content_text,
        content_tag,
        score,
        image_count: images.count(),
        table_format: options.table_format,
        warnings,
    })
}

fn interruption_error(interruption: Interruption, options: &Options) -> Error {
    match interruption {
        Interruption::DepthExceeded { limit } => Error::MaxDepthExceeded { limit },
        Interruption::TimedOut | Interruption::Cancelled => Error::Timeout { limit: options.timeout },
    }
}

/// Best candidate, or `body` / `html` when nothing scores above zero.
///
/// Returns no node when `guard` trips while scoring.
fn select_root<'a>(
    document: &'a Document,
    options: &Options,
    guard: &mut DescentGuard,
    warnings: &mut Vec<String>,
) -> (Option<NodeRef<'a>>, String, i64) {
    if let Some(best) = find_main_content_with_guard(document, options, guard) {
        if let Some(node) = best.node(document) {
            return (Some(node), best.tag, best.score);
        }
    }
    if guard.interruption().is_some() {
        return (None, String::new(), 0);
    }

    for tag in ["body", "html"] {
        if let Some(node) = dom::first_node(&document.select(tag)) {
            warn!(fallback = tag, "no candidate scored above zero");
            warnings.push(format!("No content candidate scored above zero; using <{tag}>"));
            let Some(metrics) = fold_metrics(&node, guard, |_, _, _| {}) else {
                return (None, String::new(), 0);
            };
            let score = score_with_metrics(&node, &metrics, &options.weights);
            return (Some(node), tag.to_string(), score);
        }
    }

    (None, String::new(), 0)
}
