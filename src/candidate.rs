//! Main-content candidate selection.

use dom_query::{Document, NodeId, NodeRef};
use tracing::{debug, trace};

use crate::dom;
use crate::extractor::DescentGuard;
use crate::metrics::fold_metrics;
use crate::options::Options;
use crate::scoring::{score_with_metrics, ScoringWeights};

/// Tags that are always scored as candidates.
const CANDIDATE_TAGS: [&str; 5] = ["article", "main", "section", "div", "body"];

/// A scored candidate node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Arena id of the node in its document.
    pub id: NodeId,
    /// Lower-cased tag name.
    pub tag: String,
    /// Content score.
    pub score: i64,
}

impl Candidate {
    /// Resolve the candidate back to its node in `doc`.
    #[must_use]
    pub fn node<'a>(&self, doc: &'a Document) -> Option<NodeRef<'a>> {
        dom::node_by_id(doc, self.id)
    }
}

/// Return the item with the strictly greatest score.
///
/// Ties keep the first item encountered. An empty input yields `None`.
///
/// # Example
///
/// ```rust
/// use rs_maintext::candidate::select_best;
///
/// assert_eq!(select_best([("a", 10), ("b", 30), ("c", 30)]), Some("b"));
/// assert_eq!(select_best(Vec::<(&str, i64)>::new()), None);
/// ```
pub fn select_best<T, I>(items: I) -> Option<T>
where
    I: IntoIterator<Item = (T, i64)>,
{
    let mut best: Option<(T, i64)> = None;
    for (item, score) in items {
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

fn is_candidate(node: &NodeRef, tag: &str) -> bool {
    CANDIDATE_TAGS.contains(&tag)
        || dom::get_attribute_lower(node, "role").is_some_and(|role| role == "main" || role == "article")
}

/// Score every candidate element of `doc`, in document order.
#[must_use]
pub fn collect_candidates(doc: &Document, weights: &ScoringWeights) -> Vec<Candidate> {
    collect_candidates_with_guard(doc, weights, &mut DescentGuard::default())
}

/// Score every candidate element of `doc`, stopping once `guard` refuses.
///
/// All subtrees are measured in a single pass over the document. After an
/// early stop the list is partial and `guard.interruption()` says why.
pub fn collect_candidates_with_guard(
    doc: &Document,
    weights: &ScoringWeights,
    guard: &mut DescentGuard,
) -> Vec<Candidate> {
    let root = dom::root(doc);
    let mut scored = Vec::new();

    fold_metrics(&root, guard, |node, position, metrics| {
        let Some(tag) = dom::tag_name(node) else {
            return;
        };
        if is_candidate(node, &tag) {
            let score = score_with_metrics(node, metrics, weights);
            trace!(tag = %tag, score, "scored candidate");
            scored.push((position, Candidate { id: node.id, tag, score }));
        }
    });

    scored.sort_unstable_by_key(|(position, _)| *position);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Pick the best candidate with a positive score.
#[must_use]
pub fn find_main_content(doc: &Document, options: &Options) -> Option<Candidate> {
    find_main_content_with_guard(doc, options, &mut DescentGuard::default())
}

/// Like [`find_main_content`], but gives up with `None` once `guard` refuses.
pub fn find_main_content_with_guard(
    doc: &Document,
    options: &Options,
    guard: &mut DescentGuard,
) -> Option<Candidate> {
    let candidates = collect_candidates_with_guard(doc, &options.weights, guard);
    if guard.interruption().is_some() {
        debug!(scored = candidates.len(), "candidate scoring interrupted");
        return None;
    }
    let total = candidates.len();

    let best = select_best(
        candidates
            .into_iter()
            .filter(|c| c.score > 0)
            .map(|c| {
                let score = c.score;
                (c, score)
            }),
    );

    match &best {
        Some(c) => debug!(candidates = total, tag = %c.tag, score = c.score, "selected main content"),
        None => debug!(candidates = total, "no candidate scored above zero"),
    }
    best
}
