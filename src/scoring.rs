//! Content scoring for main-content candidates.
//!
//! A candidate's score combines a tag prior, class/id/role hints and the
//! text-shape metrics of its subtree. Scores are signed; higher means more
//! likely to be the page's main content.

use dom_query::{NodeRef, Selection};
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::extractor::tags::is_non_content_tag;
use crate::metrics::{collect_node_metrics, ContentMetrics};
use crate::patterns::{
    count_matches, BoundaryMode, MEDIUM_NEGATIVE, MEDIUM_POSITIVE, STRONG_NEGATIVE,
    STRONG_POSITIVE, WEAK_NEGATIVE,
};

/// Prior score for a candidate's own tag.
#[must_use]
pub fn tag_prior(tag: &str) -> i64 {
    match tag {
        "article" => 1000,
        "main" => 900,
        "section" => 300,
        "body" => 100,
        "div" => 50,
        _ => 0,
    }
}

/// Tunable scoring constants.
///
/// The defaults are empirically tuned; change them from measurements, not
/// by reasoning about individual pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight per match in `STRONG_POSITIVE`.
    pub strong_positive: i64,
    /// Weight per match in `MEDIUM_POSITIVE`.
    pub medium_positive: i64,
    /// Weight per match in `STRONG_NEGATIVE`.
    pub strong_negative: i64,
    /// Weight per match in `MEDIUM_NEGATIVE`.
    pub medium_negative: i64,
    /// Weight per match in `WEAK_NEGATIVE`.
    pub weak_negative: i64,
    /// `role="main"` or `role="article"`.
    pub role_content: i64,
    /// `role="navigation"` or `role="complementary"`.
    pub role_boilerplate: i64,

    /// Paragraph count at which the larger per-paragraph bonus applies.
    pub many_paragraphs: usize,
    /// Per-paragraph bonus at or above `many_paragraphs`.
    pub many_paragraph_bonus: i64,
    /// Per-paragraph bonus below `many_paragraphs`.
    pub few_paragraph_bonus: i64,
    /// Per-heading bonus.
    pub heading_bonus: i64,

    /// Text longer than this earns the capped long-text bonus.
    pub long_text: usize,
    /// Text longer than this (up to `long_text`) earns half its length.
    pub medium_text: usize,
    /// Text longer than this (up to `medium_text`) earns a third of its length.
    pub short_text: usize,
    /// Text shorter than this is penalized.
    pub tiny_text: usize,
    /// Penalty for tiny text.
    pub tiny_text_penalty: i64,

    /// Content density above which the score is boosted.
    pub dense_threshold: f64,
    /// Multiplier for dense content.
    pub dense_multiplier: f64,
    /// Content density below which the score is damped.
    pub sparse_threshold: f64,
    /// Multiplier for sparse content.
    pub sparse_multiplier: f64,

    /// Link-density tiers, strongest first: `(threshold, multiplier)`.
    pub link_density_tiers: [(f64, f64); 3],

    /// Comma count above which the comma bonus applies.
    pub comma_threshold: usize,
    /// Bonus per comma.
    pub comma_bonus: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            strong_positive: 400,
            medium_positive: 200,
            strong_negative: -400,
            medium_negative: -200,
            weak_negative: -100,
            role_content: 500,
            role_boilerplate: -400,
            many_paragraphs: 3,
            many_paragraph_bonus: 150,
            few_paragraph_bonus: 80,
            heading_bonus: 100,
            long_text: 500,
            medium_text: 200,
            short_text: 100,
            tiny_text: 50,
            tiny_text_penalty: -300,
            dense_threshold: 0.7,
            dense_multiplier: 1.2,
            sparse_threshold: 0.3,
            sparse_multiplier: 0.7,
            link_density_tiers: [(0.5, 0.2), (0.3, 0.5), (0.15, 0.75)],
            comma_threshold: 5,
            comma_bonus: 10,
        }
    }
}

/// Score the first node of `sel` with the default weights.
///
/// Returns `0` for an empty selection, non-element nodes, non-content tags
/// and paragraphs.
///
/// # Example
///
/// ```rust
/// use rs_maintext::dom;
/// use rs_maintext::scoring::score;
///
/// let doc = dom::parse("<article><p>P1</p><p>P2</p><p>P3</p></article><div>Short</div>");
/// assert!(score(&doc.select("article")) > score(&doc.select("div")));
/// assert_eq!(score(&doc.select("p")), 0);
/// ```
#[must_use]
pub fn score(sel: &Selection) -> i64 {
    score_with(sel, &ScoringWeights::default())
}

/// Score the first node of `sel` with custom weights.
#[must_use]
pub fn score_with(sel: &Selection, weights: &ScoringWeights) -> i64 {
    dom::first_node(sel).map_or(0, |node| score_node(&node, weights))
}

/// Score a single node.
#[must_use]
pub fn score_node(node: &NodeRef, weights: &ScoringWeights) -> i64 {
    if scorable_tag(node).is_none() {
        return 0;
    }
    score_with_metrics(node, &collect_node_metrics(node), weights)
}

/// Score a node whose subtree metrics were already collected.
#[must_use]
pub fn score_with_metrics(node: &NodeRef, metrics: &ContentMetrics, weights: &ScoringWeights) -> i64 {
    let Some(tag) = scorable_tag(node) else {
        return 0;
    };
    let base = tag_prior(&tag) + node_attribute_score(node, weights);
    apply_metrics(base, metrics, weights)
}

/// Lower-cased tag of an element that can carry a score.
fn scorable_tag(node: &NodeRef) -> Option<String> {
    dom::tag_name(node).filter(|tag| !is_non_content_tag(tag) && tag != "p")
}

/// Combine a base score with subtree metrics.
#[must_use]
pub fn apply_metrics(base: i64, metrics: &ContentMetrics, weights: &ScoringWeights) -> i64 {
    let mut score = base;

    let paragraphs = metrics.paragraph_count as i64;
    if metrics.paragraph_count >= weights.many_paragraphs {
        score += paragraphs * weights.many_paragraph_bonus;
    } else if metrics.paragraph_count > 0 {
        score += paragraphs * weights.few_paragraph_bonus;
    }

    score += metrics.heading_count as i64 * weights.heading_bonus;
    score += text_length_bonus(metrics.text_length, weights);

    let density = metrics.content_density();
    if density > weights.dense_threshold {
        score = scale(score, weights.dense_multiplier);
    } else if density < weights.sparse_threshold {
        score = scale(score, weights.sparse_multiplier);
    }

    let link_density = metrics.link_density();
    if let Some(&(_, multiplier)) = weights
        .link_density_tiers
        .iter()
        .find(|(threshold, _)| link_density > *threshold)
    {
        score = scale(score, multiplier);
    }

    if metrics.comma_count > weights.comma_threshold {
        score += metrics.comma_count as i64 * weights.comma_bonus;
    }

    score
}

fn text_length_bonus(text_length: usize, weights: &ScoringWeights) -> i64 {
    let t = text_length as i64;
    if text_length > weights.long_text {
        let long = weights.long_text as i64;
        long + (t - long) / 10
    } else if text_length > weights.medium_text {
        t / 2
    } else if text_length > weights.short_text {
        t / 3
    } else if text_length < weights.tiny_text {
        weights.tiny_text_penalty
    } else {
        0
    }
}

/// Multiply and truncate toward zero.
#[inline]
fn scale(score: i64, multiplier: f64) -> i64 {
    (score as f64 * multiplier).trunc() as i64
}

/// Class/id/role hint score for the first node of `sel`.
///
/// Every pattern that matches a lower-cased `class` or `id` value adds its
/// set's weight, so a value can hit several sets at once.
#[must_use]
pub fn attribute_score(sel: &Selection) -> i64 {
    dom::first_node(sel).map_or(0, |node| node_attribute_score(&node, &ScoringWeights::default()))
}

/// Class/id/role hint score for a single node.
#[must_use]
pub fn node_attribute_score(node: &NodeRef, weights: &ScoringWeights) -> i64 {
    if !node.is_element() {
        return 0;
    }

    let mut score = 0;
    for (name, value) in dom::get_all_attributes(node) {
        let value = value.trim().to_ascii_lowercase();
        match name.to_ascii_lowercase().as_str() {
            "class" | "id" => score += pattern_score(&value, weights),
            "role" => score += role_score(&value, weights),
            _ => {}
        }
    }
    score
}

fn pattern_score(value: &str, weights: &ScoringWeights) -> i64 {
    let sets: [(&[&str], i64); 5] = [
        (STRONG_POSITIVE, weights.strong_positive),
        (MEDIUM_POSITIVE, weights.medium_positive),
        (STRONG_NEGATIVE, weights.strong_negative),
        (MEDIUM_NEGATIVE, weights.medium_negative),
        (WEAK_NEGATIVE, weights.weak_negative),
    ];

    sets.iter()
        .map(|(patterns, weight)| {
            count_matches(value, patterns, BoundaryMode::Standard) as i64 * weight
        })
        .sum()
}

fn role_score(role: &str, weights: &ScoringWeights) -> i64 {
    match role {
        "main" | "article" => weights.role_content,
        "navigation" | "complementary" => weights.role_boilerplate,
        _ => 0,
    }
}
