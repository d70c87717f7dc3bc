// Threshold aggregation over the score tree.
//
// A single confidence at or above the threshold anywhere in the tree flags
// the whole image. There is no weighting and no per-category override;
// the classifier's taxonomy is trusted as-is.

use super::{Classification, ScoreNode};
use std::collections::BTreeMap;

/// Confidence at or above this flags the image. Inclusive: exactly 0.5
/// counts as inappropriate.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Response keys that carry metadata rather than confidences. Skipped,
/// together with their subtrees, at every level of the walk.
pub const EXCLUDED_KEYS: [&str; 3] = ["timestamp", "operations", "none"];

fn is_metadata_key(key: &str) -> bool {
    EXCLUDED_KEYS.contains(&key)
}

/// True iff any non-excluded numeric leaf meets the threshold.
pub fn aggregate(classification: &Classification) -> bool {
    any_flagged(&classification.scores)
}

fn any_flagged(scores: &BTreeMap<String, ScoreNode>) -> bool {
    scores
        .iter()
        .filter(|(key, _)| !is_metadata_key(key))
        .any(|(_, node)| match node {
            ScoreNode::Score(confidence) => *confidence >= CONFIDENCE_THRESHOLD,
            ScoreNode::Nested(inner) => any_flagged(inner),
            ScoreNode::Other(_) => false,
        })
}
