// Classifier output model and verdict aggregation.
//
// The moderation API returns a loosely-shaped JSON object: category names
// mapped to either a bare confidence or a nested map of sub-category
// confidences, interleaved with non-numeric metadata. `ScoreNode` makes
// that shape explicit so the aggregation walk is typed instead of
// stringly-matched.

pub mod aggregate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use aggregate::{aggregate, CONFIDENCE_THRESHOLD, EXCLUDED_KEYS};

/// One node of the classifier's score tree.
///
/// Untagged: a JSON number becomes `Score`, an object becomes `Nested`,
/// anything else (status strings, request ids) falls through to `Other`
/// and is ignored by aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreNode {
    Score(f64),
    Nested(BTreeMap<String, ScoreNode>),
    Other(serde_json::Value),
}

/// The parsed response for one classified image.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Score tree keyed by category name.
    pub scores: BTreeMap<String, ScoreNode>,
    /// The unmodified response body, retained for audit serialization
    /// in reports.
    pub raw: serde_json::Value,
}

impl Classification {
    /// Parse a raw response body into a score tree, keeping the original
    /// value alongside it.
    pub fn from_value(raw: serde_json::Value) -> anyhow::Result<Self> {
        let scores = serde_json::from_value(raw.clone())?;
        Ok(Self { scores, raw })
    }

    /// Pretty-printed response body for report audit trails.
    pub fn audit_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// The aggregated decision for one media reference.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub inappropriate: bool,
    pub classification: Classification,
}

impl Verdict {
    /// Aggregate a classification into a verdict. The classification is
    /// read, never mutated.
    pub fn from_classification(classification: Classification) -> Self {
        let inappropriate = aggregate(&classification);
        Self {
            inappropriate,
            classification,
        }
    }
}
