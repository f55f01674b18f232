//! Scoring rules - how raw responses map to points.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The recognized scoring method tags.
pub const SCORING_METHODS: [&str; 3] = ["dichotomous", "polytomous", "linkage"];

/// A scoring rule, discriminated by the `method` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum ScoringRule {
    /// All-or-nothing, always worth exactly one point.
    #[serde(rename_all = "camelCase")]
    Dichotomous {
        /// Declared point total; must be 1
        max_points: u32,
    },

    /// One point per correct response unit.
    #[serde(rename_all = "camelCase")]
    Polytomous {
        /// Declared point total; must match the item's correctness cardinality
        max_points: u32,
    },

    /// Points with a partial-credit map over response keys.
    #[serde(rename_all = "camelCase")]
    Linkage {
        /// Declared point total
        max_points: u32,
        /// Response key to credit fraction
        partial_credit: BTreeMap<String, f64>,
    },
}

impl ScoringRule {
    /// The method tag.
    pub fn method(&self) -> &'static str {
        match self {
            ScoringRule::Dichotomous { .. } => "dichotomous",
            ScoringRule::Polytomous { .. } => "polytomous",
            ScoringRule::Linkage { .. } => "linkage",
        }
    }

    /// The declared point total.
    pub fn max_points(&self) -> u32 {
        match self {
            ScoringRule::Dichotomous { max_points }
            | ScoringRule::Polytomous { max_points }
            | ScoringRule::Linkage { max_points, .. } => *max_points,
        }
    }

    /// A one-point dichotomous rule.
    pub fn dichotomous() -> Self {
        ScoringRule::Dichotomous { max_points: 1 }
    }

    /// A polytomous rule worth `max_points`.
    pub fn polytomous(max_points: u32) -> Self {
        ScoringRule::Polytomous { max_points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_method_tag() {
        let rule = ScoringRule::polytomous(3);
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["method"], "polytomous");
        assert_eq!(value["maxPoints"], 3);
    }

    #[test]
    fn linkage_carries_partial_credit() {
        let mut partial_credit = BTreeMap::new();
        partial_credit.insert("a".to_string(), 0.5);
        let rule = ScoringRule::Linkage {
            max_points: 2,
            partial_credit,
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["partialCredit"]["a"], 0.5);

        let back: ScoringRule = serde_json::from_value(value).unwrap();
        assert_eq!(back.method(), "linkage");
        assert_eq!(back.max_points(), 2);
    }
}
