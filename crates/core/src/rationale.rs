//! Rationale model - explanatory content attached to an item.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Explanatory payload for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rationale {
    /// Why the keyed response is correct
    pub why_correct: String,

    /// Why the distractors are incorrect
    pub why_incorrect: String,

    /// Review units this item maps to; should be non-empty
    #[serde(default)]
    pub review_units: Vec<String>,

    /// Clinical pearls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pearls: Option<Vec<String>>,

    /// What trap the distractors set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap: Option<String>,

    /// Memory aid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,

    /// Per-option explanation, keyed by option id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_breakdown: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_enrichment_is_omitted_when_absent() {
        let rationale = Rationale {
            why_correct: "Hypoxemia below 90% requires immediate intervention.".to_string(),
            why_incorrect: "The remaining findings are within expected limits.".to_string(),
            review_units: vec!["oxygenation".to_string()],
            pearls: None,
            trap: None,
            mnemonic: None,
            option_breakdown: None,
        };
        let value = serde_json::to_value(&rationale).unwrap();
        assert_eq!(value["whyCorrect"], rationale.why_correct);
        assert!(value.get("pearls").is_none());
        assert!(value.get("mnemonic").is_none());
    }
}
