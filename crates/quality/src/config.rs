//! Audit configuration.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the audit engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Minimum stem length before completeness flags it
    #[serde(default = "default_min_stem_len")]
    pub min_stem_len: usize,

    /// Stems shorter than this (but present) are flagged as suspicious
    #[serde(default = "default_suspicious_stem_len")]
    pub suspicious_stem_len: usize,

    /// Minimum length for rationale explanations
    #[serde(default = "default_min_rationale_len")]
    pub min_rationale_len: usize,

    /// Inclusive word-count band for an embedded case narrative
    #[serde(default = "default_narrative_word_band")]
    pub narrative_word_band: (usize, usize),

    /// Whether missing enrichment (pearls, trap, mnemonic) is flagged
    #[serde(default)]
    pub strict_content_standard: bool,

    /// Generic template phrases flagged in rationales, matched
    /// case-insensitively as substrings
    #[serde(default = "default_boilerplate_denylist")]
    pub boilerplate_denylist: Vec<String>,
}

fn default_min_stem_len() -> usize {
    20
}

fn default_suspicious_stem_len() -> usize {
    12
}

fn default_min_rationale_len() -> usize {
    30
}

fn default_narrative_word_band() -> (usize, usize) {
    (120, 160)
}

fn default_boilerplate_denylist() -> Vec<String> {
    [
        "this is correct because it is the correct answer",
        "the correct answer is correct",
        "this option is incorrect because it is wrong",
        "refer to your textbook",
        "as an ai",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_stem_len: default_min_stem_len(),
            suspicious_stem_len: default_suspicious_stem_len(),
            min_rationale_len: default_min_rationale_len(),
            narrative_word_band: default_narrative_word_band(),
            strict_content_standard: false,
            boilerplate_denylist: default_boilerplate_denylist(),
        }
    }
}
