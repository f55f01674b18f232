//! Validation reports - per-item and bank-wide.

use crate::diagnostic::{Diagnostic, Dimension, Severity};
use crate::Time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The pass/warn/fail gate derived from raw diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No warnings or criticals
    Pass,
    /// Warnings but no criticals
    Warn,
    /// At least one critical
    Fail,
}

/// Per-dimension scores, 0-100 each.
///
/// A fixed struct rather than a map so serialized field order is stable and
/// report comparisons are byte-exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DimensionScores {
    pub completeness: f64,
    pub type_structure: f64,
    pub scoring_accuracy: f64,
    pub pedagogy: f64,
    pub rationale_quality: f64,
    pub option_logic: f64,
    pub data_references: f64,
    pub error_detection: f64,
}

impl DimensionScores {
    /// All dimensions at 100.
    pub fn full() -> Self {
        Self {
            completeness: 100.0,
            type_structure: 100.0,
            scoring_accuracy: 100.0,
            pedagogy: 100.0,
            rationale_quality: 100.0,
            option_logic: 100.0,
            data_references: 100.0,
            error_detection: 100.0,
        }
    }

    /// Read one dimension's score.
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Completeness => self.completeness,
            Dimension::TypeStructure => self.type_structure,
            Dimension::ScoringAccuracy => self.scoring_accuracy,
            Dimension::Pedagogy => self.pedagogy,
            Dimension::RationaleQuality => self.rationale_quality,
            Dimension::OptionLogic => self.option_logic,
            Dimension::DataReferences => self.data_references,
            Dimension::ErrorDetection => self.error_detection,
        }
    }

    /// Write one dimension's score.
    pub fn set(&mut self, dimension: Dimension, score: f64) {
        match dimension {
            Dimension::Completeness => self.completeness = score,
            Dimension::TypeStructure => self.type_structure = score,
            Dimension::ScoringAccuracy => self.scoring_accuracy = score,
            Dimension::Pedagogy => self.pedagogy = score,
            Dimension::RationaleQuality => self.rationale_quality = score,
            Dimension::OptionLogic => self.option_logic = score,
            Dimension::DataReferences => self.data_references = score,
            Dimension::ErrorDetection => self.error_detection = score,
        }
    }
}

/// The result of auditing one item. Recomputed on every run, never persisted
/// by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    /// The item's id, when the record carried one
    pub item_id: Option<String>,

    /// The item's raw type tag, when the record carried one
    pub item_type: Option<String>,

    /// The gate
    pub verdict: Verdict,

    /// Weighted overall score, 0-100; informational, never the gate
    pub score: f64,

    /// Per-dimension scores
    pub dimension_scores: DimensionScores,

    /// Every diagnostic, in checker order
    pub diagnostics: Vec<Diagnostic>,
}

impl ItemReport {
    /// Count diagnostics at a severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Diagnostics belonging to one dimension.
    pub fn for_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.dimension == dimension)
    }
}

/// Pass/warn/fail counts for one dimension across a bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTally {
    /// Items with no diagnostics above info in this dimension
    pub passed: usize,
    /// Items whose worst diagnostic here is a warning
    pub warned: usize,
    /// Items with a critical in this dimension
    pub failed: usize,
}

/// Aggregate over a collection of item reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankReport {
    /// Items audited
    pub total: usize,

    /// Items that passed
    pub passed: usize,

    /// Items with warnings only
    pub warned: usize,

    /// Items that failed
    pub failed: usize,

    /// Mean of item scores; 0 for an empty bank
    pub overall_score: f64,

    /// Item count per raw type tag ("unknown" for untyped records)
    pub type_distribution: BTreeMap<String, usize>,

    /// Per-dimension tallies, keyed by dimension label
    pub dimension_tallies: BTreeMap<String, DimensionTally>,

    /// When the report was computed; excluded from equality in tests
    pub generated_at: Time,
}
