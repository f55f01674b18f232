//! Dimension checkers.
//!
//! Eight independent, side-effect-free checkers, one per quality
//! dimension. Each consumes a record view and produces diagnostics in
//! exactly one dimension; they can run in any order.

use crate::config::AuditConfig;
use crate::record::RecordView;
use crate::registry::TypeRegistry;
use qbank_core::{Diagnostic, Dimension};

pub mod completeness;
pub mod defects;
pub mod options;
pub mod pedagogy;
pub mod rationale;
pub mod references;
pub mod scoring;
pub mod structure;

/// Shared read-only context handed to every checker.
pub struct CheckContext<'a> {
    /// Audit thresholds
    pub config: &'a AuditConfig,
    /// Structural contracts
    pub registry: &'a TypeRegistry,
}

/// A checker function.
pub type CheckFn = fn(&RecordView<'_>, &CheckContext<'_>) -> Vec<Diagnostic>;

/// Every checker, paired with its dimension, in execution order.
pub fn all() -> [(Dimension, CheckFn); 8] {
    [
        (Dimension::Completeness, completeness::check as CheckFn),
        (Dimension::TypeStructure, structure::check as CheckFn),
        (Dimension::ScoringAccuracy, scoring::check as CheckFn),
        (Dimension::Pedagogy, pedagogy::check as CheckFn),
        (Dimension::RationaleQuality, rationale::check as CheckFn),
        (Dimension::OptionLogic, options::check as CheckFn),
        (Dimension::DataReferences, references::check as CheckFn),
        (Dimension::ErrorDetection, defects::check as CheckFn),
    ]
}
