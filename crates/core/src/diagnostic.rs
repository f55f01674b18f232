//! Diagnostics - the sole reporting channel for item defects.

use serde::{Deserialize, Serialize};

/// Severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Soft signal, never alone disqualifying
    Info,
    /// Quality concern, not disqualifying
    Warning,
    /// The defect makes the item unusable or unscoreable
    Critical,
}

/// One independent axis of quality checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Completeness,
    TypeStructure,
    ScoringAccuracy,
    Pedagogy,
    RationaleQuality,
    OptionLogic,
    DataReferences,
    ErrorDetection,
}

impl Dimension {
    /// Every dimension, in checker execution order.
    pub const ALL: [Dimension; 8] = [
        Dimension::Completeness,
        Dimension::TypeStructure,
        Dimension::ScoringAccuracy,
        Dimension::Pedagogy,
        Dimension::RationaleQuality,
        Dimension::OptionLogic,
        Dimension::DataReferences,
        Dimension::ErrorDetection,
    ];

    /// Stable label used in serialized tallies.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Completeness => "completeness",
            Dimension::TypeStructure => "typeStructure",
            Dimension::ScoringAccuracy => "scoringAccuracy",
            Dimension::Pedagogy => "pedagogy",
            Dimension::RationaleQuality => "rationaleQuality",
            Dimension::OptionLogic => "optionLogic",
            Dimension::DataReferences => "dataReferences",
            Dimension::ErrorDetection => "errorDetection",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single flagged defect. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The dimension that produced it
    pub dimension: Dimension,

    /// Severity
    pub severity: Severity,

    /// Stable machine-readable code
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Offending field, when one can be named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Diagnostic {
    /// A critical diagnostic.
    pub fn critical(dimension: Dimension, code: &str, message: impl Into<String>) -> Self {
        Self::new(dimension, Severity::Critical, code, message)
    }

    /// A warning diagnostic.
    pub fn warning(dimension: Dimension, code: &str, message: impl Into<String>) -> Self {
        Self::new(dimension, Severity::Warning, code, message)
    }

    /// An info diagnostic.
    pub fn info(dimension: Dimension, code: &str, message: impl Into<String>) -> Self {
        Self::new(dimension, Severity::Info, code, message)
    }

    fn new(
        dimension: Dimension,
        severity: Severity,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            dimension,
            severity,
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }

    /// Attach the offending field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn builder_attaches_field() {
        let diag = Diagnostic::critical(Dimension::Completeness, "COMP-001", "id is missing")
            .with_field("id");
        assert_eq!(diag.severity, Severity::Critical);
        assert_eq!(diag.code, "COMP-001");
        assert_eq!(diag.field.as_deref(), Some("id"));
    }
}
