//! qbank core data models.
//!
//! This crate defines the data structures shared by the item quality
//! pipeline: the polymorphic item family, scoring rules, the pedagogy
//! taxonomy, rationale content, and the diagnostic/report types produced
//! by the audit engine.

#![warn(missing_docs)]

// Item family
mod item;
mod scoring;
mod pedagogy;
mod rationale;

// Audit output
mod diagnostic;
mod report;

// Re-exports
pub use item::{
    Blank, BowtieBody, BowtieNode, ChoiceBody, ClozeBody, HighlightBody, HotspotBody,
    HotspotRegion, Item, ItemBody, ItemKind, ItemOption, MatrixBody, MatrixColumn, MatrixMatch,
    MatrixRow, MultiBody, OrderingBody, SelectNBody, UnknownKind, VitalsEntry,
};
pub use scoring::{ScoringRule, SCORING_METHODS};
pub use pedagogy::{CognitiveLevel, ContentCategory, JudgmentStep, Pedagogy};
pub use rationale::Rationale;
pub use diagnostic::{Diagnostic, Dimension, Severity};
pub use report::{BankReport, DimensionScores, DimensionTally, ItemReport, Verdict};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
