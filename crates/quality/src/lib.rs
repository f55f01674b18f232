//! qbank item quality engine.
//!
//! A multi-dimensional validator for polymorphic assessment items: a type
//! registry declaring each shape's structural contract, eight independent
//! dimension checkers, a score aggregator, and the item/bank audit engine
//! that ties them together. Everything here is pure and synchronous;
//! malformed input produces diagnostics, never errors.

#![warn(missing_docs)]

pub mod checks;
pub mod config;
pub mod engine;
pub mod record;
pub mod registry;
pub mod score;

pub use config::AuditConfig;
pub use engine::AuditEngine;
pub use record::RecordView;
pub use registry::{FieldRule, FieldShape, TypeRegistry, TypeRule};
