//! qbank deterministic repair.
//!
//! The normalization pass that coerces malformed item records toward the
//! canonical shape or quarantines them, plus the narrow boundary to an
//! external repair proposer for items the deterministic pass cannot fix.

#![warn(missing_docs)]

pub mod alias;
pub mod defaults;
pub mod normalizer;
pub mod proposer;

pub use normalizer::{Normalizer, RepairOutcome, RepairState};
pub use proposer::{Escalator, EscalationResult, ProposeError, RepairProposer};
