//! Error-detection - defect signatures in the serialized record.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{Diagnostic, Dimension};

const DIM: Dimension = Dimension::ErrorDetection;

/// Serialization artifacts and error sentinels that mean an upstream tool
/// corrupted the record.
const CORRUPTION_SIGNATURES: [&str; 4] =
    ["undefined", "[object Object]", "NaN", "GENERATION_FAILED"];

/// Authoring placeholders that should never ship.
const PLACEHOLDER_MARKERS: [&str; 5] = ["TBD", "TODO", "PLACEHOLDER", "???", "lorem ipsum"];

/// Scan the serialized record for defect signatures.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let serialized = view.serialized();
    let lowered = serialized.to_lowercase();

    for signature in CORRUPTION_SIGNATURES {
        if serialized.contains(signature) {
            diags.push(Diagnostic::critical(
                DIM,
                "DEF-001",
                format!("record contains the corruption signature \"{signature}\""),
            ));
        }
    }

    for marker in PLACEHOLDER_MARKERS {
        if lowered.contains(&marker.to_lowercase()) {
            diags.push(Diagnostic::warning(
                DIM,
                "DEF-002",
                format!("record contains the placeholder marker \"{marker}\""),
            ));
        }
    }

    if let Some(stem) = view.str_field("stem") {
        let len = stem.trim().len();
        if len > 0 && len < ctx.config.suspicious_stem_len {
            diags.push(
                Diagnostic::warning(
                    DIM,
                    "DEF-010",
                    format!("stem is suspiciously short ({len} chars)"),
                )
                .with_field("stem"),
            );
        }
    }

    diags
}
