//! Completeness - the fields every item must carry.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{Diagnostic, Dimension};

const DIM: Dimension = Dimension::Completeness;

/// Check common-field presence.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if view.id().is_none() {
        diags.push(
            Diagnostic::critical(DIM, "COMP-001", "item has no usable id").with_field("id"),
        );
    }

    if view.type_tag().map(str::trim).unwrap_or("").is_empty() {
        diags.push(
            Diagnostic::critical(DIM, "COMP-002", "item declares no type").with_field("type"),
        );
    }

    match view.str_field("stem") {
        Some(stem) if stem.trim().len() >= ctx.config.min_stem_len => {}
        Some(stem) => {
            diags.push(
                Diagnostic::critical(
                    DIM,
                    "COMP-003",
                    format!(
                        "stem is {} chars, below the {}-char minimum",
                        stem.trim().len(),
                        ctx.config.min_stem_len
                    ),
                )
                .with_field("stem"),
            );
        }
        None => {
            diags.push(Diagnostic::critical(DIM, "COMP-003", "stem is missing").with_field("stem"));
        }
    }

    for (field, code) in [
        ("scoring", "COMP-010"),
        ("rationale", "COMP-011"),
        ("pedagogy", "COMP-012"),
    ] {
        if view.get(field).is_none() {
            diags.push(
                Diagnostic::warning(DIM, code, format!("item has no {field}")).with_field(field),
            );
        }
    }

    diags
}
