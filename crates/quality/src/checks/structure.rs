//! Type-structure - the per-kind structural contract.

use super::CheckContext;
use crate::record::RecordView;
use crate::registry::FieldShape;
use qbank_core::{Diagnostic, Dimension, ItemKind};
use serde_json::Value;

const DIM: Dimension = Dimension::TypeStructure;

/// Check the record against its kind's contract.
///
/// An unrecognized type yields a single critical diagnostic and no further
/// type-specific checking.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let Some(tag) = view.type_tag() else {
        // completeness owns the missing-type diagnostic
        return Vec::new();
    };

    let Some(kind) = ctx.registry.recognize(tag) else {
        return vec![
            Diagnostic::critical(DIM, "TYPE-001", format!("unknown item type \"{tag}\""))
                .with_field("type"),
        ];
    };

    let mut diags = Vec::new();

    for rule in &ctx.registry.rule(kind).fields {
        let Some((name, value)) = view.get_aliased(rule.names) else {
            diags.push(
                Diagnostic::critical(
                    DIM,
                    "TYPE-010",
                    format!("{kind} item is missing required field \"{}\"", rule.canonical()),
                )
                .with_field(rule.canonical()),
            );
            continue;
        };

        match rule.shape {
            FieldShape::Text { min_len } => match value.as_str() {
                None => diags.push(shape_mismatch(name, "a string")),
                Some(s) if s.trim().len() < min_len => diags.push(
                    Diagnostic::critical(
                        DIM,
                        "TYPE-012",
                        format!("\"{name}\" is {} chars, minimum is {min_len}", s.trim().len()),
                    )
                    .with_field(name),
                ),
                Some(_) => {}
            },
            FieldShape::Array { min_len } => match value.as_array() {
                None => diags.push(shape_mismatch(name, "an array")),
                Some(entries) if entries.len() < min_len => diags.push(
                    Diagnostic::critical(
                        DIM,
                        "TYPE-012",
                        format!(
                            "\"{name}\" has {} entries, minimum is {min_len}",
                            entries.len()
                        ),
                    )
                    .with_field(name),
                ),
                Some(_) => {}
            },
            FieldShape::Integer => {
                if value.as_i64().is_none() {
                    diags.push(shape_mismatch(name, "an integer"));
                }
            }
        }
    }

    if matches!(kind, ItemKind::Cloze | ItemKind::DragAndDrop) {
        diags.extend(check_blanks(view));
    }

    diags
}

fn shape_mismatch(name: &str, expected: &str) -> Diagnostic {
    Diagnostic::critical(DIM, "TYPE-011", format!("\"{name}\" is not {expected}")).with_field(name)
}

/// Each blank's correct value must be drawn from its own option list.
fn check_blanks(view: &RecordView<'_>) -> Vec<Diagnostic> {
    let Some(blanks) = view.array("blanks") else {
        return Vec::new();
    };

    let mut diags = Vec::new();
    for (index, blank) in blanks.iter().enumerate() {
        let Some(blank) = blank.as_object() else {
            diags.push(
                Diagnostic::critical(DIM, "TYPE-011", format!("blank {index} is not an object"))
                    .with_field("blanks"),
            );
            continue;
        };

        let options: Vec<&str> = blank
            .get("options")
            .and_then(Value::as_array)
            .map(|opts| opts.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        match blank.get("correctOption").and_then(Value::as_str) {
            Some(correct) if options.contains(&correct) => {}
            Some(correct) => diags.push(
                Diagnostic::critical(
                    DIM,
                    "TYPE-020",
                    format!("blank {index} keys \"{correct}\", which is not among its options"),
                )
                .with_field("blanks"),
            ),
            None => diags.push(
                Diagnostic::critical(
                    DIM,
                    "TYPE-020",
                    format!("blank {index} has no correctOption"),
                )
                .with_field("blanks"),
            ),
        }
    }
    diags
}
