//! Pedagogy - taxonomy vocabulary checks.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{CognitiveLevel, ContentCategory, Diagnostic, Dimension, JudgmentStep};
use serde_json::Value;

const DIM: Dimension = Dimension::Pedagogy;

/// Check the pedagogy block against its fixed vocabularies.
pub fn check(view: &RecordView<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let Some(value) = view.get("pedagogy") else {
        // completeness owns the missing-pedagogy diagnostic
        return Vec::new();
    };

    let Some(pedagogy) = value.as_object() else {
        return vec![
            Diagnostic::warning(DIM, "PED-000", "pedagogy is not an object").with_field("pedagogy"),
        ];
    };

    let mut diags = Vec::new();

    check_vocab(
        &mut diags,
        pedagogy,
        "cognitiveLevel",
        "PED-001",
        |v| CognitiveLevel::from_loose(v).is_some(),
    );
    check_vocab(
        &mut diags,
        pedagogy,
        "judgmentStep",
        "PED-002",
        |v| JudgmentStep::from_loose(v).is_some(),
    );
    check_vocab(
        &mut diags,
        pedagogy,
        "contentCategory",
        "PED-003",
        |v| ContentCategory::from_loose(v).is_some(),
    );

    match pedagogy.get("difficulty").and_then(Value::as_i64) {
        Some(1..=5) => {}
        _ => diags.push(
            Diagnostic::warning(DIM, "PED-010", "difficulty must be an integer from 1 to 5")
                .with_field("pedagogy.difficulty"),
        ),
    }

    let tags_empty = pedagogy
        .get("tags")
        .and_then(Value::as_array)
        .map(Vec::is_empty)
        .unwrap_or(true);
    if tags_empty {
        diags.push(
            Diagnostic::info(DIM, "PED-020", "item carries no topic tags")
                .with_field("pedagogy.tags"),
        );
    }

    diags
}

fn check_vocab(
    diags: &mut Vec<Diagnostic>,
    pedagogy: &serde_json::Map<String, Value>,
    field: &str,
    code: &str,
    recognized: impl Fn(&str) -> bool,
) {
    let valid = pedagogy
        .get(field)
        .and_then(Value::as_str)
        .map(|value| recognized(value))
        .unwrap_or(false);
    if !valid {
        diags.push(
            Diagnostic::warning(DIM, code, format!("{field} is missing or not in the vocabulary"))
                .with_field(format!("pedagogy.{field}")),
        );
    }
}
