//! Option-logic - duplicate and empty options, cloze placeholder coverage.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{Diagnostic, Dimension, ItemKind};
use serde_json::Value;
use std::collections::BTreeSet;

const DIM: Dimension = Dimension::OptionLogic;

/// Check option collections for internal consistency.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if view.array("options").is_some() {
        check_duplicates(view, &mut diags);
    }

    let kind = view.type_tag().and_then(|tag| ctx.registry.recognize(tag));
    if matches!(kind, Some(ItemKind::Cloze | ItemKind::DragAndDrop)) {
        check_placeholders(view, &mut diags);
    }

    diags
}

fn check_duplicates(view: &RecordView<'_>, diags: &mut Vec<Diagnostic>) {
    let ids = view.ids_of("options");
    let duplicate_ids = duplicates(&ids);
    if !duplicate_ids.is_empty() {
        diags.push(
            Diagnostic::critical(
                DIM,
                "OPT-001",
                format!("duplicate option ids: {}", duplicate_ids.join(", ")),
            )
            .with_field("options"),
        );
    }

    let texts: Vec<&str> = view
        .texts_of("options")
        .into_iter()
        .map(str::trim)
        .collect();
    let duplicate_texts = duplicates(&texts);
    let non_empty: Vec<&str> = duplicate_texts
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();
    if !non_empty.is_empty() {
        diags.push(
            Diagnostic::warning(
                DIM,
                "OPT-002",
                format!("duplicate option text: {}", non_empty.join("; ")),
            )
            .with_field("options"),
        );
    }

    let empty_count = texts.iter().filter(|t| t.is_empty()).count()
        + view
            .array("options")
            .unwrap_or_default()
            .iter()
            .filter(|o| matches!(o, Value::Object(m) if !m.contains_key("text")))
            .count();
    if empty_count > 0 {
        diags.push(
            Diagnostic::warning(
                DIM,
                "OPT-003",
                format!("{empty_count} option(s) have empty text"),
            )
            .with_field("options"),
        );
    }
}

/// Every declared blank must have a matching `{{id}}` placeholder in the
/// template.
fn check_placeholders(view: &RecordView<'_>, diags: &mut Vec<Diagnostic>) {
    let template = view.str_field("template").unwrap_or("");
    let missing: Vec<&str> = view
        .ids_of("blanks")
        .into_iter()
        .filter(|id| !template.contains(&format!("{{{{{id}}}}}")))
        .collect();

    if !missing.is_empty() {
        diags.push(
            Diagnostic::critical(
                DIM,
                "OPT-010",
                format!(
                    "template has no placeholder for blank(s): {}",
                    missing.join(", ")
                ),
            )
            .with_field("template"),
        );
    }
}

fn duplicates<'a>(values: &[&'a str]) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for value in values {
        if !seen.insert(*value) {
            dups.insert(*value);
        }
    }
    dups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{context, run};
    use super::*;
    use qbank_core::Severity;
    use serde_json::json;

    #[test]
    fn distinct_options_are_clean() {
        let (config, registry) = context();
        let value = json!({
            "type": "multipleChoice",
            "options": [
                {"id": "a", "text": "Elevate the head of the bed"},
                {"id": "b", "text": "Obtain a 12-lead ECG"},
            ],
        });
        assert!(run(check, &value, &config, &registry).is_empty());
    }

    #[test]
    fn duplicate_ids_are_critical_duplicate_text_warns() {
        let (config, registry) = context();
        let value = json!({
            "type": "multipleChoice",
            "options": [
                {"id": "a", "text": "Reassess in 15 minutes"},
                {"id": "a", "text": "Reassess in 15 minutes"},
            ],
        });
        let diags = run(check, &value, &config, &registry);
        assert!(diags
            .iter()
            .any(|d| d.code == "OPT-001" && d.severity == Severity::Critical));
        assert!(diags
            .iter()
            .any(|d| d.code == "OPT-002" && d.severity == Severity::Warning));
    }

    #[test]
    fn empty_option_text_warns() {
        let (config, registry) = context();
        let value = json!({
            "type": "multipleChoice",
            "options": [{"id": "a", "text": ""}, {"id": "b", "text": "Call the provider"}],
        });
        let diags = run(check, &value, &config, &registry);
        assert!(diags.iter().any(|d| d.code == "OPT-003"));
    }

    #[test]
    fn cloze_template_must_place_every_blank() {
        let (config, registry) = context();
        let value = json!({
            "type": "cloze",
            "template": "Administer {{b1}} before meals.",
            "blanks": [
                {"id": "b1", "options": ["insulin"], "correctOption": "insulin"},
                {"id": "b2", "options": ["30", "60"], "correctOption": "30"},
            ],
        });
        let diags = run(check, &value, &config, &registry);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "OPT-010");
        assert!(diags[0].message.contains("b2"));
    }
}
