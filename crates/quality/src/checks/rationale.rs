//! Rationale-quality - explanation depth and boilerplate detection.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{Diagnostic, Dimension};
use serde_json::Value;

const DIM: Dimension = Dimension::RationaleQuality;

/// Check the rationale block.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let Some(value) = view.get("rationale") else {
        // completeness owns the missing-rationale diagnostic
        return Vec::new();
    };

    let Some(rationale) = value.as_object() else {
        return vec![
            Diagnostic::warning(DIM, "RAT-000", "rationale is not an object")
                .with_field("rationale"),
        ];
    };

    let mut diags = Vec::new();
    let why_correct = text_of(rationale, "whyCorrect");
    let why_incorrect = text_of(rationale, "whyIncorrect");

    for (field, code, text) in [
        ("whyCorrect", "RAT-001", why_correct),
        ("whyIncorrect", "RAT-002", why_incorrect),
    ] {
        if text.len() < ctx.config.min_rationale_len {
            diags.push(
                Diagnostic::warning(
                    DIM,
                    code,
                    format!(
                        "{field} is {} chars, below the {}-char minimum",
                        text.len(),
                        ctx.config.min_rationale_len
                    ),
                )
                .with_field(format!("rationale.{field}")),
            );
        }

        let lowered = text.to_lowercase();
        if let Some(phrase) = ctx
            .config
            .boilerplate_denylist
            .iter()
            .find(|phrase| lowered.contains(phrase.as_str()))
        {
            diags.push(
                Diagnostic::warning(
                    DIM,
                    "RAT-010",
                    format!("{field} contains template boilerplate (\"{phrase}\")"),
                )
                .with_field(format!("rationale.{field}")),
            );
        }
    }

    if !why_correct.is_empty() && why_correct == why_incorrect {
        diags.push(Diagnostic::critical(
            DIM,
            "RAT-020",
            "whyCorrect and whyIncorrect are identical",
        ));
    }

    let no_review_units = rationale
        .get("reviewUnits")
        .and_then(Value::as_array)
        .map(Vec::is_empty)
        .unwrap_or(true);
    if no_review_units {
        diags.push(
            Diagnostic::info(DIM, "RAT-030", "rationale maps to no review units")
                .with_field("rationale.reviewUnits"),
        );
    }

    diags
}

fn text_of<'a>(rationale: &'a serde_json::Map<String, Value>, field: &str) -> &'a str {
    rationale
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{context, run};
    use super::*;
    use qbank_core::Severity;
    use serde_json::json;

    fn rationale_record(why_correct: &str, why_incorrect: &str) -> Value {
        json!({
            "rationale": {
                "whyCorrect": why_correct,
                "whyIncorrect": why_incorrect,
                "reviewUnits": ["oxygenation"],
            }
        })
    }

    #[test]
    fn substantive_rationale_is_clean() {
        let (config, registry) = context();
        let value = rationale_record(
            "Saturation of 84% indicates hypoxemia and requires immediate intervention.",
            "The other findings are within expected limits for this client.",
        );
        assert!(run(check, &value, &config, &registry).is_empty());
    }

    #[test]
    fn identical_explanations_are_critical() {
        let (config, registry) = context();
        let text = "The correct option reflects the priority assessment for this client.";
        let diags = run(check, &rationale_record(text, text), &config, &registry);
        assert!(diags
            .iter()
            .any(|d| d.code == "RAT-020" && d.severity == Severity::Critical));
    }

    #[test]
    fn boilerplate_phrases_warn() {
        let (config, registry) = context();
        let value = rationale_record(
            "This is correct because it is the correct answer for this question.",
            "The remaining findings are within expected limits for this client.",
        );
        let diags = run(check, &value, &config, &registry);
        assert!(diags.iter().any(|d| d.code == "RAT-010"));
    }

    #[test]
    fn short_texts_and_missing_review_units_are_flagged() {
        let (config, registry) = context();
        let value = json!({"rationale": {"whyCorrect": "Yes.", "whyIncorrect": "No."}});
        let diags = run(check, &value, &config, &registry);
        let codes: Vec<_> = diags.iter().map(|d| d.code.as_str()).collect();
        assert!(codes.contains(&"RAT-001"));
        assert!(codes.contains(&"RAT-002"));
        assert!(codes.contains(&"RAT-030"));
        // "Yes." != "No." - distinct short texts are not the identical-text defect
        assert!(!codes.contains(&"RAT-020"));
    }
}
