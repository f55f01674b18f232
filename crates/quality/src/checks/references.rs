//! Data-references - embedded clinical context and enrichment coverage.

use super::CheckContext;
use crate::record::RecordView;
use qbank_core::{Diagnostic, Dimension};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const DIM: Dimension = Dimension::DataReferences;

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid pattern"))
}

/// Opportunistic cross-checks against embedded clinical context.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if let Some(narrative) = view.str_field("caseNarrative") {
        let words = narrative.split_whitespace().count();
        let (low, high) = ctx.config.narrative_word_band;
        if words < low || words > high {
            diags.push(
                Diagnostic::warning(
                    DIM,
                    "REF-001",
                    format!("case narrative is {words} words, outside the {low}-{high} band"),
                )
                .with_field("caseNarrative"),
            );
        }
    }

    for (index, entry) in view
        .array("vitalsTimeline")
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        let time = entry.get("time").and_then(Value::as_str).unwrap_or("");
        if !clock_pattern().is_match(time) {
            diags.push(
                Diagnostic::warning(
                    DIM,
                    "REF-002",
                    format!("timeline entry {index} has time \"{time}\", expected 24-hour HH:mm"),
                )
                .with_field("vitalsTimeline"),
            );
        }
    }

    if ctx.config.strict_content_standard {
        if let Some(rationale) = view.object("rationale") {
            for (field, code) in [
                ("pearls", "REF-010"),
                ("trap", "REF-011"),
                ("mnemonic", "REF-012"),
            ] {
                if rationale.get(field).map(Value::is_null).unwrap_or(true) {
                    diags.push(
                        Diagnostic::warning(
                            DIM,
                            code,
                            format!("content standard expects rationale.{field}"),
                        )
                        .with_field(format!("rationale.{field}")),
                    );
                }
            }
        }
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{context, run};
    use super::*;
    use serde_json::json;

    fn narrative(words: usize) -> String {
        vec!["finding"; words].join(" ")
    }

    #[test]
    fn narrative_inside_the_band_is_clean() {
        let (config, registry) = context();
        let value = json!({"caseNarrative": narrative(140)});
        assert!(run(check, &value, &config, &registry).is_empty());
    }

    #[test]
    fn narrative_outside_the_band_warns() {
        let (config, registry) = context();
        let value = json!({"caseNarrative": narrative(40)});
        let diags = run(check, &value, &config, &registry);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "REF-001");
    }

    #[test]
    fn timeline_times_must_be_strict_24_hour() {
        let (config, registry) = context();
        let value = json!({
            "vitalsTimeline": [
                {"time": "08:30", "reading": "HR 88"},
                {"time": "8:30", "reading": "HR 96"},
                {"time": "25:00", "reading": "HR 104"},
            ]
        });
        let diags = run(check, &value, &config, &registry);
        assert_eq!(diags.iter().filter(|d| d.code == "REF-002").count(), 2);
    }

    #[test]
    fn strict_standard_expects_enrichment() {
        let (mut config, registry) = context();
        config.strict_content_standard = true;
        let value = json!({
            "rationale": {
                "whyCorrect": "Hypoxemia requires immediate intervention by the nurse.",
                "whyIncorrect": "The remaining findings are within expected limits.",
                "trap": "Anchoring on the first abnormal value.",
            }
        });
        let diags = run(check, &value, &config, &registry);
        let codes: Vec<_> = diags.iter().map(|d| d.code.as_str()).collect();
        assert!(codes.contains(&"REF-010"));
        assert!(codes.contains(&"REF-012"));
        assert!(!codes.contains(&"REF-011"));
    }

    #[test]
    fn default_standard_ignores_enrichment() {
        let (config, registry) = context();
        let value = json!({"rationale": {"whyCorrect": "x", "whyIncorrect": "y"}});
        assert!(run(check, &value, &config, &registry).is_empty());
    }
}
