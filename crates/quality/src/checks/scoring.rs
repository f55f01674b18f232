//! Scoring-accuracy - rule consistency and correctness-key references.

use super::CheckContext;
use crate::record::RecordView;
use crate::registry::alias;
use qbank_core::{Diagnostic, Dimension, ItemKind, SCORING_METHODS};
use serde_json::Value;

const DIM: Dimension = Dimension::ScoringAccuracy;

/// Check the declared scoring rule against the item's own correctness data.
pub fn check(view: &RecordView<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let kind = view.type_tag().and_then(|tag| ctx.registry.recognize(tag));

    if let Some(value) = view.get("scoring") {
        match value.as_object() {
            None => diags.push(
                Diagnostic::critical(DIM, "SCORE-001", "scoring is not an object")
                    .with_field("scoring"),
            ),
            Some(scoring) => check_rule(scoring, kind, view, &mut diags),
        }
    }

    if let Some(kind) = kind {
        check_references(kind, view, &mut diags);
    }

    diags
}

fn check_rule(
    scoring: &serde_json::Map<String, Value>,
    kind: Option<ItemKind>,
    view: &RecordView<'_>,
    diags: &mut Vec<Diagnostic>,
) {
    let method = scoring.get("method").and_then(Value::as_str);
    match method {
        None => diags.push(
            Diagnostic::critical(DIM, "SCORE-010", "scoring method is missing")
                .with_field("scoring.method"),
        ),
        Some(m) if !SCORING_METHODS.contains(&m) => diags.push(
            Diagnostic::critical(DIM, "SCORE-010", format!("unknown scoring method \"{m}\""))
                .with_field("scoring.method"),
        ),
        Some(_) => {}
    }

    let max_points = scoring
        .get("maxPoints")
        .and_then(Value::as_i64)
        .filter(|p| *p >= 1);
    let Some(points) = max_points else {
        diags.push(
            Diagnostic::critical(DIM, "SCORE-011", "maxPoints must be a positive integer")
                .with_field("scoring.maxPoints"),
        );
        return;
    };

    match method {
        Some("dichotomous") if points != 1 => diags.push(
            Diagnostic::critical(
                DIM,
                "SCORE-020",
                format!("dichotomous items are worth exactly 1 point, not {points}"),
            )
            .with_field("scoring.maxPoints"),
        ),
        Some("polytomous") => {
            if let Some(expected) = kind.and_then(|k| expected_points(k, view)) {
                if points == expected + 1 && kind == Some(ItemKind::Bowtie) {
                    diags.push(Diagnostic::info(
                        DIM,
                        "SCORE-022",
                        format!(
                            "bowtie declares {points} points; {expected} correct responses plus \
                             one for the condition"
                        ),
                    ));
                } else if points != expected {
                    diags.push(
                        Diagnostic::warning(
                            DIM,
                            "SCORE-021",
                            format!(
                                "polytomous maxPoints is {points} but the item keys {expected} \
                                 correct responses"
                            ),
                        )
                        .with_field("scoring.maxPoints"),
                    );
                }
            }
        }
        Some("linkage") => {
            let empty = scoring
                .get("partialCredit")
                .and_then(Value::as_object)
                .map(|m| m.is_empty())
                .unwrap_or(true);
            if empty {
                diags.push(
                    Diagnostic::warning(
                        DIM,
                        "SCORE-023",
                        "linkage scoring declares no partial-credit map",
                    )
                    .with_field("scoring.partialCredit"),
                );
            }
        }
        _ => {}
    }
}

/// The point total implied by the item's correctness-key cardinality.
fn expected_points(kind: ItemKind, view: &RecordView<'_>) -> Option<i64> {
    let count = match kind {
        ItemKind::SelectAll => view.array("correctOptionIds")?.len(),
        ItemKind::SelectN => return view.int_field("n"),
        ItemKind::Highlight => view.array("correctSpanIndices")?.len(),
        ItemKind::Cloze | ItemKind::DragAndDrop => view.array("blanks")?.len(),
        ItemKind::Matrix => view.array("rows")?.len(),
        ItemKind::Bowtie => {
            let (_, causes) = view.get_aliased(alias::BOWTIE_CORRECT_CAUSES)?;
            let (_, interventions) = view.get_aliased(alias::BOWTIE_CORRECT_INTERVENTIONS)?;
            causes.as_array()?.len() + interventions.as_array()?.len()
        }
        _ => return None,
    };
    Some(count as i64)
}

/// Every correctness-key id must exist among the item's own collections.
fn check_references(kind: ItemKind, view: &RecordView<'_>, diags: &mut Vec<Diagnostic>) {
    match kind {
        ItemKind::MultipleChoice
        | ItemKind::PriorityAction
        | ItemKind::Trend
        | ItemKind::GraphicOptions
        | ItemKind::AudioVideo
        | ItemKind::ChartExhibit => {
            if let Some(correct) = view.str_field("correctOptionId") {
                check_membership(diags, &[correct], &view.ids_of("options"), "correctOptionId");
            }
        }
        ItemKind::SelectAll | ItemKind::SelectN => {
            check_membership(
                diags,
                &view.strings_of("correctOptionIds"),
                &view.ids_of("options"),
                "correctOptionIds",
            );
        }
        ItemKind::Ordering => {
            check_membership(
                diags,
                &view.strings_of("correctOrder"),
                &view.ids_of("options"),
                "correctOrder",
            );
        }
        ItemKind::Matrix => {
            let rows = view.ids_of("rows");
            let columns = view.ids_of("columns");
            for entry in view.array("correctMatches").unwrap_or_default() {
                let row = entry.get("rowId").and_then(Value::as_str);
                let column = entry.get("columnId").and_then(Value::as_str);
                if let Some(row) = row {
                    check_membership(diags, &[row], &rows, "correctMatches.rowId");
                }
                if let Some(column) = column {
                    check_membership(diags, &[column], &columns, "correctMatches.columnId");
                }
            }
        }
        ItemKind::Bowtie => {
            let causes = collection_ids(view, alias::BOWTIE_CAUSES);
            let interventions = collection_ids(view, alias::BOWTIE_INTERVENTIONS);
            check_membership(
                diags,
                &aliased_strings(view, alias::BOWTIE_CORRECT_CAUSES),
                &causes,
                "correctCauseIds",
            );
            check_membership(
                diags,
                &aliased_strings(view, alias::BOWTIE_CORRECT_INTERVENTIONS),
                &interventions,
                "correctInterventionIds",
            );
        }
        ItemKind::Hotspot => {
            check_membership(
                diags,
                &view.strings_of("correctHotspotIds"),
                &view.ids_of("hotspots"),
                "correctHotspotIds",
            );
        }
        ItemKind::Highlight => check_span_indices(view, diags),
        ItemKind::Cloze | ItemKind::DragAndDrop => {
            // blank-level membership is the type-structure checker's concern
        }
    }
}

fn check_membership(
    diags: &mut Vec<Diagnostic>,
    keys: &[&str],
    collection: &[&str],
    field: &str,
) {
    let dangling: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| !collection.contains(key))
        .collect();
    if !dangling.is_empty() && !collection.is_empty() {
        diags.push(
            Diagnostic::critical(
                DIM,
                "SCORE-030",
                format!(
                    "{field} references ids that do not exist: {}",
                    dangling.join(", ")
                ),
            )
            .with_field(field),
        );
    }
}

fn check_span_indices(view: &RecordView<'_>, diags: &mut Vec<Diagnostic>) {
    let Some(indices) = view.array("correctSpanIndices") else {
        return;
    };
    let span_count = view.array("spans").map(<[Value]>::len);

    for index in indices {
        match index.as_u64() {
            None => diags.push(
                Diagnostic::critical(
                    DIM,
                    "SCORE-031",
                    format!("span index {index} is not a non-negative integer"),
                )
                .with_field("correctSpanIndices"),
            ),
            Some(i) => {
                if let Some(count) = span_count {
                    if i as usize >= count {
                        diags.push(
                            Diagnostic::critical(
                                DIM,
                                "SCORE-031",
                                format!("span index {i} is out of range for {count} spans"),
                            )
                            .with_field("correctSpanIndices"),
                        );
                    }
                }
            }
        }
    }
}

fn collection_ids<'a>(view: &RecordView<'a>, names: &[&'static str]) -> Vec<&'a str> {
    names
        .iter()
        .map(|name| view.ids_of(name))
        .find(|ids| !ids.is_empty())
        .unwrap_or_default()
}

fn aliased_strings<'a>(view: &RecordView<'a>, names: &[&'static str]) -> Vec<&'a str> {
    names
        .iter()
        .map(|name| view.strings_of(name))
        .find(|ids| !ids.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{context, run};
    use super::*;
    use qbank_core::Severity;
    use serde_json::json;

    fn choice_item(scoring: Value) -> Value {
        json!({
            "id": "q-1",
            "type": "multipleChoice",
            "stem": "Which finding requires immediate follow-up?",
            "options": [
                {"id": "a", "text": "Heart rate 88"},
                {"id": "b", "text": "Oxygen saturation 84%"},
                {"id": "c", "text": "Respirations 18"},
                {"id": "d", "text": "Temperature 37.2"},
            ],
            "correctOptionId": "b",
            "scoring": scoring,
        })
    }

    #[test]
    fn valid_dichotomous_rule_is_clean() {
        let (config, registry) = context();
        let value = choice_item(json!({"method": "dichotomous", "maxPoints": 1}));
        assert!(run(check, &value, &config, &registry).is_empty());
    }

    #[test]
    fn dichotomous_must_be_worth_one_point() {
        let (config, registry) = context();
        let value = choice_item(json!({"method": "dichotomous", "maxPoints": 2}));
        let diags = run(check, &value, &config, &registry);
        assert!(diags
            .iter()
            .any(|d| d.code == "SCORE-020" && d.severity == Severity::Critical));
    }

    #[test]
    fn non_integer_points_are_critical() {
        let (config, registry) = context();
        let value = choice_item(json!({"method": "dichotomous", "maxPoints": 1.5}));
        let diags = run(check, &value, &config, &registry);
        assert!(diags.iter().any(|d| d.code == "SCORE-011"));
    }

    #[test]
    fn unknown_method_is_critical() {
        let (config, registry) = context();
        let value = choice_item(json!({"method": "weighted", "maxPoints": 1}));
        let diags = run(check, &value, &config, &registry);
        assert!(diags.iter().any(|d| d.code == "SCORE-010"));
    }

    #[test]
    fn dangling_correct_option_is_critical() {
        let (config, registry) = context();
        let mut value = choice_item(json!({"method": "dichotomous", "maxPoints": 1}));
        value["correctOptionId"] = json!("z");
        let diags = run(check, &value, &config, &registry);
        assert!(diags
            .iter()
            .any(|d| d.code == "SCORE-030" && d.severity == Severity::Critical));
    }

    #[test]
    fn select_all_count_mismatch_is_a_warning() {
        let (config, registry) = context();
        let value = json!({
            "type": "selectAll",
            "options": [
                {"id": "a", "text": "A"}, {"id": "b", "text": "B"},
                {"id": "c", "text": "C"}, {"id": "d", "text": "D"},
            ],
            "correctOptionIds": ["a", "b", "c"],
            "scoring": {"method": "polytomous", "maxPoints": 1},
        });
        let diags = run(check, &value, &config, &registry);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "SCORE-021");
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn bowtie_tolerates_the_condition_point_as_info() {
        let (config, registry) = context();
        let value = json!({
            "type": "bowtie",
            "causes": [{"id": "c1", "text": "X"}, {"id": "c2", "text": "Y"}],
            "interventions": [{"id": "i1", "text": "P"}, {"id": "i2", "text": "Q"}],
            "correctCauseIds": ["c1", "c2"],
            "correctInterventionIds": ["i1"],
            "scoring": {"method": "polytomous", "maxPoints": 4},
        });
        let diags = run(check, &value, &config, &registry);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "SCORE-022");
        assert_eq!(diags[0].severity, Severity::Info);
    }

    #[test]
    fn matrix_match_ids_must_exist() {
        let (config, registry) = context();
        let value = json!({
            "type": "matrix",
            "rows": [{"id": "r1", "label": "Finding"}, {"id": "r2", "label": "Finding"}],
            "columns": [{"id": "k1", "label": "Expected"}, {"id": "k2", "label": "Concerning"}],
            "correctMatches": [{"rowId": "r1", "columnId": "k9"}],
            "scoring": {"method": "polytomous", "maxPoints": 2},
        });
        let diags = run(check, &value, &config, &registry);
        assert!(diags
            .iter()
            .any(|d| d.code == "SCORE-030" && d.field.as_deref() == Some("correctMatches.columnId")));
    }

    #[test]
    fn span_indices_are_range_checked_against_explicit_spans() {
        let (config, registry) = context();
        let value = json!({
            "type": "highlight",
            "passage": "The client reports sudden chest pain radiating to the left arm.",
            "spans": ["sudden chest pain", "radiating", "left arm"],
            "correctSpanIndices": [0, 5],
            "scoring": {"method": "polytomous", "maxPoints": 2},
        });
        let diags = run(check, &value, &config, &registry);
        assert!(diags.iter().any(|d| d.code == "SCORE-031"));
    }

    #[test]
    fn absent_scoring_yields_nothing_here() {
        let (config, registry) = context();
        let mut value = choice_item(json!(null));
        value.as_object_mut().unwrap().remove("scoring");
        assert!(run(check, &value, &config, &registry).is_empty());
    }
}
