//! Conservative defaults for non-fatal gaps.

use qbank_core::{ItemKind, Pedagogy};
use qbank_quality::RecordView;
use serde_json::{json, Value};

/// A scoring rule derived from the item's own correctness cardinality.
///
/// Only called for records that passed logic verification, so the
/// correctness structures a kind requires are known to be present.
pub fn default_scoring(kind: ItemKind, view: &RecordView<'_>) -> Value {
    if kind.is_simple_choice() || kind == ItemKind::Ordering {
        return json!({"method": "dichotomous", "maxPoints": 1});
    }

    let points = match kind {
        ItemKind::SelectAll => view.strings_of("correctOptionIds").len(),
        ItemKind::SelectN => view
            .int_field("n")
            .map(|n| n.max(1) as usize)
            .unwrap_or_else(|| view.strings_of("correctOptionIds").len()),
        ItemKind::Highlight => view.array("correctSpanIndices").map_or(1, <[Value]>::len),
        ItemKind::Cloze | ItemKind::DragAndDrop => view.array("blanks").map_or(1, <[Value]>::len),
        ItemKind::Matrix => view.array("rows").map_or(1, <[Value]>::len),
        ItemKind::Bowtie => {
            view.strings_of("correctCauseIds").len()
                + view.strings_of("correctInterventionIds").len()
        }
        ItemKind::Hotspot => view.strings_of("correctHotspotIds").len(),
        _ => 1,
    };

    if points <= 1 {
        json!({"method": "dichotomous", "maxPoints": 1})
    } else {
        json!({"method": "polytomous", "maxPoints": points})
    }
}

/// The fixed neutral taxonomy entry.
pub fn default_pedagogy() -> Value {
    serde_json::to_value(Pedagogy::neutral()).expect("neutral pedagogy serializes")
}

/// A minimal rationale scaffold; the audit still flags it as thin, which
/// is the intended signal for a human pass.
pub fn default_rationale() -> Value {
    json!({
        "whyCorrect": "Review the keyed response against the findings in the stem.",
        "whyIncorrect": "Review why each remaining option does not fit the findings.",
        "reviewUnits": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simple_choice_defaults_to_one_point() {
        let value = json!({"options": [{"id": "a"}, {"id": "b"}], "correctOptionId": "a"});
        let view = RecordView::from_value(&value).unwrap();
        let scoring = default_scoring(ItemKind::MultipleChoice, &view);
        assert_eq!(scoring["method"], "dichotomous");
        assert_eq!(scoring["maxPoints"], 1);
    }

    #[test]
    fn bowtie_default_counts_both_sides() {
        let value = json!({
            "correctCauseIds": ["c1", "c2"],
            "correctInterventionIds": ["i1"],
        });
        let view = RecordView::from_value(&value).unwrap();
        let scoring = default_scoring(ItemKind::Bowtie, &view);
        assert_eq!(scoring["method"], "polytomous");
        assert_eq!(scoring["maxPoints"], 3);
    }

    #[test]
    fn cloze_default_counts_blanks() {
        let value = json!({"blanks": [{"id": "b1"}, {"id": "b2"}]});
        let view = RecordView::from_value(&value).unwrap();
        assert_eq!(default_scoring(ItemKind::Cloze, &view)["maxPoints"], 2);
    }

    #[test]
    fn neutral_pedagogy_is_vocabulary_valid() {
        let pedagogy = default_pedagogy();
        assert_eq!(pedagogy["cognitiveLevel"], "apply");
        assert_eq!(pedagogy["difficulty"], 3);
        assert_eq!(pedagogy["tags"][0], "unclassified");
    }
}
