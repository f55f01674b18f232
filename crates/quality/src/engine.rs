//! Audit engine - runs the checkers over one item or a whole bank.

use crate::checks::{self, CheckContext};
use crate::config::AuditConfig;
use crate::record::RecordView;
use crate::registry::TypeRegistry;
use crate::score;
use qbank_core::{
    BankReport, Diagnostic, Dimension, DimensionScores, DimensionTally, ItemReport, Verdict,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// The item quality engine.
///
/// Pure with respect to its inputs: auditing the same record twice yields
/// identical reports, and bank aggregates are independent of input order.
pub struct AuditEngine {
    config: AuditConfig,
    registry: TypeRegistry,
}

impl AuditEngine {
    /// An engine with default thresholds.
    pub fn new() -> Self {
        Self::with_config(AuditConfig::default())
    }

    /// An engine with explicit thresholds.
    pub fn with_config(config: AuditConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one record.
    ///
    /// Null or non-object input yields a synthetic single-diagnostic
    /// failure report rather than an error; one bad record must never
    /// stop a bank-wide run.
    pub fn audit_item(&self, record: &Value) -> ItemReport {
        let Some(view) = RecordView::from_value(record) else {
            tracing::warn!("record is not a JSON object; emitting synthetic failure report");
            return self.synthetic_failure();
        };

        tracing::debug!(
            item = view.id().as_deref().unwrap_or("<no id>"),
            "auditing item"
        );

        let ctx = CheckContext {
            config: &self.config,
            registry: &self.registry,
        };

        let mut diagnostics = Vec::new();
        let mut dimension_scores = DimensionScores::full();

        for (dimension, check) in checks::all() {
            let diags = check(&view, &ctx);
            let refs: Vec<&Diagnostic> = diags.iter().collect();
            dimension_scores.set(dimension, score::dimension_score(&refs));
            diagnostics.extend(diags);
        }

        ItemReport {
            item_id: view.id(),
            item_type: view.type_tag().map(str::to_string),
            verdict: score::verdict(&diagnostics),
            score: score::overall(&dimension_scores),
            dimension_scores,
            diagnostics,
        }
    }

    /// Audit a canonically-typed item by serializing it to its wire shape.
    pub fn audit(&self, item: &qbank_core::Item) -> ItemReport {
        self.audit_item(&item.to_value())
    }

    /// Audit a collection and reduce to bank-wide statistics.
    pub fn audit_bank(&self, records: &[Value]) -> BankReport {
        let reports: Vec<ItemReport> = records.iter().map(|r| self.audit_item(r)).collect();

        let mut passed = 0;
        let mut warned = 0;
        let mut failed = 0;
        let mut type_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut dimension_tallies: BTreeMap<String, DimensionTally> = Dimension::ALL
            .iter()
            .map(|d| (d.label().to_string(), DimensionTally::default()))
            .collect();

        for report in &reports {
            match report.verdict {
                Verdict::Pass => passed += 1,
                Verdict::Warn => warned += 1,
                Verdict::Fail => failed += 1,
            }

            let tag = report.item_type.clone().unwrap_or_else(|| "unknown".to_string());
            *type_distribution.entry(tag).or_insert(0) += 1;

            for dimension in Dimension::ALL {
                let refs: Vec<&Diagnostic> = report.for_dimension(dimension).collect();
                let tally = dimension_tallies
                    .get_mut(dimension.label())
                    .expect("tallies cover every dimension");
                match score::dimension_verdict(&refs) {
                    Verdict::Pass => tally.passed += 1,
                    Verdict::Warn => tally.warned += 1,
                    Verdict::Fail => tally.failed += 1,
                }
            }
        }

        let overall_score = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| r.score).sum::<f64>() / reports.len() as f64
        };

        tracing::debug!(
            total = reports.len(),
            passed,
            warned,
            failed,
            "bank audit complete"
        );

        BankReport {
            total: reports.len(),
            passed,
            warned,
            failed,
            overall_score,
            type_distribution,
            dimension_tallies,
            generated_at: chrono::Utc::now(),
        }
    }

    fn synthetic_failure(&self) -> ItemReport {
        let diagnostic = Diagnostic::critical(
            Dimension::Completeness,
            "ITEM-000",
            "record is not a JSON object",
        );
        let mut dimension_scores = DimensionScores::full();
        dimension_scores.set(
            Dimension::Completeness,
            score::dimension_score(&[&diagnostic]),
        );

        ItemReport {
            item_id: None,
            item_type: None,
            verdict: Verdict::Fail,
            score: score::overall(&dimension_scores),
            dimension_scores,
            diagnostics: vec![diagnostic],
        }
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_choice_item(id: &str) -> Value {
        json!({
            "id": id,
            "type": "multipleChoice",
            "stem": "Which assessment finding requires immediate follow-up?",
            "options": [
                {"id": "a", "text": "Heart rate 88"},
                {"id": "b", "text": "Oxygen saturation 84%"},
                {"id": "c", "text": "Respirations 18"},
                {"id": "d", "text": "Temperature 37.2"},
            ],
            "correctOptionId": "b",
            "scoring": {"method": "dichotomous", "maxPoints": 1},
            "rationale": {
                "whyCorrect": "Saturation of 84% indicates hypoxemia and is the priority finding.",
                "whyIncorrect": "The remaining values are within expected limits for this client.",
                "reviewUnits": ["oxygenation"],
            },
            "pedagogy": {
                "cognitiveLevel": "analyze",
                "judgmentStep": "recognizeCues",
                "contentCategory": "physiologicalAdaptation",
                "difficulty": 3,
                "tags": ["respiratory"],
            },
        })
    }

    fn warn_item(id: &str) -> Value {
        // three correct ids but a declared total of 1: a scoring warning
        let mut item = valid_choice_item(id);
        let map = item.as_object_mut().unwrap();
        map.insert("type".into(), json!("selectAll"));
        map.remove("correctOptionId");
        map.insert("correctOptionIds".into(), json!(["a", "b", "c"]));
        map.insert("scoring".into(), json!({"method": "polytomous", "maxPoints": 1}));
        item
    }

    fn fail_item(id: &str) -> Value {
        let mut item = valid_choice_item(id);
        item["correctOptionId"] = json!("z");
        item
    }

    #[test]
    fn pristine_item_passes_with_a_full_score() {
        let engine = AuditEngine::new();
        let report = engine.audit_item(&valid_choice_item("x1"));
        assert_eq!(report.verdict, Verdict::Pass, "{:?}", report.diagnostics);
        assert_eq!(report.score, 100.0);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.item_id.as_deref(), Some("x1"));
        assert_eq!(report.item_type.as_deref(), Some("multipleChoice"));
    }

    #[test]
    fn dangling_correctness_key_fails_the_item() {
        let engine = AuditEngine::new();
        let report = engine.audit_item(&fail_item("x2"));
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.diagnostics.iter().any(|d| d.code == "SCORE-030"));
        assert!(report.dimension_scores.scoring_accuracy < 100.0);
    }

    #[test]
    fn point_count_mismatch_only_warns() {
        let engine = AuditEngine::new();
        let report = engine.audit_item(&warn_item("x3"));
        assert_eq!(report.verdict, Verdict::Warn, "{:?}", report.diagnostics);
        assert!(report.diagnostics.iter().all(|d| d.code == "SCORE-021"));
    }

    #[test]
    fn auditing_is_idempotent() {
        let engine = AuditEngine::new();
        let item = warn_item("x4");
        let first = serde_json::to_string(&engine.audit_item(&item)).unwrap();
        let second = serde_json::to_string(&engine.audit_item(&item)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn any_critical_forces_fail_regardless_of_score() {
        let engine = AuditEngine::new();
        let report = engine.audit_item(&fail_item("x5"));
        assert!(report.score > 50.0, "one critical leaves a high numeric score");
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn non_object_input_becomes_a_synthetic_failure() {
        let engine = AuditEngine::new();
        for record in [Value::Null, json!("not an item"), json!([1, 2, 3])] {
            let report = engine.audit_item(&record);
            assert_eq!(report.verdict, Verdict::Fail);
            assert_eq!(report.diagnostics.len(), 1);
            assert_eq!(report.diagnostics[0].code, "ITEM-000");
        }
    }

    #[test]
    fn bank_counts_are_order_independent() {
        let engine = AuditEngine::new();
        let bank: Vec<Value> = vec![
            valid_choice_item("p1"),
            valid_choice_item("p2"),
            valid_choice_item("p3"),
            warn_item("w1"),
            warn_item("w2"),
            fail_item("f1"),
        ];
        let mut reversed = bank.clone();
        reversed.reverse();

        let forward = engine.audit_bank(&bank);
        let backward = engine.audit_bank(&reversed);

        assert_eq!(forward.total, 6);
        assert_eq!(forward.passed, 3);
        assert_eq!(forward.warned, 2);
        assert_eq!(forward.failed, 1);

        assert_eq!(forward.passed, backward.passed);
        assert_eq!(forward.warned, backward.warned);
        assert_eq!(forward.failed, backward.failed);
        assert_eq!(forward.overall_score, backward.overall_score);
        assert_eq!(forward.type_distribution, backward.type_distribution);
        assert_eq!(forward.dimension_tallies, backward.dimension_tallies);

        assert_eq!(forward.type_distribution["multipleChoice"], 4);
        assert_eq!(forward.type_distribution["selectAll"], 2);
    }

    #[test]
    fn bank_score_is_the_mean_of_item_scores() {
        let engine = AuditEngine::new();
        let bank = vec![valid_choice_item("p1"), fail_item("f1")];
        let expected: f64 = bank
            .iter()
            .map(|item| engine.audit_item(item).score)
            .sum::<f64>()
            / 2.0;
        let report = engine.audit_bank(&bank);
        assert_eq!(report.overall_score, expected);
    }

    #[test]
    fn empty_bank_reports_zeroes() {
        let engine = AuditEngine::new();
        let report = engine.audit_bank(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.overall_score, 0.0);
    }

    #[test]
    fn typed_items_audit_through_their_wire_shape() {
        use qbank_core::{
            ChoiceBody, Item, ItemBody, ItemOption, Pedagogy, Rationale, ScoringRule,
        };

        let item = Item {
            id: "q-typed".to_string(),
            stem: "Which assessment finding requires immediate follow-up?".to_string(),
            body: ItemBody::PriorityAction(ChoiceBody {
                options: vec![
                    ItemOption::new("a", "Reassess in 15 minutes"),
                    ItemOption::new("b", "Apply oxygen at 2 L/min"),
                ],
                correct_option_id: "b".to_string(),
                exhibit: None,
            }),
            scoring: Some(ScoringRule::dichotomous()),
            pedagogy: Some(Pedagogy::neutral()),
            rationale: Some(Rationale {
                why_correct: "Oxygen addresses the hypoxemia driving the presentation."
                    .to_string(),
                why_incorrect: "Waiting delays treatment of a worsening airway problem."
                    .to_string(),
                review_units: vec!["oxygenation".to_string()],
                pearls: None,
                trap: None,
                mnemonic: None,
                option_breakdown: None,
            }),
            case_narrative: None,
            vitals_timeline: None,
        };

        let report = AuditEngine::new().audit(&item);
        assert_eq!(report.verdict, Verdict::Pass, "{:?}", report.diagnostics);
        assert_eq!(report.item_type.as_deref(), Some("priorityAction"));
    }

    #[test]
    fn bank_tallies_attribute_dimensions() {
        let engine = AuditEngine::new();
        let report = engine.audit_bank(&[valid_choice_item("p1"), fail_item("f1")]);
        let scoring = &report.dimension_tallies["scoringAccuracy"];
        assert_eq!(scoring.passed, 1);
        assert_eq!(scoring.failed, 1);
        let completeness = &report.dimension_tallies["completeness"];
        assert_eq!(completeness.passed, 2);
    }
}
