//! Deterministic normalization and repair.
//!
//! A fixed pipeline per record: identity synthesis, the id/type hard
//! gate, type-tag canonicalization, per-kind deep repair, logic
//! verification, and defaults for non-fatal gaps. Every change is
//! recorded; records with unrecoverable defects are quarantined with a
//! reason rather than guessed at. Input is never mutated in place.

use crate::alias::{self, AliasRule};
use crate::defaults;
use qbank_core::ItemKind;
use qbank_quality::{registry, RecordView};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal state of one normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairState {
    /// No change was needed
    Perfect,
    /// Structural fixes were applied
    Healed,
    /// An unrecoverable defect was found
    Quarantined,
}

/// The result of normalizing one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairOutcome {
    /// Terminal state
    pub state: RepairState,

    /// The resulting record; `None` when quarantined
    pub item: Option<Value>,

    /// Every structural change applied, in order
    pub changes: Vec<String>,

    /// Why the record was quarantined, when it was
    pub reasons: Vec<String>,
}

impl RepairOutcome {
    /// The resulting record parsed into the canonical typed model, when it
    /// fits.
    pub fn to_typed(&self) -> Option<qbank_core::Item> {
        self.item
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    fn quarantined(reasons: Vec<String>, changes: Vec<String>) -> Self {
        Self {
            state: RepairState::Quarantined,
            item: None,
            changes,
            reasons,
        }
    }
}

/// The deterministic repair engine.
///
/// Stateless; normalizing the same record always yields the same outcome.
/// Escalation to an external proposer is a separate path and never happens
/// here.
pub struct Normalizer;

impl Normalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize one record.
    pub fn normalize(&self, record: &Value) -> RepairOutcome {
        let Some(original) = record.as_object() else {
            return RepairOutcome::quarantined(vec!["not_an_object".to_string()], Vec::new());
        };

        let mut map = original.clone();
        let mut changes = Vec::new();

        self.synthesize_identity(&mut map, &mut changes);

        if !has_identity(&map) {
            tracing::warn!("record has no id/type after synthesis; quarantining");
            return RepairOutcome::quarantined(vec!["missing_id_or_type".to_string()], changes);
        }

        let kind = match self.canonicalize_tag(&mut map, &mut changes) {
            Ok(kind) => kind,
            Err(reason) => {
                return RepairOutcome::quarantined(vec![reason], changes);
            }
        };

        self.deep_repair(kind, &mut map, &mut changes);

        let mut reasons = Vec::new();
        self.verify_logic(kind, &mut map, &mut changes, &mut reasons);
        if !reasons.is_empty() {
            tracing::warn!(kind = %kind, reasons = ?reasons, "quarantining record");
            return RepairOutcome::quarantined(reasons, changes);
        }

        self.fill_defaults(kind, &mut map, &mut changes);

        if changes.is_empty() {
            RepairOutcome {
                state: RepairState::Perfect,
                item: Some(record.clone()),
                changes,
                reasons: Vec::new(),
            }
        } else {
            tracing::debug!(count = changes.len(), "healed record");
            RepairOutcome {
                state: RepairState::Healed,
                item: Some(Value::Object(map)),
                changes,
                reasons: Vec::new(),
            }
        }
    }

    /// Coerce alias field names into canonical names, and infer a bowtie
    /// type when bowtie-shaped fields are present without any `type`.
    fn synthesize_identity(&self, map: &mut Map<String, Value>, changes: &mut Vec<String>) {
        apply_aliases(map, alias::IDENTITY_ALIASES, changes);
        apply_aliases(map, alias::SECTION_ALIASES, changes);

        let untyped = map
            .get("type")
            .and_then(Value::as_str)
            .map(|t| t.trim().is_empty())
            .unwrap_or(true);
        if untyped && looks_like_bowtie(map) {
            map.insert("type".to_string(), Value::String("bowtie".to_string()));
            changes.push("inferred type bowtie from field shape".to_string());
        }
    }

    /// Map casing/punctuation variants of known tags to canonical
    /// spellings.
    fn canonicalize_tag(
        &self,
        map: &mut Map<String, Value>,
        changes: &mut Vec<String>,
    ) -> Result<ItemKind, String> {
        let raw = map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let Some(kind) = ItemKind::from_loose_tag(&raw) else {
            return Err("unknown_type".to_string());
        };

        if raw != kind.tag() {
            map.insert("type".to_string(), Value::String(kind.tag().to_string()));
            changes.push(format!("canonicalized type \"{raw}\" to \"{}\"", kind.tag()));
        }
        Ok(kind)
    }

    /// Type-specific field aliasing and template-syntax normalization.
    fn deep_repair(&self, kind: ItemKind, map: &mut Map<String, Value>, changes: &mut Vec<String>) {
        apply_aliases(map, alias::kind_aliases(kind), changes);

        if matches!(kind, ItemKind::Cloze | ItemKind::DragAndDrop) {
            self.rewrite_placeholders(map, changes);
        }
    }

    /// Rewrite bracketed `[id]` blank markers to the canonical `{{id}}`
    /// placeholder syntax.
    fn rewrite_placeholders(&self, map: &mut Map<String, Value>, changes: &mut Vec<String>) {
        let blank_ids: Vec<String> = map
            .get("blanks")
            .and_then(Value::as_array)
            .map(|blanks| {
                blanks
                    .iter()
                    .filter_map(|b| b.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let Some(template) = map.get("template").and_then(Value::as_str) else {
            return;
        };
        let mut template = template.to_string();
        let mut rewritten = Vec::new();

        for id in blank_ids {
            let canonical = format!("{{{{{id}}}}}");
            let bracketed = format!("[{id}]");
            if !template.contains(&canonical) && template.contains(&bracketed) {
                template = template.replace(&bracketed, &canonical);
                rewritten.push(id);
            }
        }

        if !rewritten.is_empty() {
            map.insert("template".to_string(), Value::String(template));
            changes.push(format!(
                "rewrote bracketed placeholder(s) for blank(s): {}",
                rewritten.join(", ")
            ));
        }
    }

    /// Type-specific hard invariants. A simple-choice item missing its
    /// correctness key gets a best-effort default; shapes whose correctness
    /// structures cannot be safely guessed are quarantined instead.
    fn verify_logic(
        &self,
        kind: ItemKind,
        map: &mut Map<String, Value>,
        changes: &mut Vec<String>,
        reasons: &mut Vec<String>,
    ) {
        if kind.is_simple_choice() {
            if map.get("correctOptionId").and_then(Value::as_str).is_none() {
                let first = {
                    let view = RecordView::new(map);
                    view.ids_of("options").first().map(|id| id.to_string())
                };
                match first {
                    Some(id) => {
                        map.insert("correctOptionId".to_string(), Value::String(id.clone()));
                        changes.push(format!("defaulted correctOptionId to first option \"{id}\""));
                    }
                    None => reasons.push("missing_correct_keys".to_string()),
                }
            }
            return;
        }

        let view = RecordView::new(map);
        match kind {
            ItemKind::SelectAll | ItemKind::SelectN => {
                if view.strings_of("correctOptionIds").is_empty() {
                    reasons.push("missing_correct_keys".to_string());
                }
            }
            ItemKind::Ordering => {
                if view.strings_of("correctOrder").is_empty() {
                    reasons.push("ordering_missing_structure".to_string());
                }
            }
            ItemKind::Highlight => {
                if view.str_field("passage").is_none()
                    || view.array("correctSpanIndices").map_or(true, <[Value]>::is_empty)
                {
                    reasons.push("highlight_missing_structure".to_string());
                }
            }
            ItemKind::Matrix => {
                if view.array("rows").is_none()
                    || view.array("columns").is_none()
                    || view.array("correctMatches").map_or(true, <[Value]>::is_empty)
                {
                    reasons.push("matrix_missing_structure".to_string());
                }
            }
            ItemKind::Cloze | ItemKind::DragAndDrop => {
                let blanks_ok = view.array("blanks").is_some_and(|blanks| {
                    !blanks.is_empty()
                        && blanks.iter().all(|b| {
                            b.get("correctOption").and_then(Value::as_str).is_some()
                        })
                });
                if view.str_field("template").is_none() || !blanks_ok {
                    reasons.push("cloze_missing_structure".to_string());
                }
            }
            ItemKind::Bowtie => {
                if view.array("causes").is_none()
                    || view.array("interventions").is_none()
                    || view.strings_of("correctCauseIds").is_empty()
                    || view.strings_of("correctInterventionIds").is_empty()
                {
                    reasons.push("bowtie_missing_structure".to_string());
                }
            }
            ItemKind::Hotspot => {
                if view.array("hotspots").is_none()
                    || view.strings_of("correctHotspotIds").is_empty()
                {
                    reasons.push("hotspot_missing_structure".to_string());
                }
            }
            _ => {}
        }
    }

    /// Fill missing scoring, pedagogy, and rationale with conservative
    /// defaults.
    fn fill_defaults(&self, kind: ItemKind, map: &mut Map<String, Value>, changes: &mut Vec<String>) {
        let scoring = {
            let view = RecordView::new(map);
            view.get("scoring").is_none().then(|| defaults::default_scoring(kind, &view))
        };
        if let Some(scoring) = scoring {
            map.insert("scoring".to_string(), scoring);
            changes.push("defaulted scoring from correctness cardinality".to_string());
        }

        if map.get("pedagogy").map(Value::is_null).unwrap_or(true) {
            map.insert("pedagogy".to_string(), defaults::default_pedagogy());
            changes.push("defaulted pedagogy to the neutral taxonomy entry".to_string());
        }

        if map.get("rationale").map(Value::is_null).unwrap_or(true) {
            map.insert("rationale".to_string(), defaults::default_rationale());
            changes.push("defaulted rationale to the review scaffold".to_string());
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn has_identity(map: &Map<String, Value>) -> bool {
    let id_ok = RecordView::new(map).id().is_some();
    let type_ok = map
        .get("type")
        .and_then(Value::as_str)
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    id_ok && type_ok
}

fn looks_like_bowtie(map: &Map<String, Value>) -> bool {
    let view = RecordView::new(map);
    let has_causes = registry::alias::BOWTIE_CAUSES
        .iter()
        .any(|name| view.get(name).is_some());
    let has_interventions = registry::alias::BOWTIE_INTERVENTIONS
        .iter()
        .any(|name| view.get(name).is_some());
    has_causes && has_interventions
}

fn apply_aliases(map: &mut Map<String, Value>, rules: &[AliasRule], changes: &mut Vec<String>) {
    for (canonical, aliases) in rules {
        if map.get(*canonical).map(|v| !v.is_null()).unwrap_or(false) {
            continue;
        }
        for name in *aliases {
            if let Some(value) = map.remove(*name) {
                if value.is_null() {
                    continue;
                }
                map.insert((*canonical).to_string(), value);
                changes.push(format!("renamed \"{name}\" to \"{canonical}\""));
                break;
            }
        }
    }
}
