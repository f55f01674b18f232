//! Type registry - the per-shape structural contract.

use qbank_core::ItemKind;
use std::collections::HashMap;

/// Accepted spellings for aliased collection fields, canonical first.
///
/// Shared by the registry's contracts, the scoring cross-checks, and the
/// normalizer's rewrite pass.
pub mod alias {
    /// Bowtie cause-side collection
    pub const BOWTIE_CAUSES: &[&str] = &["causes", "conditions", "parameters"];
    /// Bowtie intervention-side collection
    pub const BOWTIE_INTERVENTIONS: &[&str] = &["interventions", "actions"];
    /// Bowtie cause-side correctness key
    pub const BOWTIE_CORRECT_CAUSES: &[&str] = &["correctCauseIds", "correctConditionIds"];
    /// Bowtie intervention-side correctness key
    pub const BOWTIE_CORRECT_INTERVENTIONS: &[&str] =
        &["correctInterventionIds", "correctActionIds"];
}

/// The required shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A string of at least `min_len` characters
    Text {
        /// Minimum character count
        min_len: usize,
    },
    /// An array of at least `min_len` entries
    Array {
        /// Minimum entry count
        min_len: usize,
    },
    /// An integer
    Integer,
}

/// One required field, with the spellings the contract accepts.
///
/// The first name is canonical; the rest are documented aliases the
/// normalizer rewrites but the registry tolerates, so an audit before
/// normalization reads the same as one after.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Accepted field names, canonical first
    pub names: &'static [&'static str],
    /// Required shape
    pub shape: FieldShape,
}

impl FieldRule {
    /// The canonical field name.
    pub fn canonical(&self) -> &'static str {
        self.names[0]
    }
}

/// The structural contract for one item kind.
#[derive(Debug, Clone)]
pub struct TypeRule {
    /// Required fields
    pub fields: Vec<FieldRule>,
}

const fn text(names: &'static [&'static str], min_len: usize) -> FieldRule {
    FieldRule {
        names,
        shape: FieldShape::Text { min_len },
    }
}

const fn array(names: &'static [&'static str], min_len: usize) -> FieldRule {
    FieldRule {
        names,
        shape: FieldShape::Array { min_len },
    }
}

const fn integer(names: &'static [&'static str]) -> FieldRule {
    FieldRule {
        names,
        shape: FieldShape::Integer,
    }
}

/// Registry of structural contracts, keyed by item kind.
pub struct TypeRegistry {
    rules: HashMap<ItemKind, TypeRule>,
}

impl TypeRegistry {
    /// Build the registry for every recognized kind.
    pub fn new() -> Self {
        let mut rules = HashMap::new();

        for kind in ItemKind::ALL {
            rules.insert(kind, Self::rule_for(kind));
        }

        Self { rules }
    }

    /// Whether a raw tag names a recognized kind, tolerating casing and
    /// punctuation variants.
    pub fn recognize(&self, tag: &str) -> Option<ItemKind> {
        ItemKind::from_loose_tag(tag)
    }

    /// The contract for a kind.
    pub fn rule(&self, kind: ItemKind) -> &TypeRule {
        &self.rules[&kind]
    }

    /// Every registered kind.
    pub fn kinds(&self) -> impl Iterator<Item = ItemKind> + '_ {
        self.rules.keys().copied()
    }

    fn rule_for(kind: ItemKind) -> TypeRule {
        let fields = match kind {
            ItemKind::SelectAll => vec![
                array(&["options"], 4),
                array(&["correctOptionIds"], 2),
            ],
            ItemKind::SelectN => vec![
                array(&["options"], 4),
                array(&["correctOptionIds"], 2),
                integer(&["n"]),
            ],
            ItemKind::Highlight => vec![
                text(&["passage"], 30),
                array(&["correctSpanIndices"], 1),
            ],
            ItemKind::Ordering => vec![
                array(&["options"], 3),
                array(&["correctOrder"], 1),
            ],
            ItemKind::Matrix => vec![
                array(&["rows"], 2),
                array(&["columns"], 2),
                array(&["correctMatches"], 1),
            ],
            ItemKind::Cloze | ItemKind::DragAndDrop => vec![
                text(&["template"], 1),
                array(&["blanks"], 1),
            ],
            ItemKind::Bowtie => vec![
                array(alias::BOWTIE_CAUSES, 2),
                array(alias::BOWTIE_INTERVENTIONS, 2),
                array(alias::BOWTIE_CORRECT_CAUSES, 1),
                array(alias::BOWTIE_CORRECT_INTERVENTIONS, 1),
            ],
            ItemKind::Hotspot => vec![
                array(&["hotspots"], 1),
                array(&["correctHotspotIds"], 1),
            ],
            // the simple-choice family shares one contract
            _ => vec![
                array(&["options"], 2),
                text(&["correctOptionId"], 1),
            ],
        };

        TypeRule { fields }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
