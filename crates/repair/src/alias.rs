//! Alias tables - the finite set of accepted field spellings.
//!
//! Authored banks arrive with a known, bounded set of alternate field
//! names. They are listed here explicitly and consulted once per pass;
//! nothing probes for arbitrary names at runtime.

use qbank_core::ItemKind;

/// One rename rule: canonical name, then the accepted aliases.
pub type AliasRule = (&'static str, &'static [&'static str]);

/// Identity fields resolved at normalization entry.
pub const IDENTITY_ALIASES: &[AliasRule] = &[
    ("id", &["masterId", "master_id", "itemId"]),
    ("type", &["itemType", "questionType", "question_type"]),
    ("stem", &["prompt", "question"]),
];

/// Common-section aliases resolved alongside identity.
pub const SECTION_ALIASES: &[AliasRule] = &[
    ("rationale", &["explanation"]),
    ("caseNarrative", &["narrative", "caseStudy"]),
];

/// Type-specific aliases resolved during deep repair.
pub fn kind_aliases(kind: ItemKind) -> &'static [AliasRule] {
    if kind.is_simple_choice() {
        return &[("correctOptionId", &["answer", "correctAnswer"])];
    }
    match kind {
        ItemKind::SelectAll | ItemKind::SelectN => {
            &[("correctOptionIds", &["answers", "correctAnswers"])]
        }
        ItemKind::Bowtie => &[
            ("causes", &["conditions", "parameters"]),
            ("interventions", &["actions"]),
            ("correctCauseIds", &["correctConditionIds"]),
            ("correctInterventionIds", &["correctActionIds"]),
        ],
        ItemKind::Ordering => &[("correctOrder", &["correctSequence", "order"])],
        ItemKind::Highlight => &[("correctSpanIndices", &["correctSpans"])],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowtie_aliases_cover_both_sides() {
        let rules = kind_aliases(ItemKind::Bowtie);
        assert!(rules.iter().any(|(c, _)| *c == "causes"));
        assert!(rules.iter().any(|(c, _)| *c == "interventions"));
    }

    #[test]
    fn simple_choice_kinds_share_answer_aliases() {
        for kind in [ItemKind::MultipleChoice, ItemKind::Trend] {
            assert_eq!(kind_aliases(kind)[0].0, "correctOptionId");
        }
        assert!(kind_aliases(ItemKind::Matrix).is_empty());
    }
}
