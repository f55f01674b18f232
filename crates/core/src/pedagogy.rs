//! Pedagogy taxonomy - cognitive level, clinical judgment step, content category.

use serde::{Deserialize, Serialize};

/// Bloom-style cognitive level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CognitiveLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl CognitiveLevel {
    /// Every level.
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Remember,
        CognitiveLevel::Understand,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
        CognitiveLevel::Evaluate,
        CognitiveLevel::Create,
    ];

    /// The canonical tag.
    pub fn tag(&self) -> &'static str {
        match self {
            CognitiveLevel::Remember => "remember",
            CognitiveLevel::Understand => "understand",
            CognitiveLevel::Apply => "apply",
            CognitiveLevel::Analyze => "analyze",
            CognitiveLevel::Evaluate => "evaluate",
            CognitiveLevel::Create => "create",
        }
    }

    /// Resolve a value tolerating casing/punctuation variants.
    pub fn from_loose(value: &str) -> Option<Self> {
        let folded = fold(value);
        Self::ALL.iter().copied().find(|v| fold(v.tag()) == folded)
    }
}

/// Clinical judgment step (the six-step measurement model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JudgmentStep {
    RecognizeCues,
    AnalyzeCues,
    PrioritizeHypotheses,
    GenerateSolutions,
    TakeAction,
    EvaluateOutcomes,
}

impl JudgmentStep {
    /// Every step.
    pub const ALL: [JudgmentStep; 6] = [
        JudgmentStep::RecognizeCues,
        JudgmentStep::AnalyzeCues,
        JudgmentStep::PrioritizeHypotheses,
        JudgmentStep::GenerateSolutions,
        JudgmentStep::TakeAction,
        JudgmentStep::EvaluateOutcomes,
    ];

    /// The canonical tag.
    pub fn tag(&self) -> &'static str {
        match self {
            JudgmentStep::RecognizeCues => "recognizeCues",
            JudgmentStep::AnalyzeCues => "analyzeCues",
            JudgmentStep::PrioritizeHypotheses => "prioritizeHypotheses",
            JudgmentStep::GenerateSolutions => "generateSolutions",
            JudgmentStep::TakeAction => "takeAction",
            JudgmentStep::EvaluateOutcomes => "evaluateOutcomes",
        }
    }

    /// Resolve a value tolerating casing/punctuation variants
    /// ("Recognize Cues", "take_action").
    pub fn from_loose(value: &str) -> Option<Self> {
        let folded = fold(value);
        Self::ALL.iter().copied().find(|v| fold(v.tag()) == folded)
    }
}

/// Content category for the exam blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentCategory {
    ManagementOfCare,
    SafetyAndInfectionControl,
    HealthPromotion,
    PsychosocialIntegrity,
    BasicCareAndComfort,
    PharmacologicalTherapies,
    RiskReduction,
    PhysiologicalAdaptation,
}

impl ContentCategory {
    /// Every category.
    pub const ALL: [ContentCategory; 8] = [
        ContentCategory::ManagementOfCare,
        ContentCategory::SafetyAndInfectionControl,
        ContentCategory::HealthPromotion,
        ContentCategory::PsychosocialIntegrity,
        ContentCategory::BasicCareAndComfort,
        ContentCategory::PharmacologicalTherapies,
        ContentCategory::RiskReduction,
        ContentCategory::PhysiologicalAdaptation,
    ];

    /// The canonical tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ContentCategory::ManagementOfCare => "managementOfCare",
            ContentCategory::SafetyAndInfectionControl => "safetyAndInfectionControl",
            ContentCategory::HealthPromotion => "healthPromotion",
            ContentCategory::PsychosocialIntegrity => "psychosocialIntegrity",
            ContentCategory::BasicCareAndComfort => "basicCareAndComfort",
            ContentCategory::PharmacologicalTherapies => "pharmacologicalTherapies",
            ContentCategory::RiskReduction => "riskReduction",
            ContentCategory::PhysiologicalAdaptation => "physiologicalAdaptation",
        }
    }

    /// Resolve a value tolerating casing/punctuation variants.
    pub fn from_loose(value: &str) -> Option<Self> {
        let folded = fold(value);
        Self::ALL.iter().copied().find(|v| fold(v.tag()) == folded)
    }
}

fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '&' | '/'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Taxonomy metadata attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedagogy {
    /// Cognitive level
    pub cognitive_level: CognitiveLevel,

    /// Clinical judgment step
    pub judgment_step: JudgmentStep,

    /// Content category
    pub content_category: ContentCategory,

    /// Difficulty, 1 (easiest) through 5
    pub difficulty: u8,

    /// Free-form topic tags; should be non-empty
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Pedagogy {
    /// A neutral taxonomy entry used when a record declares none.
    pub fn neutral() -> Self {
        Self {
            cognitive_level: CognitiveLevel::Apply,
            judgment_step: JudgmentStep::TakeAction,
            content_category: ContentCategory::PhysiologicalAdaptation,
            difficulty: 3,
            tags: vec!["unclassified".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parsing_accepts_title_case() {
        assert_eq!(
            JudgmentStep::from_loose("Recognize Cues"),
            Some(JudgmentStep::RecognizeCues)
        );
        assert_eq!(
            CognitiveLevel::from_loose("ANALYZE"),
            Some(CognitiveLevel::Analyze)
        );
        assert_eq!(
            ContentCategory::from_loose("safety_and_infection_control"),
            Some(ContentCategory::SafetyAndInfectionControl)
        );
        assert_eq!(CognitiveLevel::from_loose("memorize"), None);
    }

    #[test]
    fn pedagogy_serializes_camel_case() {
        let value = serde_json::to_value(Pedagogy::neutral()).unwrap();
        assert_eq!(value["cognitiveLevel"], "apply");
        assert_eq!(value["judgmentStep"], "takeAction");
        assert_eq!(value["contentCategory"], "physiologicalAdaptation");
        assert_eq!(value["difficulty"], 3);
    }
}
