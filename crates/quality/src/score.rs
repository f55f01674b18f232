//! Score aggregation - dimension decay, weighted overall, verdict.

use qbank_core::{Diagnostic, Dimension, DimensionScores, Severity, Verdict};

/// Fixed dimension weights; they sum to 100.
pub fn weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Completeness => 20.0,
        Dimension::TypeStructure => 20.0,
        Dimension::ScoringAccuracy => 20.0,
        Dimension::Pedagogy => 10.0,
        Dimension::RationaleQuality => 10.0,
        Dimension::OptionLogic => 10.0,
        Dimension::DataReferences => 5.0,
        Dimension::ErrorDetection => 5.0,
    }
}

/// Collapse one dimension's diagnostics to a 0-100 score.
///
/// Criticals dominate: each costs 40 (plus 10 per concurrent warning),
/// floored at 0. Without criticals, warnings cost 15 and infos 5, floored
/// at 40. Info-only dimensions floor at 80.
pub fn dimension_score(diagnostics: &[&Diagnostic]) -> f64 {
    let critical = count(diagnostics, Severity::Critical) as i64;
    let warning = count(diagnostics, Severity::Warning) as i64;
    let info = count(diagnostics, Severity::Info) as i64;

    let score = if critical > 0 {
        (100 - 40 * critical - 10 * warning).max(0)
    } else if warning > 0 {
        (100 - 15 * warning - 5 * info).max(40)
    } else if info > 0 {
        (100 - 5 * info).max(80)
    } else {
        100
    };

    score as f64
}

/// The verdict for one dimension's diagnostics.
pub fn dimension_verdict(diagnostics: &[&Diagnostic]) -> Verdict {
    severity_verdict(diagnostics.iter().map(|d| d.severity))
}

/// The item verdict, driven by raw severities rather than the numeric
/// score.
pub fn verdict(diagnostics: &[Diagnostic]) -> Verdict {
    severity_verdict(diagnostics.iter().map(|d| d.severity))
}

/// The weighted overall score across all eight dimensions.
pub fn overall(scores: &DimensionScores) -> f64 {
    let weighted: f64 = Dimension::ALL
        .iter()
        .map(|&dim| scores.get(dim) * weight(dim))
        .sum();
    weighted / 100.0
}

fn severity_verdict(severities: impl Iterator<Item = Severity>) -> Verdict {
    match severities.max() {
        Some(Severity::Critical) => Verdict::Fail,
        Some(Severity::Warning) => Verdict::Warn,
        _ => Verdict::Pass,
    }
}

fn count(diagnostics: &[&Diagnostic], severity: Severity) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .count()
}
