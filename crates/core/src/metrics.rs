#![forbid(unsafe_code)]

//! Scalar metric extraction from a normalized analysis tree.
//!
//! Pure and deterministic: path precedence between schema generations is
//! already resolved by the normalizer, so extraction is a straight read of
//! the tree. Same `Analysis` in, same metrics out.

use crate::analysis::Analysis;

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarMetrics {
    pub business_value: i64,
    pub solid_compliance: i64,
    /// Mean of the reviewers' canonical tone scores, rounded to 2 decimals.
    /// Zero reviewers (or zero coercible scores) yields 0.0, never NaN.
    pub tone_score: f64,
    pub health_status: String,
    pub risk_level: String,
    pub change_type: String,
}

pub fn extract_metrics(analysis: &Analysis) -> ScalarMetrics {
    ScalarMetrics {
        business_value: analysis.executive_summary.business_value_clarity,
        solid_compliance: analysis.author.quality_metrics.solid_compliance,
        tone_score: average_tone(analysis),
        health_status: analysis.executive_summary.overall_health_status.clone(),
        risk_level: analysis.classification.risk_level.clone(),
        change_type: analysis.classification.change_type.clone(),
    }
}

fn average_tone(analysis: &Analysis) -> f64 {
    let scores: Vec<f64> = analysis
        .reviewers
        .iter()
        .filter_map(|reviewer| reviewer.behavioral.tone_score)
        .collect();

    if scores.is_empty() {
        return 0.0;
    }

    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
