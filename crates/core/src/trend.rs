#![forbid(unsafe_code)]

//! Tone-trend classification (the burnout signal).
//!
//! Chronologically ordered tone scores are split into halves and the half
//! means compared. Thresholds are on the 0-100 comparison scale; callers
//! holding canonical 0-10 scores upscale by 10 before classifying.

pub const TREND_MIN_POINTS: usize = 3;
pub const TREND_DELTA: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneTrend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

impl ToneTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// Scores must be in chronological order. Non-positive scores are treated
/// as "no tone recorded" and dropped before classification. Odd counts put
/// the extra point in the second (more recent) half.
pub fn classify_tone_trend(scores: &[f64]) -> ToneTrend {
    let valid: Vec<f64> = scores.iter().copied().filter(|score| *score > 0.0).collect();

    if valid.len() < TREND_MIN_POINTS {
        return ToneTrend::InsufficientData;
    }

    let split = valid.len() / 2;
    let first = mean(&valid[..split]);
    let second = mean(&valid[split..]);
    let diff = second - first;

    if diff < -TREND_DELTA {
        ToneTrend::Declining
    } else if diff > TREND_DELTA {
        ToneTrend::Improving
    } else {
        ToneTrend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
