use super::UNKNOWN;
use super::raw::{f64_at, int_at, lookup, opt_str_at, str_at};
use serde::Serialize;
use serde_json::Value;

/// Upper bound of the canonical tone scale. The legacy generation scores
/// tone 0-10; the current generation 0-100. Values above the canonical
/// bound are read as 0-100 and divided by 10 at normalization, so every
/// stored tone score is 0-10.
pub const TONE_SCALE_MAX: f64 = 10.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReviewerAnalytics {
    #[serde(rename = "reviewer_login")]
    pub login: String,
    #[serde(rename = "engagement_metrics")]
    pub engagement: EngagementMetrics,
    #[serde(rename = "behavioral_metrics")]
    pub behavioral: BehavioralMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_breakdown: Option<CategoryBreakdown>,
    #[serde(rename = "feedback_samples")]
    pub feedback: FeedbackSamples,
}

impl ReviewerAnalytics {
    pub(super) fn list_from_raw(root: &Value) -> Vec<Self> {
        let Some(items) = root.get("reviewers_analytics").and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|item| item.is_object())
            .map(Self::from_raw)
            .collect()
    }

    fn from_raw(item: &Value) -> Self {
        Self {
            login: str_at(
                item,
                &["reviewer_login", "reviewer_name", "reviewer", "name"],
                UNKNOWN,
            ),
            engagement: EngagementMetrics::from_raw(item),
            behavioral: BehavioralMetrics::from_raw(item),
            category_breakdown: CategoryBreakdown::from_raw(item),
            feedback: FeedbackSamples::from_raw(item),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngagementMetrics {
    pub total_comments: i64,
    pub nitpicking_ratio: f64,
    pub response_speed_rating: String,
}

impl EngagementMetrics {
    fn from_raw(item: &Value) -> Self {
        Self {
            total_comments: int_at(
                item,
                &["engagement_metrics.total_comments", "total_comments"],
                0,
            ),
            nitpicking_ratio: f64_at(
                item,
                &["engagement_metrics.nitpicking_ratio", "nitpicking_ratio"],
            )
            .unwrap_or(0.0),
            response_speed_rating: str_at(
                item,
                &[
                    "engagement_metrics.response_speed_rating",
                    "response_speed_rating",
                ],
                "normal",
            ),
        }
    }
}

impl Default for EngagementMetrics {
    fn default() -> Self {
        Self {
            total_comments: 0,
            nitpicking_ratio: 0.0,
            response_speed_rating: "normal".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BehavioralMetrics {
    /// Canonical 0-10 tone score; `None` when the reviewer contributed no
    /// coercible tone value (such reviewers are excluded from averages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_score: Option<f64>,
    pub mentorship_score: i64,
}

impl BehavioralMetrics {
    fn from_raw(item: &Value) -> Self {
        Self {
            tone_score: f64_at(item, &["behavioral_metrics.tone_score", "tone_score"])
                .map(canonical_tone),
            mentorship_score: int_at(
                item,
                &["behavioral_metrics.mentorship_score", "mentorship_score"],
                0,
            ),
        }
    }
}

fn canonical_tone(raw: f64) -> f64 {
    if raw > TONE_SCALE_MAX {
        raw / 10.0
    } else {
        raw
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub code_style: i64,
    pub architecture_design: i64,
    pub security: i64,
    pub product_requirement: i64,
    pub other: i64,
}

impl CategoryBreakdown {
    fn from_raw(item: &Value) -> Option<Self> {
        let section = lookup(item, &["category_breakdown"])?;

        Some(Self {
            code_style: int_at(section, &["code_style"], 0),
            architecture_design: int_at(section, &["architecture_design"], 0),
            security: int_at(section, &["security"], 0),
            product_requirement: int_at(section, &["product_requirement"], 0),
            other: int_at(section, &["other"], 0),
        })
    }

    pub fn total(&self) -> i64 {
        self.code_style + self.architecture_design + self.security + self.product_requirement
            + self.other
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeedbackSamples {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_comment_quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_comment_quote: Option<String>,
}

impl FeedbackSamples {
    fn from_raw(item: &Value) -> Self {
        Self {
            best_comment_quote: opt_str_at(
                item,
                &["feedback_samples.best_comment_quote", "best_comment_quote"],
            ),
            worst_comment_quote: opt_str_at(
                item,
                &["feedback_samples.worst_comment_quote", "worst_comment_quote"],
            ),
        }
    }
}
