#![forbid(unsafe_code)]

//! The normalized analysis tree.
//!
//! The producer's JSON has gone through two schema generations: a legacy
//! flat shape (`business_value_clarity`, `health_status`, per-reviewer
//! `tone_score` at the element root) and the current nested shape
//! (`executive_summary`, `classification`, `author_analytics`,
//! `behavioral_metrics`). `Analysis::from_raw` folds both into one typed
//! tree and never fails: missing or wrong-typed fields fall back to their
//! defaults, malformed list elements are skipped, and a payload that is not
//! an object at all normalizes to `Analysis::default()`.
//!
//! The tree serializes with current-generation key names, so a stored
//! normalized payload round-trips through `from_raw` unchanged.

mod author;
mod raw;
mod reviewer;

#[cfg(test)]
mod tests;

pub use author::{
    AuthorAnalytics, AuthorQualityMetrics, AuthorTrendAnalysis, AuthorVelocityMetrics,
    EducationalPathItem,
};
pub use reviewer::{
    BehavioralMetrics, CategoryBreakdown, EngagementMetrics, FeedbackSamples, ReviewerAnalytics,
};

use raw::{bool_at, int_at, lookup, opt_str_at, str_at, string_list_at};
use serde::Serialize;
use serde_json::Value;

pub const UNKNOWN: &str = "unknown";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(rename = "meta_data", skip_serializing_if = "MetaData::is_empty")]
    pub meta: MetaData,
    pub executive_summary: ExecutiveSummary,
    pub classification: Classification,
    #[serde(rename = "author_analytics")]
    pub author: AuthorAnalytics,
    #[serde(rename = "reviewers_analytics")]
    pub reviewers: Vec<ReviewerAnalytics>,
    #[serde(rename = "gamification_badges")]
    pub badges: Vec<Badge>,
    #[serde(
        rename = "technical_debt_analysis",
        skip_serializing_if = "Option::is_none"
    )]
    pub technical_debt: Option<TechnicalDebtAnalysis>,
    #[serde(rename = "management_decision_assist")]
    pub management: ManagementDecisionAssist,
}

impl Analysis {
    /// Total constructor: any JSON value in, fully-populated tree out.
    pub fn from_raw(payload: &Value) -> Self {
        if !payload.is_object() {
            return Self::default();
        }

        Self {
            meta: MetaData::from_raw(payload),
            executive_summary: ExecutiveSummary::from_raw(payload),
            classification: Classification::from_raw(payload),
            author: AuthorAnalytics::from_raw(payload),
            reviewers: ReviewerAnalytics::list_from_raw(payload),
            badges: Badge::list_from_raw(payload),
            technical_debt: TechnicalDebtAnalysis::from_raw(payload),
            management: ManagementDecisionAssist::from_raw(payload),
        }
    }

    pub fn recurring_mistakes(&self) -> &[String] {
        &self.author.trend_analysis.recurring_mistakes
    }

    pub fn educational_path(&self) -> &[EducationalPathItem] {
        &self.author.educational_path
    }

    pub fn is_blocking(&self) -> bool {
        self.classification.is_blocking
    }

    pub fn is_over_engineered(&self) -> bool {
        self.technical_debt
            .as_ref()
            .is_some_and(|debt| debt.over_engineering_detected)
    }

    pub fn requires_hr_attention(&self) -> bool {
        self.management.hr_flag
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetaData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl MetaData {
    fn from_raw(root: &Value) -> Self {
        Self {
            analysis_timestamp: opt_str_at(root, &["meta_data.analysis_timestamp"]),
            model_version: opt_str_at(root, &["meta_data.model_version"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.analysis_timestamp.is_none() && self.model_version.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub title_summary: String,
    pub business_value_clarity: i64,
    pub overall_health_status: String,
}

impl ExecutiveSummary {
    fn from_raw(root: &Value) -> Self {
        Self {
            title_summary: str_at(root, &["executive_summary.title_summary", "title_summary"], ""),
            business_value_clarity: int_at(
                root,
                &[
                    "executive_summary.business_value_clarity",
                    "classification.business_value",
                    "business_value_clarity",
                ],
                0,
            ),
            overall_health_status: str_at(
                root,
                &[
                    "executive_summary.overall_health_status",
                    "classification.health_status",
                    "health_status",
                ],
                UNKNOWN,
            ),
        }
    }
}

impl Default for ExecutiveSummary {
    fn default() -> Self {
        Self {
            title_summary: String::new(),
            business_value_clarity: 0,
            overall_health_status: UNKNOWN.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub change_type: String,
    pub risk_level: String,
    pub is_blocking: bool,
}

impl Classification {
    fn from_raw(root: &Value) -> Self {
        Self {
            change_type: str_at(root, &["classification.change_type", "change_type"], UNKNOWN),
            risk_level: str_at(root, &["classification.risk_level", "risk_level"], UNKNOWN),
            is_blocking: bool_at(root, &["classification.is_blocking", "is_blocking"], false),
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            change_type: UNKNOWN.to_string(),
            risk_level: UNKNOWN.to_string(),
            is_blocking: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Badge {
    pub badge_name: String,
    pub recipient: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

impl Badge {
    fn list_from_raw(root: &Value) -> Vec<Self> {
        let Some(items) = lookup(root, &["gamification_badges", "badges"]).and_then(Value::as_array)
        else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| Self {
                badge_name: str_at(item, &["badge_name"], UNKNOWN),
                recipient: str_at(item, &["recipient"], UNKNOWN),
                kind: str_at(item, &["type"], "neutral"),
                reason: str_at(item, &["reason", "reason_fa"], ""),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechnicalDebtAnalysis {
    pub added_debt_level: String,
    pub over_engineering_detected: bool,
    pub suggestions_for_refactor: Vec<String>,
}

impl TechnicalDebtAnalysis {
    /// The section is optional: it is materialized only when the payload
    /// carries the nested section or one of its legacy flat fields.
    fn from_raw(root: &Value) -> Option<Self> {
        lookup(
            root,
            &[
                "technical_debt_analysis",
                "over_engineering",
                "suggestions_for_refactor",
            ],
        )?;

        Some(Self {
            added_debt_level: str_at(
                root,
                &["technical_debt_analysis.added_debt_level", "added_debt_level"],
                "none",
            ),
            over_engineering_detected: bool_at(
                root,
                &[
                    "technical_debt_analysis.over_engineering_detected",
                    "over_engineering",
                ],
                false,
            ),
            suggestions_for_refactor: string_list_at(
                root,
                &[
                    "technical_debt_analysis.suggestions_for_refactor",
                    "suggestions_for_refactor",
                ],
            ),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ManagementDecisionAssist {
    pub final_verdict: String,
    pub performance_review_topic: String,
    pub hr_flag: bool,
}

impl ManagementDecisionAssist {
    fn from_raw(root: &Value) -> Self {
        Self {
            final_verdict: str_at(
                root,
                &[
                    "management_decision_assist.final_verdict",
                    "management_decision_assist.final_verdict_fa",
                    "final_verdict",
                ],
                "",
            ),
            performance_review_topic: str_at(
                root,
                &[
                    "management_decision_assist.performance_review_topic",
                    "performance_review_topic",
                ],
                "",
            ),
            hr_flag: bool_at(root, &["management_decision_assist.hr_flag", "hr_flag"], false),
        }
    }
}
