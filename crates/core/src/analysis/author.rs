use super::UNKNOWN;
use super::raw::{f64_at, int_at, lookup, opt_i64_at, opt_str_at, str_at, string_list_at};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorAnalytics {
    pub identity: String,
    pub quality_metrics: AuthorQualityMetrics,
    pub trend_analysis: AuthorTrendAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_metrics: Option<AuthorVelocityMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub educational_path: Vec<EducationalPathItem>,
}

impl Default for AuthorAnalytics {
    fn default() -> Self {
        Self {
            identity: UNKNOWN.to_string(),
            quality_metrics: AuthorQualityMetrics::default(),
            trend_analysis: AuthorTrendAnalysis::default(),
            velocity_metrics: None,
            educational_path: Vec::new(),
        }
    }
}

impl AuthorAnalytics {
    pub(super) fn from_raw(root: &Value) -> Self {
        Self {
            identity: str_at(root, &["author_analytics.identity"], UNKNOWN),
            quality_metrics: AuthorQualityMetrics::from_raw(root),
            trend_analysis: AuthorTrendAnalysis::from_raw(root),
            velocity_metrics: AuthorVelocityMetrics::from_raw(root),
            educational_path: EducationalPathItem::list_from_raw(root),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorQualityMetrics {
    pub solid_compliance: i64,
    pub bug_potential: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_coverage_quality: Option<String>,
}

impl AuthorQualityMetrics {
    fn from_raw(root: &Value) -> Self {
        Self {
            solid_compliance: int_at(
                root,
                &[
                    "author_analytics.quality_metrics.solid_compliance",
                    "quality_metrics.solid_compliance",
                    "solid_compliance_score",
                ],
                0,
            ),
            bug_potential: str_at(
                root,
                &[
                    "author_analytics.quality_metrics.bug_potential",
                    "quality_metrics.bug_potential",
                ],
                UNKNOWN,
            ),
            test_coverage_quality: opt_str_at(
                root,
                &[
                    "author_analytics.quality_metrics.test_coverage_quality",
                    "quality_metrics.test_coverage_quality",
                ],
            ),
        }
    }
}

impl Default for AuthorQualityMetrics {
    fn default() -> Self {
        Self {
            solid_compliance: 0,
            bug_potential: UNKNOWN.to_string(),
            test_coverage_quality: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorTrendAnalysis {
    pub improvement_status: String,
    pub recurring_mistakes: Vec<String>,
}

impl AuthorTrendAnalysis {
    fn from_raw(root: &Value) -> Self {
        Self {
            improvement_status: str_at(
                root,
                &[
                    "author_analytics.trend_analysis.improvement_status",
                    "trend_analysis.improvement_status",
                ],
                "stable",
            ),
            recurring_mistakes: string_list_at(
                root,
                &[
                    "author_analytics.trend_analysis.recurring_mistakes",
                    "trend_analysis.recurring_mistakes",
                    "recurring_mistakes",
                ],
            ),
        }
    }
}

impl Default for AuthorTrendAnalysis {
    fn default() -> Self {
        Self {
            improvement_status: "stable".to_string(),
            recurring_mistakes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AuthorVelocityMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_time_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rework_cycles: Option<i64>,
}

impl AuthorVelocityMetrics {
    fn from_raw(root: &Value) -> Option<Self> {
        lookup(root, &["author_analytics.velocity_metrics", "velocity_metrics"])?;

        Some(Self {
            avg_response_time_hours: f64_at(
                root,
                &[
                    "author_analytics.velocity_metrics.avg_response_time_hours",
                    "velocity_metrics.avg_response_time_hours",
                ],
            ),
            rework_cycles: opt_i64_at(
                root,
                &[
                    "author_analytics.velocity_metrics.rework_cycles",
                    "velocity_metrics.rework_cycles",
                ],
            ),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EducationalPathItem {
    pub topic: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl EducationalPathItem {
    fn list_from_raw(root: &Value) -> Vec<Self> {
        let Some(items) = lookup(
            root,
            &["author_analytics.educational_path", "educational_path"],
        )
        .and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| Self {
                topic: str_at(item, &["topic"], ""),
                reason: str_at(item, &["reason"], ""),
                link: opt_str_at(item, &["link"]),
            })
            .collect()
    }
}
