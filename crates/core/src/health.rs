#![forbid(unsafe_code)]

//! Overall-health aggregation over a developer's recent reports.

/// Number of most-recent reports considered by the majority vote.
pub const HEALTH_WINDOW: usize = 5;

const MAJORITY: f64 = 0.6;

/// Majority vote over the statuses of the most recent reports. Any critical
/// report dominates the window; a >60% majority decides between healthy and
/// warning; mixed windows default to warning. An empty window is unknown.
pub fn aggregate_health(statuses: &[String]) -> &'static str {
    if statuses.is_empty() {
        return "unknown";
    }

    if statuses.iter().any(|status| status == "critical") {
        return "critical";
    }

    let total = statuses.len() as f64;
    let healthy = statuses.iter().filter(|status| *status == "healthy").count() as f64;

    // A >60% warning share and a mixed window both resolve to warning, so
    // only the healthy majority needs an explicit check.
    if healthy / total > MAJORITY {
        "healthy"
    } else {
        "warning"
    }
}
