#![forbid(unsafe_code)]

use serde_json::Value;

/// Author identity as delivered by the webhook envelope. `username` is the
/// sole identity key; `name` and `avatar_url` refresh the stored profile
/// when present and changed.
#[derive(Clone, Debug)]
pub struct AuthorIdentity {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// One webhook delivery. The envelope fields are assumed structurally valid
/// (the HTTP validation layer rejects incomplete envelopes before the core
/// is invoked); `ai_analysis` carries no such guarantee and is normalized
/// tolerantly.
#[derive(Clone, Debug)]
pub struct IngestReportRequest {
    pub repository: String,
    pub pr_number: String,
    pub pr_link: Option<String>,
    pub title: Option<String>,
    pub author: AuthorIdentity,
    pub ai_analysis: Value,
    pub created_at_ms: i64,
}

/// Identity fields of the created report, returned for the caller's
/// acknowledgment response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestReceipt {
    pub report_id: i64,
    pub developer_id: i64,
    pub repository: String,
    pub pr_number: String,
}

#[derive(Clone, Copy, Debug)]
pub struct LeaderboardRequest {
    pub since_ms: i64,
    pub limit: usize,
}
