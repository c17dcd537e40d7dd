#![forbid(unsafe_code)]

mod store;

pub use store::{
    AuthorIdentity, DeveloperRow, IngestReceipt, IngestReportRequest, LeaderboardEntry,
    LeaderboardRequest, MistakeCategoryCount, ReportRecord, SqliteStore, StoreError, TrendPoint,
};
