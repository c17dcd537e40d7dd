#![forbid(unsafe_code)]

use super::developers::sync_developer_tx;
use super::requests::{AuthorIdentity, IngestReceipt, IngestReportRequest};
use super::{SqliteStore, StoreError, require_nonempty};
use rp_core::{Analysis, extract_metrics};
use rusqlite::params;

impl SqliteStore {
    /// The ingestion transaction: resolve the developer identity, normalize
    /// the analysis payload, extract scalar metrics, and append the report
    /// fact. Developer upsert and report insert commit together or not at
    /// all; a malformed `ai_analysis` only degrades the stored metrics and
    /// never fails the ingestion.
    pub fn ingest_report(
        &mut self,
        request: IngestReportRequest,
    ) -> Result<IngestReceipt, StoreError> {
        let repository = require_nonempty("repository", &request.repository)?;
        let pr_number = require_nonempty("pr_number", &request.pr_number)?;
        let author = AuthorIdentity {
            username: require_nonempty("author.username", &request.author.username)?,
            name: request.author.name.clone(),
            avatar_url: request.author.avatar_url.clone(),
        };

        let analysis = Analysis::from_raw(&request.ai_analysis);
        let metrics = extract_metrics(&analysis);

        // A payload that was not record-shaped normalized to defaults; keep
        // the raw value verbatim so nothing the producer sent is lost.
        let analysis_json = if request.ai_analysis.is_object() {
            serde_json::to_string(&analysis)?
        } else {
            request.ai_analysis.to_string()
        };

        let tx = self.conn.transaction()?;
        let developer = sync_developer_tx(&tx, &author, request.created_at_ms)?;

        tx.execute(
            "INSERT INTO reports( \
               developer_id, repository, pr_number, pr_link, title, \
               business_value_score, solid_compliance_score, tone_score, \
               health_status, risk_level, change_type, analysis_json, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                developer.id,
                repository,
                pr_number,
                request.pr_link,
                request.title,
                metrics.business_value,
                metrics.solid_compliance,
                metrics.tone_score,
                metrics.health_status,
                metrics.risk_level,
                metrics.change_type,
                analysis_json,
                request.created_at_ms,
            ],
        )?;
        let report_id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(IngestReceipt {
            report_id,
            developer_id: developer.id,
            repository,
            pr_number,
        })
    }
}
