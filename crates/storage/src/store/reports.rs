#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use rp_core::Analysis;
use rusqlite::{OptionalExtension, Row, params};

/// One stored report with its normalized analysis tree re-materialized from
/// the persisted JSON. Raw-passthrough payloads (the degraded ingestion
/// path) re-normalize to the default tree here.
#[derive(Clone, Debug)]
pub struct ReportRecord {
    pub id: i64,
    pub developer_id: i64,
    pub repository: String,
    pub pr_number: String,
    pub pr_link: Option<String>,
    pub title: Option<String>,
    pub business_value_score: i64,
    pub solid_compliance_score: i64,
    pub tone_score: f64,
    pub health_status: String,
    pub risk_level: String,
    pub change_type: String,
    pub analysis: Analysis,
    pub created_at_ms: i64,
}

const REPORT_COLUMNS: &str = "id, developer_id, repository, pr_number, pr_link, title, \
     business_value_score, solid_compliance_score, tone_score, \
     health_status, risk_level, change_type, analysis_json, created_at_ms";

impl SqliteStore {
    pub fn report(&self, report_id: i64) -> Result<Option<ReportRecord>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id=?1"),
                params![report_id],
                report_from_row,
            )
            .optional()?)
    }

    /// Newest-first page of a developer's reports. Ties on `created_at_ms`
    /// break on `id` so pagination is stable.
    pub fn reports_for_developer(
        &self,
        developer_id: i64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE developer_id=?1 \
             ORDER BY created_at_ms DESC, id DESC LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt.query_map(
            params![developer_id, limit as i64, offset as i64],
            report_from_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn report_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(1) FROM reports", [], |row| {
                row.get::<_, i64>(0)
            })?)
    }
}

fn report_from_row(row: &Row<'_>) -> rusqlite::Result<ReportRecord> {
    let analysis_json: String = row.get(12)?;
    let analysis = serde_json::from_str::<serde_json::Value>(&analysis_json)
        .map(|value| Analysis::from_raw(&value))
        .unwrap_or_default();

    Ok(ReportRecord {
        id: row.get(0)?,
        developer_id: row.get(1)?,
        repository: row.get(2)?,
        pr_number: row.get(3)?,
        pr_link: row.get(4)?,
        title: row.get(5)?,
        business_value_score: row.get(6)?,
        solid_compliance_score: row.get(7)?,
        tone_score: row.get(8)?,
        health_status: row.get(9)?,
        risk_level: row.get(10)?,
        change_type: row.get(11)?,
        analysis,
        created_at_ms: row.get(13)?,
    })
}
