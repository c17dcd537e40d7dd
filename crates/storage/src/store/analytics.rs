#![forbid(unsafe_code)]

//! Derived analytics over the stored report facts. Per-developer reads go
//! through the scalar columns; fleet-wide reviewer aggregation re-reads the
//! stored analysis payloads.

use super::requests::LeaderboardRequest;
use super::{SqliteStore, StoreError};
use rp_core::Analysis;
use rp_core::health::{HEALTH_WINDOW, aggregate_health};
use rp_core::metrics::round2;
use rp_core::mistakes::categorize_mistake;
use rp_core::trend::{ToneTrend, classify_tone_trend};
use rusqlite::params;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One point of a developer's chronological trend series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendPoint {
    pub created_at_ms: i64,
    pub tone_score: f64,
    pub solid_compliance_score: i64,
    pub business_value_score: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub login: String,
    pub average_tone: f64,
    pub review_count: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MistakeCategoryCount {
    pub category: &'static str,
    pub count: i64,
}

impl SqliteStore {
    pub fn developer_report_count(&self, developer_id: i64) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(1) FROM reports WHERE developer_id=?1",
            params![developer_id],
            |row| row.get::<_, i64>(0),
        )?)
    }

    /// Mean stored tone score over all of the developer's reports, rounded
    /// to 2 decimals. `None` when the developer has no reports.
    pub fn developer_average_tone(&self, developer_id: i64) -> Result<Option<f64>, StoreError> {
        let average = self.conn.query_row(
            "SELECT AVG(tone_score) FROM reports WHERE developer_id=?1",
            params![developer_id],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.map(round2))
    }

    pub fn developer_average_compliance(
        &self,
        developer_id: i64,
    ) -> Result<Option<f64>, StoreError> {
        let average = self.conn.query_row(
            "SELECT AVG(solid_compliance_score) FROM reports WHERE developer_id=?1",
            params![developer_id],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.map(round2))
    }

    /// Majority vote over the developer's most recent reports.
    pub fn developer_overall_health(&self, developer_id: i64) -> Result<&'static str, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT health_status FROM reports WHERE developer_id=?1 \
             ORDER BY created_at_ms DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![developer_id, HEALTH_WINDOW as i64], |row| {
            row.get::<_, String>(0)
        })?;

        let mut statuses = Vec::new();
        for row in rows {
            statuses.push(row?);
        }
        Ok(aggregate_health(&statuses))
    }

    /// Chronological metric series for the developer's trend charts.
    pub fn developer_trend_series(
        &self,
        developer_id: i64,
    ) -> Result<Vec<TrendPoint>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT created_at_ms, tone_score, solid_compliance_score, business_value_score \
             FROM reports WHERE developer_id=?1 ORDER BY created_at_ms ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![developer_id], |row| {
            Ok(TrendPoint {
                created_at_ms: row.get(0)?,
                tone_score: row.get(1)?,
                solid_compliance_score: row.get(2)?,
                business_value_score: row.get(3)?,
            })
        })?;

        let mut points = Vec::new();
        for row in rows {
            points.push(row?);
        }
        Ok(points)
    }

    /// Tone-trend classification over the developer's report history. Stored
    /// scores are canonical 0-10; the classifier's thresholds are on the
    /// 0-100 comparison scale, so scores are upscaled before classifying.
    pub fn developer_tone_trend(&self, developer_id: i64) -> Result<ToneTrend, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT tone_score FROM reports WHERE developer_id=?1 AND tone_score > 0 \
             ORDER BY created_at_ms ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![developer_id], |row| row.get::<_, f64>(0))?;

        let mut scores = Vec::new();
        for row in rows {
            scores.push(row? * 10.0);
        }
        Ok(classify_tone_trend(&scores))
    }

    pub fn fleet_report_count(&self, since_ms: i64) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(1) FROM reports WHERE created_at_ms >= ?1",
            params![since_ms],
            |row| row.get::<_, i64>(0),
        )?)
    }

    /// Mean solid compliance over the window, rounded to 1 decimal.
    pub fn fleet_average_code_health(&self, since_ms: i64) -> Result<Option<f64>, StoreError> {
        let average = self.conn.query_row(
            "SELECT AVG(solid_compliance_score) FROM reports WHERE created_at_ms >= ?1",
            params![since_ms],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.map(|value| (value * 10.0).round() / 10.0))
    }

    /// Mean tone over the window, rounded to 2 decimals.
    pub fn fleet_average_morale(&self, since_ms: i64) -> Result<Option<f64>, StoreError> {
        let average = self.conn.query_row(
            "SELECT AVG(tone_score) FROM reports WHERE created_at_ms >= ?1",
            params![since_ms],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.map(round2))
    }

    pub fn fleet_critical_risk_count(&self, since_ms: i64) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(1) FROM reports \
             WHERE created_at_ms >= ?1 AND (risk_level='high' OR health_status='critical')",
            params![since_ms],
            |row| row.get::<_, i64>(0),
        )?)
    }

    /// Average tone per reviewer login across the window's stored analyses,
    /// best first. Reviewers without a resolvable login or without a tone
    /// score do not enter the board.
    pub fn reviewer_leaderboard(
        &self,
        request: LeaderboardRequest,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut sums: BTreeMap<String, (f64, i64)> = BTreeMap::new();

        for analysis in self.analyses_since(request.since_ms)? {
            for reviewer in &analysis.reviewers {
                if reviewer.login == rp_core::analysis::UNKNOWN {
                    continue;
                }
                let Some(tone) = reviewer.behavioral.tone_score else {
                    continue;
                };
                let entry = sums.entry(reviewer.login.clone()).or_insert((0.0, 0));
                entry.0 += tone;
                entry.1 += 1;
            }
        }

        let mut board: Vec<LeaderboardEntry> = sums
            .into_iter()
            .map(|(login, (total, count))| LeaderboardEntry {
                login,
                average_tone: round2(total / count as f64),
                review_count: count,
            })
            .collect();

        board.sort_by(|a, b| {
            b.average_tone
                .partial_cmp(&a.average_tone)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.login.cmp(&b.login))
        });
        board.truncate(request.limit);
        Ok(board)
    }

    /// Category histogram of the recurring mistakes recorded in the window,
    /// most frequent first, empty categories omitted.
    pub fn mistake_histogram(
        &self,
        since_ms: i64,
    ) -> Result<Vec<MistakeCategoryCount>, StoreError> {
        let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();

        for analysis in self.analyses_since(since_ms)? {
            for mistake in analysis.recurring_mistakes() {
                *counts.entry(categorize_mistake(mistake)).or_insert(0) += 1;
            }
        }

        let mut histogram: Vec<MistakeCategoryCount> = counts
            .into_iter()
            .map(|(category, count)| MistakeCategoryCount { category, count })
            .collect();

        histogram.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(b.category)));
        Ok(histogram)
    }

    fn analyses_since(&self, since_ms: i64) -> Result<Vec<Analysis>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT analysis_json FROM reports WHERE created_at_ms >= ?1 \
             ORDER BY created_at_ms ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![since_ms], |row| row.get::<_, String>(0))?;

        let mut analyses = Vec::new();
        for row in rows {
            let payload = row?;
            // Raw-passthrough payloads normalize to the default tree and
            // contribute nothing to the aggregates.
            let analysis = serde_json::from_str::<serde_json::Value>(&payload)
                .map(|value| Analysis::from_raw(&value))
                .unwrap_or_default();
            analyses.push(analysis);
        }
        Ok(analyses)
    }
}
