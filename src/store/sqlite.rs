//! SQLite-backed [`DocumentStore`] built on `sqlx`.
//!
//! Counter bumps are expressed as `SET x = x + ?` updates so they stay
//! atomic at the database level even though the surrounding policy flow is
//! read-then-write.

use super::{
    DocumentStore, ModerationState, NewReport, Report, ReportStatus, SpotRecord, TargetKind,
    UserActivity,
};
use crate::clock::{DynClock, SystemClock};
use crate::error::StoreError;
use crate::geo::GeoPoint;
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::{Row, SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    clock: DynClock,
}

fn timestamp(secs: i64) -> Result<chrono::DateTime<chrono::Utc>, StoreError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::database(format!("invalid timestamp: {secs}")))
}

impl SqliteStore {
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        Self::with_clock(path, Arc::new(SystemClock)).await
    }

    pub async fn with_clock(path: &str, clock: DynClock) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(path)
            .await?;
        // per-user creation counters, one row per user
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS user_activity (
                user_id TEXT PRIMARY KEY,
                last_spot_created INTEGER,
                spots_created_today INTEGER NOT NULL,
                spots_created_this_week INTEGER NOT NULL,
                total_reports INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        // the spot fields the duplicate detector queries
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS spots (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        // flagging state per reportable target
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS moderation_targets (
                kind TEXT NOT NULL,
                target_id TEXT NOT NULL,
                report_ids TEXT NOT NULL,
                flag_count INTEGER NOT NULL,
                is_flagged INTEGER NOT NULL,
                PRIMARY KEY(kind, target_id)
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                reporter_id TEXT NOT NULL,
                reporter_name TEXT NOT NULL,
                target_kind TEXT NOT NULL,
                target_id TEXT NOT NULL,
                reason TEXT NOT NULL,
                description TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool, clock })
    }

    /// Seed a spot, as the host submission flow would after a spot passes
    /// the filter chain.
    pub async fn insert_spot(&self, spot: &SpotRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO spots (id, user_id, name, latitude, longitude)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&spot.id)
        .bind(&spot.user_id)
        .bind(&spot.name)
        .bind(spot.location.latitude)
        .bind(spot.location.longitude)
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "INSERT OR IGNORE INTO moderation_targets (kind, target_id, report_ids, flag_count, is_flagged)
             VALUES (?, ?, '[]', 0, 0)",
        )
        .bind(TargetKind::Spot.as_str())
        .bind(&spot.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Seed flagging state for a target.
    pub async fn put_moderation_state(
        &self,
        kind: TargetKind,
        target_id: &str,
        state: &ModerationState,
    ) -> Result<(), StoreError> {
        let ids = serde_json::to_string(&state.report_ids).map_err(StoreError::database)?;
        sqlx::query(
            "INSERT OR REPLACE INTO moderation_targets (kind, target_id, report_ids, flag_count, is_flagged)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(kind.as_str())
        .bind(target_id)
        .bind(&ids)
        .bind(i64::from(state.flag_count))
        .bind(state.is_flagged)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn row_to_spot(row: &sqlx::sqlite::SqliteRow) -> Result<SpotRecord, StoreError> {
        Ok(SpotRecord {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            location: GeoPoint::new(row.try_get("latitude")?, row.try_get("longitude")?),
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get_user_activity(
        &self,
        user_id: &str,
    ) -> Result<Option<UserActivity>, StoreError> {
        let Some(row) = sqlx::query(
            "SELECT last_spot_created, spots_created_today, spots_created_this_week, total_reports
             FROM user_activity WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };
        let last: Option<i64> = row.try_get("last_spot_created")?;
        Ok(Some(UserActivity {
            user_id: user_id.to_string(),
            last_spot_created: last.map(timestamp).transpose()?,
            spots_created_today: row.try_get::<i64, _>("spots_created_today")? as u32,
            spots_created_this_week: row.try_get::<i64, _>("spots_created_this_week")? as u32,
            total_reports: row.try_get::<i64, _>("total_reports")? as u32,
        }))
    }

    async fn put_user_activity(&self, activity: &UserActivity) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO user_activity
             (user_id, last_spot_created, spots_created_today, spots_created_this_week, total_reports)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&activity.user_id)
        .bind(activity.last_spot_created.map(|t| t.timestamp()))
        .bind(i64::from(activity.spots_created_today))
        .bind(i64::from(activity.spots_created_this_week))
        .bind(i64::from(activity.total_reports))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_total_reports(
        &self,
        user_id: &str,
        delta: u32,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_activity
             (user_id, last_spot_created, spots_created_today, spots_created_this_week, total_reports)
             VALUES (?, NULL, 0, 0, ?)
             ON CONFLICT(user_id) DO UPDATE SET total_reports = total_reports + excluded.total_reports",
        )
        .bind(user_id)
        .bind(i64::from(delta))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn spots_by_owner(&self, user_id: &str) -> Result<Vec<SpotRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, latitude, longitude FROM spots WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_spot).collect()
    }

    async fn spots_by_owner_named(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Vec<SpotRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, latitude, longitude FROM spots WHERE user_id = ? AND name = ?",
        )
        .bind(user_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_spot).collect()
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report, StoreError> {
        let stored = Report {
            id: Uuid::new_v4().to_string(),
            reporter_id: report.reporter_id,
            reporter_name: report.reporter_name,
            target: report.target,
            target_id: report.target_id,
            reason: report.reason,
            description: report.description,
            status: ReportStatus::Pending,
            created_at: self.clock.now(),
        };
        sqlx::query(
            "INSERT INTO reports
             (id, reporter_id, reporter_name, target_kind, target_id, reason, description, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.reporter_id)
        .bind(&stored.reporter_name)
        .bind(stored.target.as_str())
        .bind(&stored.target_id)
        .bind(stored.reason.as_str())
        .bind(&stored.description)
        .bind(stored.status.as_str())
        .bind(stored.created_at.timestamp())
        .execute(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn moderation_state(
        &self,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<Option<ModerationState>, StoreError> {
        let Some(row) = sqlx::query(
            "SELECT report_ids, flag_count, is_flagged FROM moderation_targets
             WHERE kind = ? AND target_id = ?",
        )
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };
        let ids: String = row.try_get("report_ids")?;
        Ok(Some(ModerationState {
            report_ids: serde_json::from_str(&ids).map_err(StoreError::database)?,
            flag_count: row.try_get::<i64, _>("flag_count")? as u32,
            is_flagged: row.try_get("is_flagged")?,
        }))
    }

    async fn append_report(
        &self,
        kind: TargetKind,
        target_id: &str,
        report_id: &str,
        is_flagged: bool,
    ) -> Result<(), StoreError> {
        let Some(mut state) = self.moderation_state(kind, target_id).await? else {
            return Ok(());
        };
        state.report_ids.push(report_id.to_string());
        let ids = serde_json::to_string(&state.report_ids).map_err(StoreError::database)?;
        sqlx::query(
            "UPDATE moderation_targets
             SET report_ids = ?, flag_count = flag_count + 1, is_flagged = ?
             WHERE kind = ? AND target_id = ?",
        )
        .bind(&ids)
        .bind(is_flagged)
        .bind(kind.as_str())
        .bind(target_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
