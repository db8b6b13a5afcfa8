//! The document-store collaborator and the records it persists.
//!
//! The policy engine never talks to a concrete database directly; it goes
//! through [`DocumentStore`], which the host wires to whatever backend it
//! uses. Two implementations ship with the crate: a SQLite one built on
//! `sqlx` and an in-memory one for tests and previews.
//!
//! Timestamps are normalized to `chrono::DateTime<Utc>` at this boundary;
//! backend-specific representations never leak into policy code.

use crate::error::StoreError;
use crate::geo::GeoPoint;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Per-user creation counters, created lazily on first spot creation.
///
/// `spots_created_today` resets on calendar-day changes while
/// `spots_created_this_week` uses a rolling 7-day window, so no ordering
/// between the two is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: String,
    pub last_spot_created: Option<DateTime<Utc>>,
    pub spots_created_today: u32,
    pub spots_created_this_week: u32,
    pub total_reports: u32,
}

impl UserActivity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            last_spot_created: None,
            spots_created_today: 0,
            spots_created_this_week: 0,
            total_reports: 0,
        }
    }
}

/// The subset of a fishing spot the duplicate detector needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub location: GeoPoint,
}

/// Flagging state carried by a reportable target.
///
/// Invariant after every write: `flag_count == report_ids.len()` and
/// `is_flagged == (flag_count >= threshold)`. Counters never decrement
/// here; unflagging is an admin action outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationState {
    pub report_ids: Vec<String>,
    pub flag_count: u32,
    pub is_flagged: bool,
}

/// What a report points at. `CatchReport` serializes as `report` to match
/// the document schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Spot,
    #[serde(rename = "report")]
    CatchReport,
    User,
}

impl TargetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::CatchReport => "report",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spot" => Some(Self::Spot),
            "report" => Some(Self::CatchReport),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Fake,
    Other,
}

impl ReportReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Inappropriate => "inappropriate",
            Self::Fake => "fake",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spam" => Some(Self::Spam),
            "inappropriate" => Some(Self::Inappropriate),
            "fake" => Some(Self::Fake),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a report. Only `Pending` is written by this crate; the
/// remaining transitions are admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "resolved" => Some(Self::Resolved),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report as submitted by a user; id, status and timestamp are assigned
/// by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub reporter_id: String,
    pub reporter_name: String,
    pub target: TargetKind,
    pub target_id: String,
    pub reason: ReportReason,
    pub description: String,
}

/// A persisted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub target: TargetKind,
    pub target_id: String,
    pub reason: ReportReason,
    pub description: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Persistence operations the policy engine requires from its host.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a user's activity counters, if any exist yet.
    async fn get_user_activity(&self, user_id: &str)
    -> Result<Option<UserActivity>, StoreError>;

    /// Replace a user's activity record wholesale.
    async fn put_user_activity(&self, activity: &UserActivity) -> Result<(), StoreError>;

    /// Atomically bump a user's received-report counter, creating the
    /// activity record if it does not exist yet.
    async fn increment_total_reports(&self, user_id: &str, delta: u32)
    -> Result<(), StoreError>;

    /// All spots owned by a user.
    async fn spots_by_owner(&self, user_id: &str) -> Result<Vec<SpotRecord>, StoreError>;

    /// Spots owned by a user whose name matches exactly.
    async fn spots_by_owner_named(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Vec<SpotRecord>, StoreError>;

    /// Persist a new report, assigning its id, `pending` status and
    /// creation timestamp.
    async fn insert_report(&self, report: NewReport) -> Result<Report, StoreError>;

    /// Flagging state of a spot or catch report, if the target exists.
    async fn moderation_state(
        &self,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<Option<ModerationState>, StoreError>;

    /// Append a report id to a target, bump its flag count by one and set
    /// its flag, as one logical update.
    async fn append_report(
        &self,
        kind: TargetKind,
        target_id: &str,
        report_id: &str,
        is_flagged: bool,
    ) -> Result<(), StoreError>;
}

pub type DynStore = Arc<dyn DocumentStore>;
