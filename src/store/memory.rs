//! In-memory store used by tests and host-app previews.

use super::{
    DocumentStore, ModerationState, NewReport, Report, ReportStatus, SpotRecord, TargetKind,
    UserActivity,
};
use crate::clock::{DynClock, SystemClock};
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// `DashMap`-backed [`DocumentStore`].
pub struct MemoryStore {
    activity: DashMap<String, UserActivity>,
    spots: DashMap<String, SpotRecord>,
    moderation: DashMap<(TargetKind, String), ModerationState>,
    reports: DashMap<String, Report>,
    clock: DynClock,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store whose assigned report timestamps come from `clock`.
    #[must_use]
    pub fn with_clock(clock: DynClock) -> Self {
        Self {
            activity: DashMap::new(),
            spots: DashMap::new(),
            moderation: DashMap::new(),
            reports: DashMap::new(),
            clock,
        }
    }

    /// Seed a spot, as the host submission flow would after a spot passes
    /// the filter chain.
    pub fn insert_spot(&self, spot: SpotRecord) {
        self.moderation
            .entry((TargetKind::Spot, spot.id.clone()))
            .or_default();
        self.spots.insert(spot.id.clone(), spot);
    }

    /// Seed flagging state for a target.
    pub fn put_moderation_state(&self, kind: TargetKind, target_id: &str, state: ModerationState) {
        self.moderation.insert((kind, target_id.to_string()), state);
    }

    #[must_use]
    pub fn report(&self, id: &str) -> Option<Report> {
        self.reports.get(id).map(|r| r.clone())
    }

    #[must_use]
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_user_activity(
        &self,
        user_id: &str,
    ) -> Result<Option<UserActivity>, StoreError> {
        Ok(self.activity.get(user_id).map(|a| a.clone()))
    }

    async fn put_user_activity(&self, activity: &UserActivity) -> Result<(), StoreError> {
        self.activity
            .insert(activity.user_id.clone(), activity.clone());
        Ok(())
    }

    async fn increment_total_reports(
        &self,
        user_id: &str,
        delta: u32,
    ) -> Result<(), StoreError> {
        self.activity
            .entry(user_id.to_string())
            .or_insert_with(|| UserActivity::new(user_id))
            .total_reports += delta;
        Ok(())
    }

    async fn spots_by_owner(&self, user_id: &str) -> Result<Vec<SpotRecord>, StoreError> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone())
            .collect())
    }

    async fn spots_by_owner_named(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Vec<SpotRecord>, StoreError> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.user_id == user_id && s.name == name)
            .map(|s| s.clone())
            .collect())
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
        self.reports.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn moderation_state(
        &self,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<Option<ModerationState>, StoreError> {
        Ok(self
            .moderation
            .get(&(kind, target_id.to_string()))
            .map(|s| s.clone()))
    }

    async fn append_report(
        &self,
        kind: TargetKind,
        target_id: &str,
        report_id: &str,
        is_flagged: bool,
    ) -> Result<(), StoreError> {
        if let Some(mut state) = self.moderation.get_mut(&(kind, target_id.to_string())) {
            state.report_ids.push(report_id.to_string());
            state.flag_count += 1;
            state.is_flagged = is_flagged;
        }
        Ok(())
    }
}
