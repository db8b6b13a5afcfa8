//! Report submission and auto-flagging.
//!
//! Unlike the pre-submission checks this path fails closed: a store error
//! surfaces as a failed outcome with a retry prompt, because silently
//! dropping an abuse report would hide abuse.

use crate::config::SpamLimits;
use crate::error::StoreError;
use crate::store::{DynStore, NewReport, ReportReason, TargetKind};

/// Result of submitting a report, with the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Recorded; the target stays below the flag threshold.
    Submitted,
    /// Recorded, and the target reached the threshold on this write.
    Flagged,
    /// A store error prevented the report from being recorded.
    Failed,
}

impl ReportOutcome {
    #[must_use]
    pub fn success(self) -> bool {
        !matches!(self, Self::Failed)
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Submitted => "Report submitted successfully. Our team will review it.",
            Self::Flagged => "Report submitted. Content has been flagged for review.",
            Self::Failed => "Failed to submit report. Please try again.",
        }
    }
}

pub struct ModerationFlagger {
    store: DynStore,
    threshold: u32,
}

impl ModerationFlagger {
    #[must_use]
    pub fn new(store: DynStore, limits: &SpamLimits) -> Self {
        Self {
            store,
            threshold: limits.auto_flag_threshold,
        }
    }

    /// Record a report against a target and flag the target once its
    /// report count reaches the threshold.
    ///
    /// Spot and catch-report targets get the report id appended and their
    /// flag state updated in one logical write; user targets only have
    /// their received-report counter bumped. After every write the target
    /// satisfies `flag_count == report_ids.len()` and
    /// `is_flagged == (flag_count >= threshold)`.
    pub async fn report_content(
        &self,
        reporter_id: &str,
        reporter_name: &str,
        target: TargetKind,
        target_id: &str,
        reason: ReportReason,
        description: &str,
    ) -> ReportOutcome {
        let report = NewReport {
            reporter_id: reporter_id.to_string(),
            reporter_name: reporter_name.to_string(),
            target,
            target_id: target_id.to_string(),
            reason,
            description: description.to_string(),
        };
        match self.submit(report).await {
            Ok(true) => ReportOutcome::Flagged,
            Ok(false) => ReportOutcome::Submitted,
            Err(err) => {
                // Fail closed: surface the failure rather than dropping it.
                tracing::error!(target_id, kind = %target, error = %err, "report submission failed");
                ReportOutcome::Failed
            }
        }
    }

    /// Returns whether the target reached the flag threshold on this write.
    async fn submit(&self, report: NewReport) -> Result<bool, StoreError> {
        let target = report.target;
        let target_id = report.target_id.clone();
        let stored = self.store.insert_report(report).await?;

        match target {
            TargetKind::User => {
                self.store.increment_total_reports(&target_id, 1).await?;
                Ok(false)
            }
            TargetKind::Spot | TargetKind::CatchReport => {
                let Some(state) = self.store.moderation_state(target, &target_id).await? else {
                    // Target gone; the report still stands for admin review.
                    return Ok(false);
                };
                let new_count = state.report_ids.len() as u32 + 1;
                let flagged = new_count >= self.threshold;
                self.store
                    .append_report(target, &target_id, &stored.id, flagged)
                    .await?;
                Ok(flagged)
            }
        }
    }
}
