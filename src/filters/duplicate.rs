//! Duplicate-spot filter
//!
//! Rejects submissions that match an existing spot by the same owner on
//! exact name or proximity. Query errors fail open inside the detector.

use super::{Rejection, SpotFilter, SpotSubmission};
use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::duplicate::{DuplicateCheck, DuplicateDetector};
use crate::store::DynStore;

pub struct DuplicateFilter;

#[async_trait::async_trait]
impl SpotFilter for DuplicateFilter {
    async fn check(
        &self,
        store: &DynStore,
        _clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        let detector = DuplicateDetector::new(store.clone(), &cfg.limits);
        match detector
            .check_spot(&submission.user_id, &submission.name, submission.location)
            .await
        {
            DuplicateCheck::Unique => Ok(()),
            DuplicateCheck::Duplicate(reason) => Err(Rejection::Duplicate(reason)),
        }
    }

    fn name(&self) -> &'static str {
        "DuplicateFilter"
    }
}
