//! Rate-limit filter
//!
//! Applies account-age, daily/weekly counter and minimum-interval checks.
//! Store errors fail open inside the limiter, so this filter only rejects
//! on a definite denial.

use super::{Rejection, SpotFilter, SpotSubmission};
use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::limits::{RateLimiter, SpotCheck};
use crate::store::DynStore;

pub struct RateLimitFilter;

#[async_trait::async_trait]
impl SpotFilter for RateLimitFilter {
    async fn check(
        &self,
        store: &DynStore,
        clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        let limiter = RateLimiter::new(store.clone(), clock.clone(), cfg.limits.clone());
        match limiter
            .can_user_create_spot(&submission.user_id, submission.account_created_at)
            .await
        {
            SpotCheck::Allowed => Ok(()),
            SpotCheck::Denied(reason) => Err(Rejection::RateLimited(reason)),
        }
    }

    fn name(&self) -> &'static str {
        "RateLimitFilter"
    }
}
