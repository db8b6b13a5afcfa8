//! Serviced-region filter
//!
//! Rejects spots placed outside the geographic rectangle the app services.

use super::{Rejection, SpotFilter, SpotSubmission};
use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::store::DynStore;

pub struct LocationFilter;

#[async_trait::async_trait]
impl SpotFilter for LocationFilter {
    async fn check(
        &self,
        _store: &DynStore,
        _clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        let location = submission.location;
        if !cfg.map.contains(location.latitude, location.longitude) {
            return Err(Rejection::OutOfBounds);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LocationFilter"
    }
}
