//! Species list validation filter

use super::{Rejection, SpotFilter, SpotSubmission};
use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::species::validate_species;
use crate::store::DynStore;

pub struct SpeciesFilter;

#[async_trait::async_trait]
impl SpotFilter for SpeciesFilter {
    async fn check(
        &self,
        _store: &DynStore,
        _clock: &DynClock,
        _cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        validate_species(&submission.species)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SpeciesFilter"
    }
}
