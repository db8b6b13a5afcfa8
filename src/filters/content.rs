//! Content validation filter
//!
//! Runs the cheap pre-flight gate (minimum lengths, mandatory photo) and
//! then the full field validators.

use super::{Rejection, SpotFilter, SpotSubmission};
use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::content::ContentValidator;
use crate::limits;
use crate::store::DynStore;

pub struct ContentFilter;

#[async_trait::async_trait]
impl SpotFilter for ContentFilter {
    async fn check(
        &self,
        _store: &DynStore,
        _clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        limits::validate_spot_content(
            &submission.name,
            &submission.description,
            &submission.images,
            &cfg.limits,
        )?;

        let validator = ContentValidator::new(cfg.content.clone());
        validator.validate_fishing_spot_content(&submission.name, &submission.description)?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ContentFilter"
    }
}
