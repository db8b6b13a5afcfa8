//! Near-duplicate spot detection.
//!
//! Two store queries: an exact-name match among the user's own spots, then
//! a proximity sweep comparing great-circle distance against the configured
//! radius. Query errors fail open, same as the rate limiter.

use crate::config::SpamLimits;
use crate::geo::{GeoPoint, haversine_km};
use crate::store::DynStore;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateReason {
    #[error("You already have a spot with this name")]
    Name,

    #[error("You already have a spot at this location")]
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateCheck {
    Unique,
    Duplicate(DuplicateReason),
}

impl DuplicateCheck {
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    #[must_use]
    pub fn reason(&self) -> Option<DuplicateReason> {
        match self {
            Self::Unique => None,
            Self::Duplicate(reason) => Some(*reason),
        }
    }
}

pub struct DuplicateDetector {
    store: DynStore,
    radius_km: f64,
}

impl DuplicateDetector {
    #[must_use]
    pub fn new(store: DynStore, limits: &SpamLimits) -> Self {
        Self {
            store,
            radius_km: limits.duplicate_radius_km,
        }
    }

    /// Check a proposed spot against the user's existing spots.
    pub async fn check_spot(
        &self,
        user_id: &str,
        name: &str,
        location: GeoPoint,
    ) -> DuplicateCheck {
        match self.store.spots_by_owner_named(user_id, name).await {
            Ok(spots) if !spots.is_empty() => {
                return DuplicateCheck::Duplicate(DuplicateReason::Name);
            }
            Ok(_) => {}
            Err(err) => {
                // Fail open: a backend hiccup must not block posting.
                tracing::warn!(user_id, error = %err, "name query failed, skipping duplicate check");
                return DuplicateCheck::Unique;
            }
        }

        let spots = match self.store.spots_by_owner(user_id).await {
            Ok(spots) => spots,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "owner query failed, skipping duplicate check");
                return DuplicateCheck::Unique;
            }
        };

        for spot in spots {
            if haversine_km(spot.location, location) < self.radius_km {
                return DuplicateCheck::Duplicate(DuplicateReason::Location);
            }
        }

        DuplicateCheck::Unique
    }
}
