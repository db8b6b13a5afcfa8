//! Spot submission filters
//!
//! This module provides a composable filter system for gating spot
//! submissions. Each filter implements the [`SpotFilter`] trait and can be
//! combined into a chain that must all pass before the host persists the
//! spot. The chain short-circuits on the first failure, and the rejection's
//! `Display` output is the message to show the user verbatim.

use crate::clock::DynClock;
use crate::config::PolicyConfig;
use crate::content::ContentError;
use crate::duplicate::DuplicateReason;
use crate::geo::GeoPoint;
use crate::limits::{ContentGateError, DenyReason};
use crate::species::SpeciesError;
use crate::store::DynStore;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod content;
pub mod duplicate;
pub mod location;
pub mod rate;
pub mod species;

/// A spot submission as assembled by the host, before persistence.
#[derive(Debug, Clone)]
pub struct SpotSubmission {
    pub user_id: String,
    pub account_created_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    /// Comma-separated species list as typed by the user.
    pub species: String,
    /// Image URIs; at least one is mandatory.
    pub images: Vec<String>,
    pub location: GeoPoint,
}

/// First reason a submission was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error(transparent)]
    Preflight(#[from] ContentGateError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Species(#[from] SpeciesError),

    #[error("Please select a location within the serviced region")]
    OutOfBounds,

    #[error(transparent)]
    RateLimited(#[from] DenyReason),

    #[error(transparent)]
    Duplicate(#[from] DuplicateReason),
}

/// Trait for spot submission filters
#[async_trait::async_trait]
pub trait SpotFilter: Send + Sync {
    /// Validate a submission according to this filter's rules.
    ///
    /// Returns Ok(()) if the submission passes, Err with the user-facing
    /// rejection if it fails.
    async fn check(
        &self,
        store: &DynStore,
        clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection>;

    /// Get a descriptive name for this filter (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// A chain of filters that all must pass for a submission to be accepted
pub struct FilterChain {
    filters: Vec<Box<dyn SpotFilter>>,
}

impl FilterChain {
    /// Create a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the chain
    #[must_use]
    pub fn add_filter(mut self, filter: Box<dyn SpotFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Run all filters in the chain, returning on first failure
    pub async fn check(
        &self,
        store: &DynStore,
        clock: &DynClock,
        cfg: &PolicyConfig,
        submission: &SpotSubmission,
    ) -> Result<(), Rejection> {
        for filter in &self.filters {
            filter.check(store, clock, cfg, submission).await?;
        }
        Ok(())
    }

    /// Get a list of filter names in the chain
    #[must_use]
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

impl Default for FilterChain {
    /// Create the default chain with all standard submission filters
    fn default() -> Self {
        Self::new()
            .add_filter(Box::new(content::ContentFilter))
            .add_filter(Box::new(species::SpeciesFilter))
            .add_filter(Box::new(location::LocationFilter))
            .add_filter(Box::new(rate::RateLimitFilter))
            .add_filter(Box::new(duplicate::DuplicateFilter))
    }
}
