//! Per-user spot-creation rate limiting and the pre-flight content gate.
//!
//! The limiter reads one activity record per check. If the store is
//! unreachable the check fails open and allows the creation: availability
//! of the submission path is prioritized over strict enforcement, and the
//! error is logged instead.

use crate::clock::DynClock;
use crate::config::SpamLimits;
use crate::error::StoreError;
use crate::store::{DynStore, UserActivity};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

const MIN_SPOT_NAME_LEN: usize = 3;

/// Why a spot creation was denied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    #[error("Account must be at least {hours} hours old to create spots")]
    AccountTooYoung { hours: i64 },

    #[error("Daily limit reached. You can create {limit} spots per day")]
    DailyLimit { limit: u32 },

    #[error("Weekly limit reached. You can create {limit} spots per week")]
    WeeklyLimit { limit: u32 },

    #[error("Please wait {minutes} more minute(s) before creating another spot")]
    TooSoon { minutes: i64 },
}

/// Why the pre-flight content gate rejected a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentGateError {
    #[error("Spot name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Description must be at least {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("At least one photo is required")]
    NoPhotos,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotCheck {
    Allowed,
    Denied(DenyReason),
}

impl SpotCheck {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(reason),
        }
    }
}

/// Account-age, counter and interval checks for spot creation.
pub struct RateLimiter {
    store: DynStore,
    clock: DynClock,
    limits: SpamLimits,
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: DynStore, clock: DynClock, limits: SpamLimits) -> Self {
        Self {
            store,
            clock,
            limits,
        }
    }

    /// Whether `user_id` may create a spot right now. Checks in order,
    /// first failure wins: account age, daily counter, weekly counter,
    /// minimum interval since the last creation. Users without an activity
    /// record pass every counter check.
    pub async fn can_user_create_spot(
        &self,
        user_id: &str,
        account_created_at: DateTime<Utc>,
    ) -> SpotCheck {
        let now = self.clock.now();

        let age_hours = (now - account_created_at).num_seconds() as f64 / 3600.0;
        if age_hours < self.limits.min_account_age_hours as f64 {
            return SpotCheck::Denied(DenyReason::AccountTooYoung {
                hours: self.limits.min_account_age_hours,
            });
        }

        let activity = match self.store.get_user_activity(user_id).await {
            Ok(activity) => activity,
            Err(err) => {
                // Fail open: a backend hiccup must not block posting.
                tracing::warn!(user_id, error = %err, "activity lookup failed, allowing spot creation");
                return SpotCheck::Allowed;
            }
        };
        let Some(activity) = activity else {
            return SpotCheck::Allowed;
        };

        if activity.spots_created_today >= self.limits.spots_per_day {
            return SpotCheck::Denied(DenyReason::DailyLimit {
                limit: self.limits.spots_per_day,
            });
        }

        if activity.spots_created_this_week >= self.limits.spots_per_week {
            return SpotCheck::Denied(DenyReason::WeeklyLimit {
                limit: self.limits.spots_per_week,
            });
        }

        if let Some(last) = activity.last_spot_created {
            let minutes_since = (now - last).num_seconds() as f64 / 60.0;
            let min_interval = self.limits.min_spot_interval_minutes as f64;
            if minutes_since < min_interval {
                // Remaining wait, rounded up to the next whole minute.
                let minutes = (min_interval - minutes_since).ceil() as i64;
                return SpotCheck::Denied(DenyReason::TooSoon { minutes });
            }
        }

        SpotCheck::Allowed
    }

    /// Record an accepted creation. The daily counter increments while the
    /// previous creation falls on the same calendar day (UTC), else resets
    /// to 1; the weekly counter uses a rolling 7-day window. The record is
    /// replaced wholesale, so concurrent calls for one user can undercount;
    /// that race is accepted.
    pub async fn update_user_activity(&self, user_id: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        let week_start = now - Duration::days(7);
        let current = self.store.get_user_activity(user_id).await?;

        let updated = match current {
            Some(activity) => {
                let last = activity.last_spot_created;
                let same_day = last.is_some_and(|t| t.date_naive() == now.date_naive());
                let same_week = last.is_some_and(|t| t >= week_start);
                UserActivity {
                    user_id: user_id.to_string(),
                    last_spot_created: Some(now),
                    spots_created_today: if same_day {
                        activity.spots_created_today + 1
                    } else {
                        1
                    },
                    spots_created_this_week: if same_week {
                        activity.spots_created_this_week + 1
                    } else {
                        1
                    },
                    total_reports: activity.total_reports,
                }
            }
            None => UserActivity {
                last_spot_created: Some(now),
                spots_created_today: 1,
                spots_created_this_week: 1,
                ..UserActivity::new(user_id)
            },
        };

        self.store.put_user_activity(&updated).await
    }

    /// Pre-flight gate run before the full validators: minimum name and
    /// description lengths plus the mandatory photo.
    pub fn validate_spot_content(
        &self,
        name: &str,
        description: &str,
        images: &[String],
    ) -> Result<(), ContentGateError> {
        validate_spot_content(name, description, images, &self.limits)
    }
}

/// See [`RateLimiter::validate_spot_content`].
pub fn validate_spot_content(
    name: &str,
    description: &str,
    images: &[String],
    limits: &SpamLimits,
) -> Result<(), ContentGateError> {
    if name.trim().chars().count() < MIN_SPOT_NAME_LEN {
        return Err(ContentGateError::NameTooShort {
            min: MIN_SPOT_NAME_LEN,
        });
    }
    if description.trim().chars().count() < limits.min_description_length {
        return Err(ContentGateError::DescriptionTooShort {
            min: limits.min_description_length,
        });
    }
    if images.is_empty() {
        return Err(ContentGateError::NoPhotos);
    }
    Ok(())
}
