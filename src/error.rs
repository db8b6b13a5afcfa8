//! Infrastructure error types for the policy engine.
//!
//! User-facing rejection messages are not represented here; each policy
//! module carries its own error enum whose `Display` output is the exact
//! string shown to the user. This module covers the plumbing underneath:
//! store failures and configuration problems.

use thiserror::Error;

/// Top-level error type for operations that do not fail open.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced by a [`crate::store::DocumentStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an arbitrary backend error as a database failure.
    pub fn database<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Database(err.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(Box::new(err))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}
