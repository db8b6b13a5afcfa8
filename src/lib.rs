//! Moderation and anti-spam policy engine for a community fishing-spot app.
//!
//! This crate is the decision core that gates user submissions and flags
//! content for review. It has no network surface of its own; the host
//! application supplies a [`store::DocumentStore`] for persistence and a
//! [`clock::Clock`] for time, and wires the results into its UI.
//!
//! The pieces:
//!
//! - [`content`] / [`species`] - pure text validation with user-facing
//!   error messages.
//! - [`geo`] - the serviced-region bounding box, viewport clamping and
//!   great-circle distances.
//! - [`limits`] - per-user creation rate limits backed by activity counters.
//! - [`duplicate`] - near-duplicate spot detection (name and proximity).
//! - [`moderation`] - report submission and auto-flagging.
//! - [`filters`] - the composable pipeline that runs all pre-submission
//!   checks in order, short-circuiting on the first failure.
//!
//! Pre-submission checks fail open when the store is unreachable: a backend
//! hiccup must not block legitimate users from posting. Report submission
//! fails closed, because silently dropping an abuse report would hide abuse.

pub mod clock;
pub mod config;
pub mod content;
pub mod duplicate;
pub mod error;
pub mod filters;
pub mod geo;
pub mod limits;
pub mod moderation;
pub mod species;
pub mod store;

pub use config::PolicyConfig;
pub use error::PolicyError;
