//! Length and format validation for user-editable text fields.
//!
//! Every validator returns a structured error whose `Display` output is the
//! exact message shown to the user, naming the offending field and the
//! violated bound. Validators never panic and are safe to call repeatedly.

use crate::config::{ContentLimits, FieldBounds};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// One-or-more non-whitespace-non-`@` characters, `@`, the same, `.`, the
/// same. Deliberately permissive; real verification happens by email.
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least {min} characters (currently {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} must not exceed {max} characters (currently {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Fields whose bounds a host UI may want to render (character counters,
/// input hints).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Title,
    Description,
    SpotName,
    SpotDescription,
    DisplayName,
    Password,
}

/// Validates text fields against configured length bounds.
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    limits: ContentLimits,
}

impl ContentValidator {
    #[must_use]
    pub fn new(limits: ContentLimits) -> Self {
        Self { limits }
    }

    /// Bounds for a field, for display purposes.
    #[must_use]
    pub fn bounds(&self, field: ContentField) -> FieldBounds {
        match field {
            ContentField::Title => self.limits.title,
            ContentField::Description => self.limits.description,
            ContentField::SpotName => self.limits.spot_name,
            ContentField::SpotDescription => self.limits.spot_description,
            ContentField::DisplayName => self.limits.display_name,
            ContentField::Password => self.limits.password,
        }
    }

    fn bounded(
        field: &'static str,
        text: &str,
        bounds: FieldBounds,
    ) -> Result<(), ContentError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ContentError::Empty { field });
        }
        let actual = trimmed.chars().count();
        if actual < bounds.min {
            return Err(ContentError::TooShort {
                field,
                min: bounds.min,
                actual,
            });
        }
        if actual > bounds.max {
            return Err(ContentError::TooLong {
                field,
                max: bounds.max,
                actual,
            });
        }
        Ok(())
    }

    pub fn validate_title(&self, title: &str) -> Result<(), ContentError> {
        Self::bounded("Title", title, self.limits.title)
    }

    pub fn validate_description(&self, description: &str) -> Result<(), ContentError> {
        Self::bounded("Description", description, self.limits.description)
    }

    pub fn validate_spot_name(&self, name: &str) -> Result<(), ContentError> {
        Self::bounded("Spot name", name, self.limits.spot_name)
    }

    pub fn validate_spot_description(&self, description: &str) -> Result<(), ContentError> {
        Self::bounded("Description", description, self.limits.spot_description)
    }

    pub fn validate_display_name(&self, name: &str) -> Result<(), ContentError> {
        Self::bounded("Display name", name, self.limits.display_name)
    }

    pub fn validate_email(&self, email: &str) -> Result<(), ContentError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ContentError::Empty { field: "Email" });
        }
        if !email_regex().is_match(trimmed) {
            return Err(ContentError::InvalidEmail);
        }
        Ok(())
    }

    /// Passwords are validated on the raw string; surrounding whitespace is
    /// significant.
    pub fn validate_password(&self, password: &str) -> Result<(), ContentError> {
        if password.is_empty() {
            return Err(ContentError::Empty { field: "Password" });
        }
        let actual = password.chars().count();
        let bounds = self.limits.password;
        if actual < bounds.min {
            return Err(ContentError::TooShort {
                field: "Password",
                min: bounds.min,
                actual,
            });
        }
        if actual > bounds.max {
            return Err(ContentError::TooLong {
                field: "Password",
                max: bounds.max,
                actual,
            });
        }
        Ok(())
    }

    /// Title then description; first failure wins.
    pub fn validate_catch_report_content(
        &self,
        title: &str,
        description: &str,
    ) -> Result<(), ContentError> {
        self.validate_title(title)?;
        self.validate_description(description)
    }

    /// Spot name then spot description; first failure wins.
    pub fn validate_fishing_spot_content(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), ContentError> {
        self.validate_spot_name(name)?;
        self.validate_spot_description(description)
    }
}
