//! Parsing and validation of comma-separated fish species lists.
//!
//! Grammar: the trimmed string may contain only letters, commas and
//! whitespace; commas separate species names; each name is 3–15 letters
//! with no internal whitespace.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::OnceLock;
use thiserror::Error;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 15;

fn grammar_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z,\s]+$").unwrap())
}

fn letters_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+$").unwrap())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeciesError {
    #[error("Species cannot be empty")]
    Empty,

    #[error("Only letters and commas are allowed")]
    InvalidCharacters,

    #[error("No consecutive commas allowed")]
    ConsecutiveCommas,

    #[error("Species names cannot start or end with a comma")]
    EdgeComma,

    #[error("At least one species name is required")]
    NoNames,

    #[error("Each species name must be 3-15 letters. \"{name}\" is {len} letters")]
    BadLength { name: String, len: usize },

    #[error("Species names must contain only letters. \"{name}\" contains other characters")]
    NotLetters { name: String },
}

/// Validate a comma-separated species list against the grammar.
pub fn validate_species(species: &str) -> Result<(), SpeciesError> {
    let trimmed = species.trim();
    if trimmed.is_empty() {
        return Err(SpeciesError::Empty);
    }
    if !grammar_regex().is_match(trimmed) {
        return Err(SpeciesError::InvalidCharacters);
    }
    if trimmed.contains(",,") {
        return Err(SpeciesError::ConsecutiveCommas);
    }
    if trimmed.starts_with(',') || trimmed.ends_with(',') {
        return Err(SpeciesError::EdgeComma);
    }

    let names: SmallVec<[&str; 4]> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Err(SpeciesError::NoNames);
    }

    for name in names {
        let len = name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(SpeciesError::BadLength {
                name: name.to_string(),
                len,
            });
        }
        if !letters_regex().is_match(name) {
            return Err(SpeciesError::NotLetters {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

/// Split a species string into title-cased names for display.
///
/// Does not re-validate: malformed input is formatted best-effort and the
/// function never fails.
#[must_use]
pub fn format_species_for_display(species: &str) -> SmallVec<[String; 4]> {
    species
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(title_case)
        .collect()
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
