//! Shared types used across the Scout workspace.

use crate::error::ScoutError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for provider identifiers with validation.
///
/// Provider IDs are 1-64 characters of ASCII letters, digits, `_`, `-` or `.`,
/// starting with a letter or digit (e.g. `biosmods`, `mail_ru`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a new `ProviderId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, ScoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), ScoutError> {
        static PROVIDER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PROVIDER_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(ScoutError::Validation(format!(
                "invalid provider ID: must be 1-64 alphanumeric, '_', '-' or '.' characters, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

/// Tri-state answer to "is this email registered with the provider?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Existence {
    /// Confirmed registered
    Exists,
    /// Confirmed not registered
    Absent,
    /// Blocked, failed or inconclusive
    #[default]
    Unknown,
}

impl Existence {
    /// Whether the provider confirmed an account.
    #[must_use]
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Exists)
    }

    /// Whether the probe produced a definite answer either way.
    #[must_use]
    pub fn is_conclusive(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<bool> for Existence {
    fn from(exists: bool) -> Self {
        if exists {
            Self::Exists
        } else {
            Self::Absent
        }
    }
}

/// Check whether a string looks like an email address.
///
/// This is a coarse syntactic check meant for input loaders; the lookup
/// engine itself never validates its input.
#[must_use]
pub fn is_email(candidate: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
    });
    regex.is_match(candidate)
}
