//! External correlation id type.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated external correlation id (the `vimId` field in the store schema).
///
/// The id ends up inside a quoted string literal of a PocketBase filter
/// expression. Backslashes and control characters are rejected outright,
/// and single quotes are escaped by [`ExternalId::filter_literal`], so no
/// value can close the literal early.
///
/// # Example
///
/// ```
/// use floppa_core::ExternalId;
///
/// let id = ExternalId::new("o'brien").unwrap();
/// assert_eq!(id.filter_literal(), r"'o\'brien'");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    /// Maximum length accepted for an external id.
    pub const MAX_LEN: usize = 256;

    /// Create a new external id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, too long, or contains a backslash
    /// or a control character.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id as a single-quoted filter-expression literal.
    pub fn filter_literal(&self) -> String {
        format!("'{}'", self.0.replace('\'', "\\'"))
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reason = if s.is_empty() {
            Some("cannot be empty".to_string())
        } else if s.len() > Self::MAX_LEN {
            Some(format!("exceeds {} bytes", Self::MAX_LEN))
        } else if s.contains('\\') {
            Some("backslashes are not allowed".to_string())
        } else if s.chars().any(char::is_control) {
            Some("control characters are not allowed".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInputError::ExternalId {
                value: s.to_string(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExternalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
