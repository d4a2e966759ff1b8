//! Collection name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated record-store collection name.
///
/// PocketBase collection names are ASCII letters, digits and underscores,
/// so a valid name is always safe to use as a URL path segment.
///
/// # Example
///
/// ```
/// use floppa_core::CollectionName;
///
/// let name = CollectionName::new("capybaras").unwrap();
/// assert_eq!(name.as_str(), "capybaras");
/// assert!(CollectionName::new("../admins").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Maximum length accepted for a collection name.
    pub const MAX_LEN: usize = 255;

    /// Create a new collection name from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, too long, or contains characters
    /// other than ASCII letters, digits and underscores.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the collection name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reason = if s.is_empty() {
            Some("cannot be empty".to_string())
        } else if s.len() > Self::MAX_LEN {
            Some(format!("exceeds {} characters", Self::MAX_LEN))
        } else {
            s.chars()
                .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
                .map(|c| format!("invalid character '{}'", c))
        };

        match reason {
            Some(reason) => Err(InvalidInputError::CollectionName {
                value: s.to_string(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CollectionName> for String {
    fn from(value: CollectionName) -> Self {
        value.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["macky", "capybaras", "cats_2024", "_pb_users"] {
            assert!(CollectionName::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(CollectionName::new("").is_err());
    }

    #[test]
    fn rejects_path_characters() {
        assert!(CollectionName::new("macky/records").is_err());
        assert!(CollectionName::new("a b").is_err());
        assert!(CollectionName::new("..").is_err());
    }

    #[test]
    fn rejects_overlong() {
        assert!(CollectionName::new("a".repeat(256)).is_err());
    }

    #[test]
    fn serde_validates() {
        let name: CollectionName = serde_json::from_str("\"macky\"").unwrap();
        assert_eq!(name.as_str(), "macky");
        assert!(serde_json::from_str::<CollectionName>("\"no-dashes\"").is_err());
    }
}
