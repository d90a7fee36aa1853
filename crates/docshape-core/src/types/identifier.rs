//! Identifier field name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The record field that receives a document's storage key on decode.
///
/// # Example
///
/// ```
/// use docshape_core::IdentifierField;
///
/// let field = IdentifierField::new("docId").unwrap();
/// assert_eq!(field.as_str(), "docId");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentifierField(String);

impl IdentifierField {
    /// Field names written when no explicit identifier field is requested.
    pub const DEFAULT_FIELDS: [&'static str; 2] = ["id", "uid"];

    /// Create a new identifier field name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or blank.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.trim().is_empty() {
            return Err(InvalidInputError::IdentifierField {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdentifierField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IdentifierField {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<IdentifierField> for String {
    fn from(field: IdentifierField) -> Self {
        field.0
    }
}

impl AsRef<str> for IdentifierField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
