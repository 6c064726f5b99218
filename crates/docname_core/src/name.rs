//! Document names.
//!
//! A [`DocumentName`] is the user-facing identifier of a document in the
//! store. Names live in a flat namespace, so the characters the store would
//! read as path or drive separators are not allowed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DocnameError, Result};

/// Characters that may not appear in a document name.
pub const FORBIDDEN_CHARS: [char; 3] = [':', '/', '\\'];

/// Shown in the rename prompt when the proposed name is rejected.
pub const INVALID_NAME_MESSAGE: &str = "Invalid document name. Document names must have 1 or more \
     characters and can contain any characters except :/\\. Please enter a new document name:";

/// Check whether `name` is acceptable as a document name.
///
/// A name is valid when it is non-empty and contains none of
/// [`FORBIDDEN_CHARS`]. No trimming or normalization is applied.
pub fn is_valid(name: &str) -> bool {
    !name.is_empty() && !name.contains(FORBIDDEN_CHARS)
}

/// A validated document name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    /// Validate `name` and wrap it.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(DocnameError::InvalidName(name))
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DocumentName {
    type Err = DocnameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentName {
    type Error = DocnameError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DocumentName> for String {
    fn from(name: DocumentName) -> Self {
        name.0
    }
}

impl PartialEq<str> for DocumentName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DocumentName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
