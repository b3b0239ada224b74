//! Domain identifier types with validation
//!
//! Newtype wrappers for the two halves of a Firestore document key.
//! Document IDs must be non-empty; collection names are taken as given and
//! left to the store to accept or reject.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Collection name newtype wrapper
///
/// # Examples
///
/// ```
/// use seedpack::domain::ids::CollectionName;
/// use std::str::FromStr;
///
/// let collection = CollectionName::from_str("motorcycles").unwrap();
/// assert_eq!(collection.as_str(), "motorcycles");
/// assert!(CollectionName::new("").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionName(String);

impl CollectionName {
    /// Creates a new CollectionName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Whether the name is the empty string, which no store can address
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Document ID newtype wrapper
///
/// # Examples
///
/// ```
/// use seedpack::domain::ids::DocumentId;
///
/// let id = DocumentId::new("bike_001").unwrap();
/// assert_eq!(id.to_string(), "bike_001");
/// assert!(DocumentId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId, rejecting empty IDs
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
