//! Seed pack domain model
//!
//! A seed pack flattens into an ordered list of [`SeedItem`]s, which are
//! committed in groups no larger than a [`BatchSize`].

use super::ids::{CollectionName, DocumentId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One document to write: `(collection, id, data)`
#[derive(Debug, Clone, PartialEq)]
pub struct SeedItem {
    /// Target collection
    pub collection: CollectionName,

    /// Target document ID
    pub id: DocumentId,

    /// Document body
    pub data: Map<String, Value>,
}

impl SeedItem {
    /// Creates a new seed item
    pub fn new(collection: CollectionName, id: DocumentId, data: Map<String, Value>) -> Self {
        Self {
            collection,
            id,
            data,
        }
    }

    /// Document path relative to the database root: `{collection}/{id}`
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

/// How a document write treats an existing document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Upsert, keeping existing fields not present in the new data
    #[default]
    Merge,
    /// Replace the existing document entirely
    Overwrite,
}

impl WriteMode {
    /// Maps the `merge` flag onto a write mode
    pub fn from_merge(merge: bool) -> Self {
        if merge {
            WriteMode::Merge
        } else {
            WriteMode::Overwrite
        }
    }

    /// Returns true for [`WriteMode::Merge`]
    pub fn is_merge(&self) -> bool {
        matches!(self, WriteMode::Merge)
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Merge => write!(f, "merge"),
            WriteMode::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(WriteMode::Merge),
            "overwrite" => Ok(WriteMode::Overwrite),
            _ => Err(format!(
                "Invalid write mode '{s}'. Must be 'merge' or 'overwrite'"
            )),
        }
    }
}

/// Number of documents per commit, always within `[1, 500]`
///
/// Firestore rejects commits with more than 500 writes, so the upper
/// bound is a hard ceiling rather than a tuning knob.
///
/// # Examples
///
/// ```
/// use seedpack::domain::seed::BatchSize;
///
/// assert_eq!(BatchSize::clamped(0).get(), 1);
/// assert_eq!(BatchSize::clamped(450).get(), 450);
/// assert_eq!(BatchSize::clamped(10_000).get(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Smallest allowed batch size
    pub const MIN: usize = 1;

    /// Firestore's per-commit write limit
    pub const MAX: usize = 500;

    /// Batch size used when none is configured, leaving headroom under the limit
    pub const DEFAULT: usize = 450;

    /// Clamps any integer into `[MIN, MAX]`
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(Self::MIN as i64, Self::MAX as i64);
        Self(value as usize)
    }

    /// Returns the batch size
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
