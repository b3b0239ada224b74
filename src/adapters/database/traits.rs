//! Database abstraction traits
//!
//! This module defines the trait a document database adapter must implement
//! to receive seed batches.

use crate::domain::ids::{CollectionName, DocumentId};
use crate::domain::seed::{SeedItem, WriteMode};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A single staged document write
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    /// Target collection
    pub collection: CollectionName,

    /// Target document ID
    pub document_id: DocumentId,

    /// Document body
    pub data: Map<String, Value>,

    /// Merge into or replace an existing document
    pub mode: WriteMode,
}

impl DocumentWrite {
    /// Stages a write for a seed item
    pub fn from_item(item: &SeedItem, mode: WriteMode) -> Self {
        Self {
            collection: item.collection.clone(),
            document_id: item.id.clone(),
            data: item.data.clone(),
            mode,
        }
    }

    /// Document path relative to the database root
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.document_id)
    }
}

/// Result of an atomic commit
#[derive(Debug, Clone)]
pub struct CommitResult {
    /// Number of writes applied
    pub write_count: usize,

    /// Server-side commit timestamp, when the backend reports one
    pub commit_time: Option<DateTime<Utc>>,
}

/// Document store trait for seed writes
///
/// Implementations must apply all writes of one `commit` call atomically:
/// either every document is durably written or the call fails as a whole.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Atomically commit a group of staged writes
    ///
    /// # Arguments
    ///
    /// * `writes` - Staged writes; at most 500 for Firestore
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Commit` if the backend rejects or fails the
    /// commit, or an authentication error if credentials cannot be used.
    async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<CommitResult>;

    /// Human-readable description of the target, e.g. `projects/p/databases/d`
    fn target(&self) -> String;
}
