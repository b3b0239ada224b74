//! Batch writer
//!
//! Commits one batch of seed items at a time through a [`DocumentStore`],
//! or just reports the target collections in dry-run mode.

use crate::adapters::database::{DocumentStore, DocumentWrite};
use crate::domain::{Result, SeedItem, WriteMode};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What happened to a batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// Nothing written; the distinct collections that would be, sorted
    DryRun { collections: Vec<String> },

    /// The batch was committed atomically
    Committed {
        written: usize,
        commit_time: Option<DateTime<Utc>>,
    },
}

/// Writes batches of seed items to a document store
pub struct BatchWriter {
    store: Arc<dyn DocumentStore>,
    dry_run: bool,
    mode: WriteMode,
}

impl BatchWriter {
    /// Create a new batch writer
    pub fn new(store: Arc<dyn DocumentStore>, dry_run: bool, mode: WriteMode) -> Self {
        Self {
            store,
            dry_run,
            mode,
        }
    }

    /// Sorted distinct collections a dry run would write to
    ///
    /// `None` when this writer commits for real.
    pub fn dry_run_report(&self, items: &[SeedItem]) -> Option<Vec<String>> {
        self.dry_run.then(|| distinct_collections(items))
    }

    /// Write one batch
    ///
    /// In dry-run mode the store is never touched. Otherwise every item is
    /// staged as a write keyed by `(collection, id)` and the whole batch is
    /// submitted as a single atomic commit.
    ///
    /// # Errors
    ///
    /// Propagates the store's error if the commit fails. Nothing is retried.
    pub async fn write(&self, items: &[SeedItem]) -> Result<BatchOutcome> {
        if self.dry_run {
            return Ok(BatchOutcome::DryRun {
                collections: distinct_collections(items),
            });
        }

        let writes: Vec<DocumentWrite> = items
            .iter()
            .map(|item| DocumentWrite::from_item(item, self.mode))
            .collect();

        tracing::debug!(
            documents = writes.len(),
            mode = %self.mode,
            target = %self.store.target(),
            "Committing batch"
        );

        let result = self.store.commit(writes).await?;

        Ok(BatchOutcome::Committed {
            written: result.write_count,
            commit_time: result.commit_time,
        })
    }
}

/// Distinct collection names of `items`, sorted
pub fn distinct_collections(items: &[SeedItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.collection.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
