//! Seeding run summary

use std::time::Duration;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed pack held no records; nothing was written
    Empty,

    /// Validation only; nothing was written
    DryRun,

    /// Every batch was committed
    Completed,
}

/// Summary of a successful seeding run
#[derive(Debug, Clone)]
pub struct SeedSummary {
    /// How the run ended
    pub outcome: SeedOutcome,

    /// Number of seed items extracted from the pack
    pub total_items: usize,

    /// Number of documents written
    pub written: usize,

    /// Number of batches committed
    pub batches_committed: usize,

    /// Distinct target collections, sorted
    pub collections: Vec<String>,

    /// Duration of the run
    pub duration: Duration,
}

impl SeedSummary {
    /// Create a summary for a run that ended with `outcome`
    pub fn new(outcome: SeedOutcome, total_items: usize) -> Self {
        Self {
            outcome,
            total_items,
            written: 0,
            batches_committed: 0,
            collections: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the target collections
    pub fn with_collections(mut self, collections: Vec<String>) -> Self {
        self.collections = collections;
        self
    }

    /// Log the summary
    pub fn log(&self) {
        tracing::info!(
            outcome = ?self.outcome,
            total_items = self.total_items,
            written = self.written,
            batches = self.batches_committed,
            collections = self.collections.len(),
            duration_secs = self.duration.as_secs_f64(),
            "Seeding run finished"
        );
    }
}
