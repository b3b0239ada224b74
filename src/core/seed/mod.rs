//! Seed pack loading, validation, batching and writing
//!
//! - [`loader`] - Read the seed pack file as loosely typed JSON
//! - [`extract`] - Check its shape and pull out [`SeedItem`](crate::domain::SeedItem)s
//! - [`batch`] - Partition items into commit-sized batches
//! - [`writer`] - Commit a batch, or report it in dry-run mode
//! - [`coordinator`] - Drive a whole run

pub mod batch;
pub mod coordinator;
pub mod extract;
pub mod loader;
pub mod summary;
pub mod writer;

pub use batch::{batch_count, batches};
pub use coordinator::{RunStage, SeedCoordinator, SeedRun};
pub use extract::{extract_items, SeedItems, SeedPack};
pub use loader::{ensure_exists, load_seed_pack};
pub use summary::{SeedOutcome, SeedSummary};
pub use writer::{BatchOutcome, BatchWriter};
