//! Batch partitioning
//!
//! Splits the ordered seed items into contiguous groups, each committed as
//! one atomic write.

use crate::domain::{BatchSize, SeedItem};
use std::slice::Chunks;

/// Partition `items` into batches of at most `size` items
///
/// Batches are contiguous and keep input order; only the last one may be
/// shorter than `size`.
pub fn batches(items: &[SeedItem], size: BatchSize) -> Chunks<'_, SeedItem> {
    items.chunks(size.get())
}

/// Number of batches `batches` will yield
pub fn batch_count(item_count: usize, size: BatchSize) -> usize {
    item_count.div_ceil(size.get())
}
