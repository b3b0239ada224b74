//! Database abstraction layer
//!
//! This module provides a trait-based abstraction over the document store
//! that receives seed batches.

pub mod factory;
pub mod traits;

pub use factory::create_document_store;
pub use traits::{CommitResult, DocumentStore, DocumentWrite};
