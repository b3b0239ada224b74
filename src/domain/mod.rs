//! Domain models and types for seedpack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CollectionName`], [`DocumentId`])
//! - **Seed model** ([`SeedItem`], [`WriteMode`], [`BatchSize`])
//! - **Error types** ([`SeedError`], [`ShapeError`], [`FirestoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SeedError>`]:
//!
//! ```rust
//! use seedpack::domain::{Result, SeedError};
//!
//! fn example() -> Result<()> {
//!     Err(SeedError::not_found("Seed pack JSON", "seed_pack.json"))
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod seed;

// Re-export commonly used types for convenience
pub use errors::{FirestoreError, SeedError, ShapeError};
pub use ids::{CollectionName, DocumentId};
pub use result::Result;
pub use seed::{BatchSize, SeedItem, WriteMode};
