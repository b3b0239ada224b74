//! External system adapters
//!
//! - [`database`] - The document store abstraction seed batches are written to
//! - [`firestore`] - Cloud Firestore REST implementation of that abstraction

pub mod database;
pub mod firestore;
