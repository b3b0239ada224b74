// Seedpack - Firestore seeding tool
// Copyright (c) 2025 Seedpack Contributors
// Licensed under the MIT License

//! # Seedpack - Firestore seed pack loader
//!
//! Seedpack writes the documents described by a JSON "seed pack" into Cloud
//! Firestore, in atomic batches, merging into or overwriting existing
//! documents.
//!
//! ## Seed Pack Format
//!
//! ```json
//! {
//!   "meta": { "version": 1 },
//!   "motorcycles": [
//!     { "id": "bike_001", "data": { "make": "Honda" } }
//!   ],
//!   "listings": [
//!     { "id": "listing_001", "data": { "price": 5000 } }
//!   ]
//! }
//! ```
//!
//! Every top-level key except `meta` names a collection and must hold a list
//! of records. Each record needs a non-empty string `id` and an object `data`.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Loading, validation, batching and writing
//! - [`adapters`] - Document store abstraction and its Firestore implementation
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seedpack::core::seed::extract_items;
//! use seedpack::core::seed::batches;
//! use seedpack::domain::BatchSize;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let value = seedpack::core::seed::load_seed_pack("seed_pack.json")?;
//! let items = extract_items(value)?;
//!
//! for batch in batches(&items, BatchSize::default()) {
//!     println!("batch of {}", batch.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type
//! [`domain::SeedError`] maps to a process exit code:
//!
//! ```rust
//! use seedpack::domain::SeedError;
//!
//! let error = SeedError::not_found("Seed pack JSON", "seed_pack.json");
//! assert_eq!(error.exit_code(), 2);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
