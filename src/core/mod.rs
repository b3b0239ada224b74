//! Core business logic for seedpack.
//!
//! # Seeding Workflow
//!
//! 1. **Load**: Read the seed pack JSON
//! 2. **Validate**: Check its shape and extract seed items in input order
//! 3. **Batch**: Split items into groups of at most the batch size
//! 4. **Write**: Commit each group atomically, or report the target
//!    collections in dry-run mode
//!
//! # Example
//!
//! ```rust,no_run
//! use seedpack::adapters::database::create_document_store;
//! use seedpack::config::load_config_or_default;
//! use seedpack::core::seed::{SeedCoordinator, SeedRun};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("seedpack.toml")?;
//! let store = create_document_store(&config)?;
//!
//! let mut coordinator = SeedCoordinator::new(SeedRun::from_config(&config.seed), store);
//! let summary = coordinator.execute().await?;
//!
//! println!("Written: {}", summary.written);
//! # Ok(())
//! # }
//! ```

pub mod seed;
