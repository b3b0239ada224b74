//! Configuration management for seedpack.
//!
//! seedpack runs fine with no configuration file at all: every setting has a
//! default and the common ones are exposed as CLI flags. A TOML file is
//! useful for pinning the Firestore target or enabling file logging.
//!
//! # Example Configuration
//!
//! ```toml
//! log_level = "info"
//!
//! [seed]
//! service_account_path = "serviceAccountKey.json"
//! seed_pack_path = "seed_pack.json"
//! batch_size = 450
//! merge = true
//!
//! [firestore]
//! project_id = "${GCP_PROJECT}"
//! database_id = "(default)"
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and
//! `SEEDPACK_<SECTION>_<KEY>` variables override file values:
//!
//! ```bash
//! export SEEDPACK_SEED_BATCH_SIZE=200
//! export FIRESTORE_EMULATOR_HOST=localhost:8080
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{FirestoreConfig, LoggingConfig, SeedConfig, SeedpackConfig};
pub use secret::{secret_string, SecretString, SecretValue};
