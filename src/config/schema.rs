//! Configuration schema types
//!
//! This module defines the configuration structure for seedpack. Every
//! section has defaults, so an empty (or absent) TOML file is valid.

use crate::domain::seed::{BatchSize, WriteMode};
use serde::{Deserialize, Serialize};

/// Main seedpack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedpackConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seeding run settings
    #[serde(default)]
    pub seed: SeedConfig,

    /// Firestore target settings
    #[serde(default)]
    pub firestore: FirestoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SeedpackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        self.seed.validate()?;
        self.firestore.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for SeedpackConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            seed: SeedConfig::default(),
            firestore: FirestoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Seeding run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Path to the Firebase service account key JSON
    #[serde(default = "default_service_account_path")]
    pub service_account_path: String,

    /// Path to the seed pack JSON
    #[serde(default = "default_seed_pack_path")]
    pub seed_pack_path: String,

    /// Documents per commit; clamped to [1, 500] when used
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,

    /// Merge into existing documents instead of overwriting them
    #[serde(default = "default_true")]
    pub merge: bool,

    /// Validate and report without writing
    #[serde(default)]
    pub dry_run: bool,
}

impl SeedConfig {
    fn validate(&self) -> Result<(), String> {
        if self.service_account_path.trim().is_empty() {
            return Err("seed.service_account_path cannot be empty".to_string());
        }
        if self.seed_pack_path.trim().is_empty() {
            return Err("seed.seed_pack_path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Effective batch size after clamping
    pub fn batch_size(&self) -> BatchSize {
        BatchSize::clamped(self.batch_size)
    }

    /// Effective write mode
    pub fn write_mode(&self) -> WriteMode {
        WriteMode::from_merge(self.merge)
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            service_account_path: default_service_account_path(),
            seed_pack_path: default_seed_pack_path(),
            batch_size: default_batch_size(),
            merge: true,
            dry_run: false,
        }
    }
}

/// Firestore target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// GCP project ID; taken from the service account key when unset
    #[serde(default)]
    pub project_id: Option<String>,

    /// Firestore database ID
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Firestore REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Firestore emulator `host:port`; when set, requests bypass OAuth
    #[serde(default)]
    pub emulator_host: Option<String>,
}

impl FirestoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.database_id.trim().is_empty() {
            return Err("firestore.database_id cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "firestore.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if let Some(host) = &self.emulator_host {
            if host.trim().is_empty() || host.contains("://") {
                return Err(format!(
                    "firestore.emulator_host must be in host:port form, got '{host}'"
                ));
            }
        }

        if let Some(project_id) = &self.project_id {
            if project_id.trim().is_empty() {
                return Err("firestore.project_id cannot be empty when set".to_string());
            }
        }

        Ok(())
    }

    /// REST endpoint the client talks to
    ///
    /// The emulator speaks plain HTTP on `http://{emulator_host}/v1`.
    pub fn endpoint(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => self.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns true when targeting the local emulator
    pub fn uses_emulator(&self) -> bool {
        self.emulator_host.is_some()
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            database_id: default_database_id(),
            base_url: default_base_url(),
            emulator_host: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_service_account_path() -> String {
    "serviceAccountKey.json".to_string()
}

fn default_seed_pack_path() -> String {
    "seed_pack.json".to_string()
}

fn default_batch_size() -> i64 {
    BatchSize::DEFAULT as i64
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
