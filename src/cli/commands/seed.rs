//! Seed command implementation
//!
//! Loads a seed pack and writes its documents to Firestore.

use crate::adapters::database::create_document_store;
use crate::cli::DEFAULT_CONFIG_PATH;
use crate::config::{load_config, load_config_or_default, SeedpackConfig};
use crate::core::seed::{ensure_exists, SeedCoordinator, SeedOutcome, SeedRun};
use crate::domain::{Result, SeedError};
use clap::Args;

/// Arguments for the seed command
#[derive(Args, Debug, Default)]
pub struct SeedArgs {
    /// Path to the service account key JSON [default: serviceAccountKey.json]
    #[arg(long, value_name = "PATH")]
    pub service_account: Option<String>,

    /// Path to the seed pack JSON [default: seed_pack.json]
    #[arg(long, value_name = "PATH")]
    pub seed_pack: Option<String>,

    /// Documents per commit, clamped to 1..=500 [default: 450]
    #[arg(long, allow_negative_numbers = true)]
    pub batch_size: Option<i64>,

    /// Overwrite existing documents instead of merging into them
    #[arg(long)]
    pub no_merge: bool,

    /// Validate the seed pack and report target collections without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the GCP project ID from the service account key
    #[arg(long)]
    pub project_id: Option<String>,

    /// Firestore database ID [default: (default)]
    #[arg(long)]
    pub database_id: Option<String>,
}

impl SeedArgs {
    /// Execute the seed command against a resolved configuration
    ///
    /// Returns the process exit code.
    pub async fn execute(&self, config: &SeedpackConfig) -> anyhow::Result<i32> {
        tracing::info!(dry_run = config.seed.dry_run, "Starting seed command");

        match run(config).await {
            Ok(outcome) => {
                tracing::info!(outcome = ?outcome, "Seed command finished");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Seed command failed");
                eprintln!("Error: {e}");
                Ok(e.exit_code())
            }
        }
    }

    /// Load the config file and apply CLI overrides
    ///
    /// An explicitly named config file must exist; the default one is
    /// optional.
    pub fn resolve_config(&self, config_path: Option<&str>) -> Result<SeedpackConfig> {
        let mut config = match config_path {
            Some(path) => load_config(path)?,
            None => load_config_or_default(DEFAULT_CONFIG_PATH)?,
        };

        self.apply_overrides(&mut config);

        config
            .validate()
            .map_err(|e| SeedError::Configuration(format!("Validation failed: {e}")))?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut SeedpackConfig) {
        if let Some(path) = &self.service_account {
            config.seed.service_account_path = path.clone();
        }
        if let Some(path) = &self.seed_pack {
            config.seed.seed_pack_path = path.clone();
        }
        if let Some(size) = self.batch_size {
            tracing::debug!(batch_size = size, "Overriding batch size from CLI");
            config.seed.batch_size = size;
        }
        if self.no_merge {
            config.seed.merge = false;
        }
        if self.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            config.seed.dry_run = true;
        }
        if let Some(project_id) = &self.project_id {
            config.firestore.project_id = Some(project_id.clone());
        }
        if let Some(database_id) = &self.database_id {
            config.firestore.database_id = database_id.clone();
        }
    }
}

async fn run(config: &SeedpackConfig) -> Result<SeedOutcome> {
    ensure_exists(&config.seed.service_account_path, "Service account JSON")?;
    ensure_exists(&config.seed.seed_pack_path, "Seed pack JSON")?;

    let store = create_document_store(config)?;
    tracing::info!(target_db = %store.target(), "Document store ready");

    let mut coordinator = SeedCoordinator::new(SeedRun::from_config(&config.seed), store);
    let summary = coordinator.execute().await?;
    Ok(summary.outcome)
}
