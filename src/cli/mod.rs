//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for seedpack using clap.

pub mod commands;

use crate::config::SeedpackConfig;
use crate::domain::Result;
use clap::Parser;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "seedpack.toml";

/// Seedpack - Firestore seeding tool
#[derive(Parser, Debug)]
#[command(name = "seedpack")]
#[command(version, about, long_about = None)]
#[command(author = "Seedpack Contributors")]
pub struct Cli {
    /// Path to configuration file [default: seedpack.toml, optional]
    #[arg(short, long, env = "SEEDPACK_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SEEDPACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub seed: commands::seed::SeedArgs,
}

impl Cli {
    /// Load configuration and apply the seed flags on top
    pub fn resolve_config(&self) -> Result<SeedpackConfig> {
        self.seed.resolve_config(self.config.as_deref())
    }

    /// Effective log level: the flag, else the configured one
    pub fn effective_log_level<'a>(&'a self, config: &'a SeedpackConfig) -> &'a str {
        self.log_level.as_deref().unwrap_or(&config.log_level)
    }

    /// Run the seed command
    pub async fn execute(&self, config: &SeedpackConfig) -> anyhow::Result<i32> {
        self.seed.execute(config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["seedpack"]);
        assert_eq!(cli.config, None);
        assert_eq!(cli.seed.service_account, None);
        assert_eq!(cli.seed.batch_size, None);
        assert!(!cli.seed.no_merge);
        assert!(!cli.seed.dry_run);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["seedpack", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some("custom.toml".to_string()));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["seedpack", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_seed_flags() {
        let cli = Cli::parse_from([
            "seedpack",
            "--service-account",
            "key.json",
            "--seed-pack",
            "pack.json",
            "--batch-size",
            "10",
            "--no-merge",
            "--dry-run",
            "--project-id",
            "demo",
            "--database-id",
            "staging",
        ]);
        assert_eq!(cli.seed.service_account.as_deref(), Some("key.json"));
        assert_eq!(cli.seed.seed_pack.as_deref(), Some("pack.json"));
        assert_eq!(cli.seed.batch_size, Some(10));
        assert!(cli.seed.no_merge);
        assert!(cli.seed.dry_run);
        assert_eq!(cli.seed.project_id.as_deref(), Some("demo"));
        assert_eq!(cli.seed.database_id.as_deref(), Some("staging"));
    }

    #[test]
    fn test_effective_log_level() {
        let config = SeedpackConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };
        let cli = Cli::parse_from(["seedpack"]);
        assert_eq!(cli.effective_log_level(&config), "warn");

        let cli = Cli::parse_from(["seedpack", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(&config), "trace");
    }

    #[test]
    fn test_cli_parse_negative_batch_size() {
        let cli = Cli::parse_from(["seedpack", "--batch-size", "-5"]);
        assert_eq!(cli.seed.batch_size, Some(-5));
    }
}
