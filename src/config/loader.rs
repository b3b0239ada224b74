//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Precedence, lowest first: built-in defaults, the TOML file,
//! `SEEDPACK_*` environment variables, then CLI flags (applied by the
//! command itself).

use super::schema::SeedpackConfig;
use crate::domain::errors::SeedError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SeedpackConfig
/// 4. Applies environment variable overrides (SEEDPACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, if TOML parsing
/// or substitution fails, or if validation fails.
///
/// # Examples
///
/// ```no_run
/// use seedpack::config::loader::load_config;
///
/// let config = load_config("seedpack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SeedpackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SeedError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SeedError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SeedpackConfig = toml::from_str(&contents)
        .map_err(|e| SeedError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| SeedError::Configuration(format!("Configuration validation failed: {}", e)))?;

    Ok(config)
}

/// Loads configuration from `path` if it exists, otherwise from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<SeedpackConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = SeedpackConfig::default();
    apply_env_overrides(&mut config)?;
    config
        .validate()
        .map_err(|e| SeedError::Configuration(format!("Configuration validation failed: {}", e)))?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SeedError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(SeedError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the SEEDPACK_* prefix
///
/// Variables follow the pattern `SEEDPACK_<SECTION>_<KEY>`, for example
/// `SEEDPACK_SEED_BATCH_SIZE`. `FIRESTORE_EMULATOR_HOST` is honoured under
/// its conventional name.
///
/// # Errors
///
/// Returns a configuration error for a boolean or numeric override that
/// cannot be parsed.
fn apply_env_overrides(config: &mut SeedpackConfig) -> Result<()> {
    if let Ok(val) = std::env::var("SEEDPACK_LOG_LEVEL") {
        config.log_level = val;
    }

    // Seed overrides
    if let Ok(val) = std::env::var("SEEDPACK_SEED_SERVICE_ACCOUNT_PATH") {
        config.seed.service_account_path = val;
    }
    if let Ok(val) = std::env::var("SEEDPACK_SEED_SEED_PACK_PATH") {
        config.seed.seed_pack_path = val;
    }
    if let Ok(val) = std::env::var("SEEDPACK_SEED_BATCH_SIZE") {
        config.seed.batch_size = val.trim().parse().map_err(|_| {
            SeedError::Configuration(format!(
                "SEEDPACK_SEED_BATCH_SIZE must be an integer, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("SEEDPACK_SEED_MERGE") {
        config.seed.merge = parse_bool("SEEDPACK_SEED_MERGE", &val)?;
    }
    if let Ok(val) = std::env::var("SEEDPACK_SEED_DRY_RUN") {
        config.seed.dry_run = parse_bool("SEEDPACK_SEED_DRY_RUN", &val)?;
    }

    // Firestore overrides
    if let Ok(val) = std::env::var("SEEDPACK_FIRESTORE_PROJECT_ID") {
        config.firestore.project_id = Some(val);
    }
    if let Ok(val) = std::env::var("SEEDPACK_FIRESTORE_DATABASE_ID") {
        config.firestore.database_id = val;
    }
    if let Ok(val) = std::env::var("SEEDPACK_FIRESTORE_BASE_URL") {
        config.firestore.base_url = val;
    }
    if let Ok(val) = std::env::var("FIRESTORE_EMULATOR_HOST") {
        if !val.trim().is_empty() {
            config.firestore.emulator_host = Some(val);
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SEEDPACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("SEEDPACK_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("SEEDPACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

/// Parses a boolean override; accepts true/false, 1/0, yes/no and on/off
fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SeedError::Configuration(format!(
            "{name} must be a boolean (true/false, 1/0, yes/no), got '{value}'"
        ))),
    }
}
