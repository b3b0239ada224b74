//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels (`--log-level`, `RUST_LOG`)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use seedpack::logging::init_logging;
//! use seedpack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a committed batch with cumulative progress
///
/// # Example
///
/// ```no_run
/// use seedpack::log_batch_committed;
///
/// log_batch_committed!(3, 450, 1200);
/// ```
#[macro_export]
macro_rules! log_batch_committed {
    ($batch_index:expr, $written:expr, $total:expr) => {
        tracing::info!(
            batch = $batch_index,
            written = $written,
            total = $total,
            progress_pct = ($written as f64 / $total as f64 * 100.0),
            "Committed batch"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use seedpack::log_error_with_context;
/// use seedpack::domain::SeedError;
///
/// let error = SeedError::Parse("trailing comma".to_string());
/// log_error_with_context!(&error, "Failed to load seed pack");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
