//! Document store factory
//!
//! Builds the single store handle a run uses from configuration.

use crate::adapters::database::traits::DocumentStore;
use crate::adapters::firestore::{FirestoreAdapter, FirestoreClient, ServiceAccountKey};
use crate::config::SeedpackConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the document store for a run
///
/// Reads the service account key named by `seed.service_account_path`.
/// No network I/O happens here; tokens are requested on the first commit.
///
/// # Errors
///
/// Returns `NotFound` if the key file is missing, or an authentication
/// error if it is not a usable service account key.
pub fn create_document_store(config: &SeedpackConfig) -> Result<Arc<dyn DocumentStore>> {
    let key = ServiceAccountKey::from_file(&config.seed.service_account_path)?;

    tracing::info!(
        client_email = %key.client_email,
        emulator = config.firestore.uses_emulator(),
        "Creating Firestore client"
    );

    let client = FirestoreClient::new(&config.firestore, key)?;
    Ok(Arc::new(FirestoreAdapter::new(client)))
}
