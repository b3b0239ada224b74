//! Firestore REST client
//!
//! Thin wrapper over the `documents:commit` endpoint. The client is built
//! once per run and shared; building it performs no network I/O.

use super::auth::{Credentials, ServiceAccountKey, ServiceAccountSigner, TokenProvider};
use super::models::{CommitRequest, CommitResponse, ErrorResponse};
use crate::config::FirestoreConfig;
use crate::domain::{FirestoreError, Result, SeedError};
use secrecy::ExposeSecret;

/// Firestore client for seedpack
#[derive(Debug)]
pub struct FirestoreClient {
    http_client: reqwest::Client,
    endpoint: String,
    project_id: String,
    database_id: String,
    tokens: TokenProvider,
}

impl FirestoreClient {
    /// Create a new Firestore client
    ///
    /// The project ID comes from the configuration when set, otherwise from
    /// the service account key. With an emulator host configured the key is
    /// only used for its project ID; otherwise its private key is parsed
    /// here, before any seed data is read.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the private key is not a valid RSA
    /// PEM, or a configuration error if the HTTP client cannot be built.
    pub fn new(config: &FirestoreConfig, key: ServiceAccountKey) -> Result<Self> {
        let project_id = config
            .project_id
            .clone()
            .unwrap_or_else(|| key.project_id.clone());

        let credentials = if config.uses_emulator() {
            Credentials::Emulator
        } else {
            Credentials::ServiceAccount(ServiceAccountSigner::new(key)?)
        };

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("seedpack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SeedError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let tokens = TokenProvider::new(credentials, http_client.clone());

        Ok(Self {
            http_client,
            endpoint: config.endpoint(),
            project_id,
            database_id: config.database_id.clone(),
            tokens,
        })
    }

    /// Returns true when requests go to the local emulator
    pub fn uses_emulator(&self) -> bool {
        matches!(self.tokens.credentials(), Credentials::Emulator)
    }

    /// `projects/{project}/databases/{database}`
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/databases/{}",
            self.project_id, self.database_id
        )
    }

    /// Full resource name of a document
    pub fn document_name(&self, document_path: &str) -> String {
        format!("{}/documents/{}", self.database_path(), document_path)
    }

    /// Get the project ID
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Get the REST endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a commit request
    ///
    /// # Errors
    ///
    /// Transport failures map to `FirestoreError::ConnectionFailed`,
    /// non-success statuses to `FirestoreError::CommitFailed`.
    pub async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse> {
        let url = format!("{}/{}/documents:commit", self.endpoint, self.database_path());
        let token = self.tokens.bearer_token().await?;

        tracing::debug!(url = %url, writes = request.writes.len(), "Sending commit");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.expose_secret().as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| FirestoreError::ConnectionFailed(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => match parsed.error.status {
                    Some(code) => format!("{code}: {}", parsed.error.message),
                    None => parsed.error.message,
                },
                Err(_) => body,
            };
            return Err(FirestoreError::CommitFailed {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let commit_response = response
            .json::<CommitResponse>()
            .await
            .map_err(|e| FirestoreError::DeserializationFailed(e.to_string()))?;

        Ok(commit_response)
    }
}
