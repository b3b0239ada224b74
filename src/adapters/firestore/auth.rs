//! Firestore authentication
//!
//! A Google service account key is turned into an OAuth2 bearer token by
//! signing an RS256 JWT assertion and exchanging it at the key's
//! `token_uri`. Tokens are cached until shortly before they expire.
//!
//! The Firestore emulator accepts the fixed `owner` token instead.

use crate::config::{secret_string, SecretString};
use crate::domain::{Result, SeedError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::sync::Mutex;

/// OAuth scope granting read/write access to Firestore
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const EMULATOR_TOKEN: &str = "owner";

/// Service account key structure
///
/// Only the fields needed to mint tokens are kept; the rest of the key file
/// is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: SecretString,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Load a service account key from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is missing and `Authentication` if it
    /// is not a service account key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SeedError::not_found(
                "Service account JSON",
                path.display().to_string(),
            ));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SeedError::Authentication(format!(
                "Failed to read service account file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_json(&contents)
    }

    /// Parse a service account key from its JSON text
    pub fn from_json(json_str: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json_str).map_err(|e| {
            SeedError::Authentication(format!("Invalid service account JSON: {e}"))
        })?;

        if key.key_type != "service_account" {
            return Err(SeedError::Authentication(format!(
                "Expected credential type 'service_account', got '{}'",
                key.key_type
            )));
        }

        if key.private_key.expose_secret().is_empty() {
            return Err(SeedError::Authentication(
                "Service account key has an empty private_key".to_string(),
            ));
        }

        Ok(key)
    }
}

/// A service account key with its private key parsed for RS256 signing
#[derive(Clone)]
pub struct ServiceAccountSigner {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
}

impl ServiceAccountSigner {
    /// Parse the key's PEM private key
    ///
    /// # Errors
    ///
    /// Returns an authentication error if `private_key` is not an RSA PEM.
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_str().as_bytes())
                .map_err(|e| {
                    SeedError::Authentication(format!(
                        "Invalid service account private key: {e}"
                    ))
                })?;

        Ok(Self { key, encoding_key })
    }

    /// The key this signer was built from
    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Sign the JWT assertion exchanged for an access token
    fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + 3600,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key).map_err(|e| {
            SeedError::Authentication(format!("Failed to sign token assertion: {e}"))
        })
    }
}

impl fmt::Debug for ServiceAccountSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountSigner")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// How requests are authorized
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Real Firestore, authorized with a service account
    ServiceAccount(ServiceAccountSigner),

    /// Local emulator, which trusts the `owner` token
    Emulator,
}

/// OAuth2 token with expiration
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// True once the token is within five minutes of expiring
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at - Duration::minutes(5)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Hands out bearer tokens, minting new ones when the cached one expires
#[derive(Debug)]
pub struct TokenProvider {
    credentials: Credentials,
    cache: Mutex<Option<AccessToken>>,
    http_client: reqwest::Client,
}

impl TokenProvider {
    /// Create a new token provider
    pub fn new(credentials: Credentials, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            cache: Mutex::new(None),
            http_client,
        }
    }

    /// Credentials this provider was built with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get a valid bearer token
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the assertion cannot be signed or
    /// the token endpoint refuses it.
    pub async fn bearer_token(&self) -> Result<SecretString> {
        let signer = match &self.credentials {
            Credentials::Emulator => return Ok(secret_string(EMULATOR_TOKEN.to_string())),
            Credentials::ServiceAccount(signer) => signer,
        };

        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        tracing::debug!(
            client_email = %signer.key().client_email,
            "Requesting Firestore access token"
        );
        let token = self.fetch_service_account_token(signer).await?;
        let bearer = token.token.clone();
        *cache = Some(token);
        Ok(bearer)
    }

    async fn fetch_service_account_token(
        &self,
        signer: &ServiceAccountSigner,
    ) -> Result<AccessToken> {
        let key = signer.key();
        let assertion = signer.assertion(Utc::now())?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = self
            .http_client
            .post(&key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| SeedError::Authentication(format!("Token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SeedError::Authentication(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            SeedError::Authentication(format!("Invalid token endpoint response: {e}"))
        })?;

        Ok(AccessToken {
            token: secret_string(token_response.access_token),
            expires_at: Utc::now() + Duration::seconds(token_response.expires_in),
        })
    }
}

/// Unencrypted PKCS#8 RSA key used by the unit tests
#[cfg(test)]
pub(crate) const TEST_RSA_KEY_PEM: &str = include_str!("../../../tests/fixtures/test_rsa_key.pem");
