//! Domain error types
//!
//! This module defines the error hierarchy for seedpack.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main seedpack error type
///
/// Every variant is fatal to a seeding run. Nothing is retried internally;
/// the error is propagated to the CLI, which maps it to an exit code.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A required input file does not exist
    #[error("{kind} not found: {path}")]
    NotFound { kind: String, path: String },

    /// The seed pack is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// The seed pack violates the expected structure
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// The database rejected or failed a batch commit
    #[error("Commit error: {0}")]
    Commit(#[from] FirestoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential loading or token exchange errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SeedError {
    /// Creates a `NotFound` error for the given kind of file
    pub fn not_found(kind: impl Into<String>, path: impl Into<String>) -> Self {
        SeedError::NotFound {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// - 2: input or configuration problems
    /// - 4: authentication / connection failures
    /// - 5: commit failures and anything else fatal
    pub fn exit_code(&self) -> i32 {
        match self {
            SeedError::NotFound { .. }
            | SeedError::Parse(_)
            | SeedError::Shape(_)
            | SeedError::Configuration(_) => 2,
            SeedError::Authentication(_) => 4,
            SeedError::Commit(FirestoreError::ConnectionFailed(_)) => 4,
            SeedError::Commit(_) | SeedError::Io(_) | SeedError::Serialization(_) => 5,
        }
    }
}

/// Seed pack structure violations
///
/// Each variant carries enough context (collection, record content)
/// to locate the offending input.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// The top-level JSON value is not an object
    #[error("Seed pack must be a JSON object, got {found}")]
    NotAnObject { found: String },

    /// A collection value is not a list
    #[error("Collection '{collection}' must be a list, got {found}")]
    CollectionNotList { collection: String, found: String },

    /// A record inside a collection is not an object
    #[error("Record in '{collection}' must be an object, got {found}")]
    RecordNotObject { collection: String, found: String },

    /// A record's `id` is missing, not a string, or empty
    #[error("Record in '{collection}' missing string 'id': {record}")]
    InvalidId { collection: String, record: String },

    /// A record's `data` is missing or not an object
    #[error("Record '{collection}/{id}' missing object 'data': {record}")]
    InvalidData {
        collection: String,
        id: String,
        record: String,
    },
}

impl ShapeError {
    /// Name of the collection the error refers to, if any
    pub fn collection(&self) -> Option<&str> {
        match self {
            ShapeError::NotAnObject { .. } => None,
            ShapeError::CollectionNotList { collection, .. }
            | ShapeError::RecordNotObject { collection, .. }
            | ShapeError::InvalidId { collection, .. }
            | ShapeError::InvalidData { collection, .. } => Some(collection),
        }
    }
}

/// Firestore-specific errors
///
/// Errors that occur when committing to Cloud Firestore.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// The request never reached Firestore or the response was cut off
    #[error("Failed to connect to Firestore: {0}")]
    ConnectionFailed(String),

    /// Firestore answered the commit with a non-success status
    #[error("Commit failed: {status} - {message}")]
    CommitFailed { status: u16, message: String },

    /// A document path Firestore cannot address, such as an empty collection
    #[error("Invalid document path: {0}")]
    InvalidDocumentPath(String),

    /// A document field cannot be represented as a Firestore value
    #[error("Invalid document value: {0}")]
    InvalidValue(String),

    /// Failed to deserialize a response
    #[error("Failed to deserialize response: {0}")]
    DeserializationFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SeedError {
    fn from(err: toml::de::Error) -> Self {
        SeedError::Configuration(format!("TOML parse error: {err}"))
    }
}
