//! Cloud Firestore integration
//!
//! This module provides the REST client, authentication and wire models
//! for committing seed batches to Firestore.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod models;

pub use adapter::FirestoreAdapter;
pub use auth::{Credentials, ServiceAccountKey, ServiceAccountSigner, TokenProvider};
pub use client::FirestoreClient;
