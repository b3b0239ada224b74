//! Firestore adapter implementing the document store trait
//!
//! Translates staged [`DocumentWrite`]s into a Firestore commit request and
//! the commit response back into a [`CommitResult`].

use crate::adapters::database::traits::{CommitResult, DocumentStore, DocumentWrite};
use crate::adapters::firestore::client::FirestoreClient;
use crate::adapters::firestore::models::{
    encode_fields, field_paths, CommitRequest, Document, DocumentMask, Write,
};
use crate::domain::{FirestoreError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Firestore implementation of [`DocumentStore`]
pub struct FirestoreAdapter {
    client: FirestoreClient,
}

impl FirestoreAdapter {
    /// Create a new Firestore adapter
    pub fn new(client: FirestoreClient) -> Self {
        Self {
            client,
        }
    }

    /// Build the commit body for a group of writes
    ///
    /// Merge writes carry an update mask naming every leaf field of the
    /// data; overwrite writes carry none and replace the whole document.
    pub fn build_commit_request(&self, writes: &[DocumentWrite]) -> Result<CommitRequest> {
        let writes = writes
            .iter()
            .map(|write| {
                if write.collection.is_empty() {
                    return Err(FirestoreError::InvalidDocumentPath(format!(
                        "collection name must not be empty (document '{}')",
                        write.document_id
                    )));
                }

                let fields = encode_fields(&write.data).map_err(|e| match e {
                    FirestoreError::InvalidValue(msg) => {
                        FirestoreError::InvalidValue(format!("{}: {msg}", write.path()))
                    }
                    other => other,
                })?;

                let update_mask = write.mode.is_merge().then(|| DocumentMask {
                    field_paths: field_paths(&write.data),
                });

                Ok(Write {
                    update: Document {
                        name: self.client.document_name(&write.path()),
                        fields,
                    },
                    update_mask,
                })
            })
            .collect::<std::result::Result<Vec<_>, FirestoreError>>()?;

        Ok(CommitRequest { writes })
    }
}

#[async_trait]
impl DocumentStore for FirestoreAdapter {
    async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<CommitResult> {
        let request = self.build_commit_request(&writes)?;
        let response = self.client.commit(&request).await?;

        let commit_time = response
            .commit_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        Ok(CommitResult {
            write_count: writes.len(),
            commit_time,
        })
    }

    fn target(&self) -> String {
        if self.client.uses_emulator() {
            format!("{} (emulator {})", self.client.database_path(), self.client.endpoint())
        } else {
            self.client.database_path()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::firestore::auth::TEST_RSA_KEY_PEM;
    use crate::adapters::firestore::auth::ServiceAccountKey;
    use crate::config::FirestoreConfig;
    use crate::domain::{CollectionName, DocumentId, SeedError, WriteMode};
    use serde_json::json;

    fn adapter() -> FirestoreAdapter {
        let key = ServiceAccountKey::from_json(
            &json!({
                "type": "service_account",
                "project_id": "demo",
                "private_key": TEST_RSA_KEY_PEM,
                "client_email": "seeder@demo.iam.gserviceaccount.com",
            })
            .to_string(),
        )
        .unwrap();
        FirestoreAdapter::new(FirestoreClient::new(&FirestoreConfig::default(), key).unwrap())
    }

    fn write(id: &str, data: serde_json::Value, mode: WriteMode) -> DocumentWrite {
        DocumentWrite {
            collection: CollectionName::new("motorcycles"),
            document_id: DocumentId::new(id).unwrap(),
            data: data.as_object().cloned().unwrap(),
            mode,
        }
    }

    #[test]
    fn test_merge_write_has_mask() {
        let request = adapter()
            .build_commit_request(&[write(
                "bike_001",
                json!({"make": "Honda", "specs": {"cc": 650}}),
                WriteMode::Merge,
            )])
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        let first = &body["writes"][0];
        assert_eq!(
            first["update"]["name"],
            json!("projects/demo/databases/(default)/documents/motorcycles/bike_001")
        );
        assert_eq!(
            first["updateMask"]["fieldPaths"],
            json!(["make", "specs.cc"])
        );
    }

    #[test]
    fn test_overwrite_write_has_no_mask() {
        let request = adapter()
            .build_commit_request(&[write("bike_001", json!({"make": "Honda"}), WriteMode::Overwrite)])
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert!(body["writes"][0].get("updateMask").is_none());
        assert_eq!(
            body["writes"][0]["update"]["fields"]["make"],
            json!({"stringValue": "Honda"})
        );
    }

    #[test]
    fn test_invalid_value_names_document() {
        let err = adapter()
            .build_commit_request(&[write("bike_001", json!({"odometer": u64::MAX}), WriteMode::Merge)])
            .unwrap_err();
        assert!(matches!(err, SeedError::Commit(FirestoreError::InvalidValue(_))));
        assert!(err.to_string().contains("motorcycles/bike_001"));
    }

    #[test]
    fn test_empty_collection_rejected_at_commit() {
        let mut empty = write("bike_001", json!({"make": "Honda"}), WriteMode::Merge);
        empty.collection = CollectionName::new("");

        let err = adapter().build_commit_request(&[empty]).unwrap_err();
        assert!(matches!(
            err,
            SeedError::Commit(FirestoreError::InvalidDocumentPath(_))
        ));
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("bike_001"));
    }

    #[test]
    fn test_target() {
        assert_eq!(adapter().target(), "projects/demo/databases/(default)");
    }
}
