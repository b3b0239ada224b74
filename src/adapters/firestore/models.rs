//! Firestore REST wire models
//!
//! Request and response bodies for `documents:commit`, plus the conversion
//! from plain JSON into Firestore's typed value encoding.

use crate::domain::FirestoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Firestore typed value
///
/// Serializes to the REST encoding, e.g. `{"stringValue": "Honda"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    NullValue(()),
    BooleanValue(bool),
    /// int64 values travel as decimal strings
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ArrayValue {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FirestoreValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapValue {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FirestoreValue>,
}

impl FirestoreValue {
    /// Encode a JSON value
    ///
    /// # Errors
    ///
    /// Integers outside the signed 64-bit range have no Firestore
    /// representation and are rejected.
    pub fn from_json(value: &Value) -> Result<Self, FirestoreError> {
        Ok(match value {
            Value::Null => FirestoreValue::NullValue(()),
            Value::Bool(b) => FirestoreValue::BooleanValue(*b),
            Value::Number(n) => encode_number(n)?,
            Value::String(s) => FirestoreValue::StringValue(s.clone()),
            Value::Array(items) => FirestoreValue::ArrayValue(ArrayValue {
                values: items
                    .iter()
                    .map(FirestoreValue::from_json)
                    .collect::<Result<_, _>>()?,
            }),
            Value::Object(map) => FirestoreValue::MapValue(MapValue {
                fields: encode_fields(map)?,
            }),
        })
    }
}

fn encode_number(n: &Number) -> Result<FirestoreValue, FirestoreError> {
    if let Some(i) = n.as_i64() {
        return Ok(FirestoreValue::IntegerValue(i.to_string()));
    }
    if n.is_u64() {
        return Err(FirestoreError::InvalidValue(format!(
            "integer {n} exceeds the 64-bit signed range"
        )));
    }
    n.as_f64()
        .map(FirestoreValue::DoubleValue)
        .ok_or_else(|| FirestoreError::InvalidValue(format!("unsupported number {n}")))
}

/// Encode every field of a JSON object
pub fn encode_fields(
    map: &Map<String, Value>,
) -> Result<BTreeMap<String, FirestoreValue>, FirestoreError> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), FirestoreValue::from_json(v)?)))
        .collect()
}

/// Leaf field paths of a document, used as the merge mask
///
/// Nested objects are walked; an empty object counts as a leaf so that it
/// is still written.
pub fn field_paths(map: &Map<String, Value>) -> Vec<String> {
    let mut paths = Vec::new();
    collect_field_paths(map, None, &mut paths);
    paths
}

fn collect_field_paths(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<String>) {
    for (key, value) in map {
        let segment = quote_segment(key);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{segment}"),
            None => segment,
        };

        match value {
            Value::Object(nested) if !nested.is_empty() => {
                collect_field_paths(nested, Some(&path), out)
            }
            _ => out.push(path),
        }
    }
}

/// Back-quote a field name unless it is a simple identifier
fn quote_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    let simple = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if simple {
        segment.to_string()
    } else {
        let escaped = segment.replace('\\', "\\\\").replace('`', "\\`");
        format!("`{escaped}`")
    }
}

/// A document as sent in a write
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Full resource name: `projects/{p}/databases/{d}/documents/{path}`
    pub name: String,
    pub fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMask {
    pub field_paths: Vec<String>,
}

/// One write in a commit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Write {
    pub update: Document,

    /// Present for merge writes; absent means replace the whole document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<DocumentMask>,
}

/// Body of `documents:commit`
#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest {
    pub writes: Vec<Write>,
}

/// Response of `documents:commit`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub write_results: Vec<Value>,
    #[serde(default)]
    pub commit_time: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_encode_scalars() {
        let encoded = serde_json::to_value(FirestoreValue::from_json(&json!("Honda")).unwrap())
            .unwrap();
        assert_eq!(encoded, json!({"stringValue": "Honda"}));

        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&json!(5000)).unwrap()).unwrap();
        assert_eq!(encoded, json!({"integerValue": "5000"}));

        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&json!(4.5)).unwrap()).unwrap();
        assert_eq!(encoded, json!({"doubleValue": 4.5}));

        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&Value::Null).unwrap()).unwrap();
        assert_eq!(encoded, json!({"nullValue": null}));

        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&json!(true)).unwrap()).unwrap();
        assert_eq!(encoded, json!({"booleanValue": true}));
    }

    #[test]
    fn test_encode_nested() {
        let value = json!({"specs": {"cc": 650, "tags": ["naked", "twin"]}});
        let encoded = serde_json::to_value(FirestoreValue::from_json(&value).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({"mapValue": {"fields": {"specs": {"mapValue": {"fields": {
                "cc": {"integerValue": "650"},
                "tags": {"arrayValue": {"values": [
                    {"stringValue": "naked"},
                    {"stringValue": "twin"}
                ]}}
            }}}}}})
        );
    }

    #[test]
    fn test_encode_empty_containers() {
        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&json!([])).unwrap()).unwrap();
        assert_eq!(encoded, json!({"arrayValue": {}}));

        let encoded =
            serde_json::to_value(FirestoreValue::from_json(&json!({})).unwrap()).unwrap();
        assert_eq!(encoded, json!({"mapValue": {}}));
    }

    #[test]
    fn test_encode_rejects_u64_overflow() {
        let value = json!(u64::MAX);
        let err = FirestoreValue::from_json(&value).unwrap_err();
        assert!(matches!(err, FirestoreError::InvalidValue(_)));
    }

    #[test]
    fn test_field_paths_flattens_nested_maps() {
        let data = object(json!({
            "make": "Honda",
            "specs": {"cc": 650, "engine": {"cylinders": 2}},
            "extras": {}
        }));
        assert_eq!(
            field_paths(&data),
            vec!["make", "specs.cc", "specs.engine.cylinders", "extras"]
        );
    }

    #[test]
    fn test_field_paths_quotes_special_segments() {
        let data = object(json!({
            "price-usd": 1,
            "2024": {"q1": true},
            "a`b": 0,
            "": 0
        }));
        assert_eq!(
            field_paths(&data),
            vec!["`price-usd`", "`2024`.q1", "`a\\`b`", "``"]
        );
    }

    #[test]
    fn test_write_serialization_with_and_without_mask() {
        let document = Document {
            name: "projects/p/databases/(default)/documents/listings/l1".to_string(),
            fields: encode_fields(&object(json!({"price": 5000}))).unwrap(),
        };

        let merge = Write {
            update: document.clone(),
            update_mask: Some(DocumentMask {
                field_paths: vec!["price".to_string()],
            }),
        };
        let encoded = serde_json::to_value(&merge).unwrap();
        assert_eq!(encoded["updateMask"], json!({"fieldPaths": ["price"]}));

        let overwrite = Write {
            update: document,
            update_mask: None,
        };
        let encoded = serde_json::to_value(&overwrite).unwrap();
        assert!(encoded.get("updateMask").is_none());
    }

    #[test]
    fn test_parse_commit_response() {
        let response: CommitResponse = serde_json::from_value(json!({
            "writeResults": [{"updateTime": "2025-01-01T00:00:00Z"}],
            "commitTime": "2025-01-01T00:00:00.123456Z"
        }))
        .unwrap();
        assert_eq!(response.write_results.len(), 1);
        assert!(response.commit_time.is_some());
    }

    #[test]
    fn test_parse_error_response() {
        let response: ErrorResponse = serde_json::from_value(json!({
            "error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}
        }))
        .unwrap();
        assert_eq!(response.error.code, 403);
        assert_eq!(response.error.status.as_deref(), Some("PERMISSION_DENIED"));
    }
}
