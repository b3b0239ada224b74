//! Seed pack validation and item extraction
//!
//! The parsed seed pack stays a loosely typed [`serde_json::Value`]; records
//! are checked one by one as they are pulled from [`SeedItems`], so the first
//! malformed record stops the run with a [`ShapeError`] that names it.

use crate::domain::{CollectionName, DocumentId, Result, SeedItem, ShapeError};
use serde_json::{Map, Value};

/// Reserved top-level key holding pack metadata, never written
pub const META_KEY: &str = "meta";

/// A seed pack whose top level is known to be an object
#[derive(Debug, Clone)]
pub struct SeedPack {
    collections: Map<String, Value>,
}

impl SeedPack {
    /// Wrap a parsed seed pack
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotAnObject` if the top-level value is not a
    /// JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(collections) => Ok(Self { collections }),
            other => Err(ShapeError::NotAnObject {
                found: json_type_name(&other).to_string(),
            }
            .into()),
        }
    }

    /// Number of records across every non-meta collection that is a list
    pub fn record_count(&self) -> usize {
        self.collections
            .iter()
            .filter(|(name, _)| name.as_str() != META_KEY)
            .filter_map(|(_, value)| value.as_array())
            .map(Vec::len)
            .sum()
    }

    /// Lazily validate and extract the seed items, in input order
    pub fn items(self) -> SeedItems {
        SeedItems {
            collections: self.collections.into_iter(),
            current: None,
            failed: false,
        }
    }
}

/// Iterator over the seed items of a [`SeedPack`]
///
/// Yields `Err` for the first malformed collection or record and nothing
/// after it.
pub struct SeedItems {
    collections: serde_json::map::IntoIter,
    current: Option<(CollectionName, std::vec::IntoIter<Value>)>,
    failed: bool,
}

impl SeedItems {
    fn fail(&mut self, error: ShapeError) -> Option<Result<SeedItem>> {
        self.failed = true;
        self.current = None;
        Some(Err(error.into()))
    }
}

impl Iterator for SeedItems {
    type Item = Result<SeedItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some((collection, records)) = self.current.as_mut() {
                if let Some(record) = records.next() {
                    let collection = collection.clone();
                    return match record_to_item(collection, record) {
                        Ok(item) => Some(Ok(item)),
                        Err(e) => self.fail(e),
                    };
                }
                self.current = None;
            }

            let (name, value) = self.collections.next()?;
            if name == META_KEY {
                continue;
            }

            let records = match value {
                Value::Array(records) => records,
                other => {
                    return self.fail(ShapeError::CollectionNotList {
                        collection: name,
                        found: json_type_name(&other).to_string(),
                    })
                }
            };

            self.current = Some((CollectionName::new(name), records.into_iter()));
        }
    }
}

impl std::iter::FusedIterator for SeedItems {}

fn record_to_item(
    collection: CollectionName,
    record: Value,
) -> std::result::Result<SeedItem, ShapeError> {
    let mut record = match record {
        Value::Object(record) => record,
        other => {
            return Err(ShapeError::RecordNotObject {
                collection: collection.into_inner(),
                found: json_type_name(&other).to_string(),
            })
        }
    };

    let id = match record.get("id").and_then(Value::as_str).map(DocumentId::new) {
        Some(Ok(id)) => id,
        _ => {
            return Err(ShapeError::InvalidId {
                collection: collection.into_inner(),
                record: Value::Object(record).to_string(),
            })
        }
    };

    let data = match record.get_mut("data") {
        Some(Value::Object(data)) => std::mem::take(data),
        _ => {
            return Err(ShapeError::InvalidData {
                collection: collection.into_inner(),
                id: id.into_inner(),
                record: Value::Object(record).to_string(),
            })
        }
    };

    Ok(SeedItem::new(collection, id, data))
}

/// Extract every seed item, failing on the first malformed record
///
/// An empty result is not an error.
pub fn extract_items(value: Value) -> Result<Vec<SeedItem>> {
    SeedPack::from_value(value)?.items().collect()
}

/// JSON type name used in shape error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeedError;
    use serde_json::json;

    fn shape_error(value: Value) -> ShapeError {
        match extract_items(value).unwrap_err() {
            SeedError::Shape(e) => e,
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_preserves_order() {
        let items = extract_items(json!({
            "motorcycles": [
                {"id": "bike_002", "data": {"make": "Yamaha"}},
                {"id": "bike_001", "data": {"make": "Honda"}}
            ],
            "listings": [{"id": "listing_001", "data": {"price": 5000}}]
        }))
        .unwrap();

        let paths: Vec<String> = items.iter().map(SeedItem::path).collect();
        assert_eq!(
            paths,
            vec![
                "motorcycles/bike_002",
                "motorcycles/bike_001",
                "listings/listing_001"
            ]
        );
        assert_eq!(items[2].data["price"], json!(5000));
    }

    #[test]
    fn test_meta_is_skipped_whatever_its_type() {
        for meta in [json!({"version": 1}), json!([1, 2]), json!("x"), Value::Null] {
            let items = extract_items(json!({
                "meta": meta,
                "listings": [{"id": "l1", "data": {}}]
            }))
            .unwrap();
            assert_eq!(items.len(), 1);
            assert!(items.iter().all(|i| i.collection.as_str() != META_KEY));
        }
    }

    #[test]
    fn test_empty_packs() {
        assert!(extract_items(json!({})).unwrap().is_empty());
        assert!(extract_items(json!({"meta": {}})).unwrap().is_empty());
        assert!(extract_items(json!({"motorcycles": []})).unwrap().is_empty());
    }

    #[test]
    fn test_top_level_not_object() {
        assert_eq!(
            shape_error(json!([1, 2])),
            ShapeError::NotAnObject {
                found: "array".to_string()
            }
        );
    }

    #[test]
    fn test_collection_not_list() {
        assert_eq!(
            shape_error(json!({"motorcycles": {"id": "bike_001"}})),
            ShapeError::CollectionNotList {
                collection: "motorcycles".to_string(),
                found: "object".to_string()
            }
        );
    }

    #[test]
    fn test_record_not_object() {
        let err = shape_error(json!({"motorcycles": ["bike_001"]}));
        assert!(matches!(err, ShapeError::RecordNotObject { .. }));
        assert_eq!(err.collection(), Some("motorcycles"));
    }

    #[test]
    fn test_invalid_id_includes_record() {
        let err = shape_error(json!({"listings": [{"id": 123, "data": {}}]}));
        assert!(matches!(err, ShapeError::InvalidId { .. }));
        assert!(err.to_string().contains("\"id\":123"));
    }

    #[test]
    fn test_invalid_data_includes_id() {
        let err = shape_error(json!({"listings": [{"id": "l1", "data": [1]}]}));
        assert_eq!(
            err,
            ShapeError::InvalidData {
                collection: "listings".to_string(),
                id: "l1".to_string(),
                record: r#"{"id":"l1","data":[1]}"#.to_string()
            }
        );
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let pack = SeedPack::from_value(json!({
            "a": [{"id": "1", "data": {}}, {"id": "", "data": {}}, {"id": "3", "data": {}}]
        }))
        .unwrap();

        let mut items = pack.items();
        assert!(items.next().unwrap().is_ok());
        assert!(items.next().unwrap().is_err());
        assert!(items.next().is_none());
        assert!(items.next().is_none());
    }

    #[test]
    fn test_empty_collection_name_is_extracted() {
        let items = extract_items(json!({"": [{"id": "1", "data": {}}]})).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].collection.is_empty());
    }

    #[test]
    fn test_record_count() {
        let pack = SeedPack::from_value(json!({
            "meta": [1, 2, 3],
            "a": [{}, {}],
            "b": [{}]
        }))
        .unwrap();
        assert_eq!(pack.record_count(), 3);
    }
}
