use serde_json::Value;

use crate::domain::TimestampPair;
use crate::ports::{Result, ScenarioRepository, ScenarioWriter};
use crate::utils::freshness_timestamps;

/// Application service that rewrites the lifecycle timestamps in every
/// scenario fixture so test data always looks fresh
pub struct RefreshServiceImpl {
    repository: Box<dyn ScenarioRepository>,
    writer: Box<dyn ScenarioWriter>,
}

impl RefreshServiceImpl {
    /// Creates a new RefreshServiceImpl with the given dependencies
    pub fn new(repository: Box<dyn ScenarioRepository>, writer: Box<dyn ScenarioWriter>) -> Self {
        Self { repository, writer }
    }

    /// Executes the refresh: computes the timestamp pair once, then rewrites
    /// every discovered scenario file with it, sequentially. Stops on the
    /// first failure; files after that point are left as they were.
    ///
    /// Returns the number of files processed.
    pub fn execute_refresh(&self) -> Result<usize> {
        let timestamps = freshness_timestamps();
        let paths = self.repository.discover()?;

        for path in &paths {
            let mut document = self.repository.load(path)?;
            update_timestamps(&mut document, &timestamps)?;
            self.writer.write(path, &document)?;
        }

        Ok(paths.len())
    }
}

/// Sets `created_at` to yesterday and `updated_at` to today on every element
/// of the top-level `items` array, adding the fields if absent. All other
/// fields, and the key order of the document, are left untouched.
pub fn update_timestamps(document: &mut Value, timestamps: &TimestampPair) -> Result<()> {
    let items = document
        .get_mut("items")
        .ok_or("scenario document has no top-level `items` field")?
        .as_array_mut()
        .ok_or("scenario `items` field is not an array")?;

    for record in items {
        let record = record
            .as_object_mut()
            .ok_or("scenario `items` element is not an object")?;
        record.insert(
            "created_at".to_string(),
            Value::String(timestamps.yesterday.clone()),
        );
        record.insert(
            "updated_at".to_string(),
            Value::String(timestamps.today.clone()),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    fn pair() -> TimestampPair {
        TimestampPair {
            today: "2024-06-02T10:00:00.000000Z".to_string(),
            yesterday: "2024-06-01T10:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_update_timestamps_overwrites_every_record() {
        let mut document = json!({
            "kind": "SubscriptionList",
            "items": [
                {
                    "created_at": "2020-01-01T00:00:00Z",
                    "updated_at": "2020-01-01T00:00:00Z",
                    "name": "sub1"
                },
                { "name": "sub2" }
            ],
            "total": 2
        });

        update_timestamps(&mut document, &pair()).unwrap();

        for record in document["items"].as_array().unwrap() {
            assert_eq!(record["created_at"], "2024-06-01T10:00:00.000000Z");
            assert_eq!(record["updated_at"], "2024-06-02T10:00:00.000000Z");
        }
        // Everything else passes through unchanged
        assert_eq!(document["items"][0]["name"], "sub1");
        assert_eq!(document["items"][1]["name"], "sub2");
        assert_eq!(document["kind"], "SubscriptionList");
        assert_eq!(document["total"], 2);
    }

    #[test]
    fn test_update_timestamps_preserves_key_order() {
        let mut document = json!({
            "kind": "SubscriptionList",
            "items": [
                { "id": "a", "created_at": "old", "updated_at": "old", "status": "Active" }
            ],
            "total": 1
        });

        update_timestamps(&mut document, &pair()).unwrap();

        let rendered = serde_json::to_string(&document).unwrap();
        // created_at/updated_at keep their original slot between id and status
        assert_eq!(
            rendered,
            "{\"kind\":\"SubscriptionList\",\"items\":[{\"id\":\"a\",\
             \"created_at\":\"2024-06-01T10:00:00.000000Z\",\
             \"updated_at\":\"2024-06-02T10:00:00.000000Z\",\
             \"status\":\"Active\"}],\"total\":1}"
        );
    }

    #[test]
    fn test_update_timestamps_requires_items_field() {
        let mut document = json!({ "kind": "SubscriptionList" });
        assert!(update_timestamps(&mut document, &pair()).is_err());
    }

    #[test]
    fn test_update_timestamps_requires_items_array() {
        let mut document = json!({ "items": "not an array" });
        assert!(update_timestamps(&mut document, &pair()).is_err());
    }

    #[test]
    fn test_update_timestamps_requires_object_records() {
        let mut document = json!({ "items": [42] });
        assert!(update_timestamps(&mut document, &pair()).is_err());
    }

    struct FixedRepository {
        documents: BTreeMap<PathBuf, Value>,
    }

    impl ScenarioRepository for FixedRepository {
        fn discover(&self) -> Result<Vec<PathBuf>> {
            Ok(self.documents.keys().cloned().collect())
        }

        fn load(&self, path: &Path) -> Result<Value> {
            Ok(self.documents[path].clone())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingWriter {
        written: Arc<Mutex<Vec<(PathBuf, Value)>>>,
    }

    impl ScenarioWriter for RecordingWriter {
        fn write(&self, path: &Path, document: &Value) -> Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), document.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_execute_refresh_shares_one_pair_across_files() {
        let mut documents = BTreeMap::new();
        documents.insert(
            PathBuf::from("a/subscription_response.json"),
            json!({ "items": [{ "name": "sub1" }] }),
        );
        documents.insert(
            PathBuf::from("b/subscription_response.json"),
            json!({ "items": [{ "name": "sub2" }, { "name": "sub3" }] }),
        );

        let writer = RecordingWriter::default();
        let service = RefreshServiceImpl::new(
            Box::new(FixedRepository { documents }),
            Box::new(writer.clone()),
        );

        let processed = service.execute_refresh().unwrap();
        assert_eq!(processed, 2);

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 2);

        let first = &written[0].1["items"][0];
        for (_, document) in written.iter() {
            for record in document["items"].as_array().unwrap() {
                assert_eq!(record["created_at"], first["created_at"]);
                assert_eq!(record["updated_at"], first["updated_at"]);
            }
        }
    }

    #[test]
    fn test_execute_refresh_stops_on_first_bad_document() {
        let mut documents = BTreeMap::new();
        documents.insert(
            PathBuf::from("bad.json"),
            json!({ "kind": "no items here" }),
        );

        let writer = RecordingWriter::default();
        let service = RefreshServiceImpl::new(
            Box::new(FixedRepository { documents }),
            Box::new(writer.clone()),
        );

        assert!(service.execute_refresh().is_err());
        assert!(writer.written.lock().unwrap().is_empty());
    }
}
