// src/fixture.rs
use crate::error::SeedError;
use bson::{Bson, Document};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads `<dir>/<name>.json` fixtures and turns them into BSON documents.
///
/// Fixtures are MongoDB extended JSON: `{"$oid": ..}`, `{"$date": ..}` and
/// friends become native BSON values, everything else converts as-is.
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    dir: PathBuf,
}

impl FixtureLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub async fn load(&self, name: &str) -> Result<Vec<Document>, SeedError> {
        let path = self.path_for(name);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SeedError::ReadFixture {
                path: path.clone(),
                source,
            })?;
        parse_fixture(&path, &text)
    }
}

/// Parse fixture text. The top-level value must be an array of objects;
/// document order follows the file.
pub fn parse_fixture(path: &Path, text: &str) -> Result<Vec<Document>, SeedError> {
    let value: Value = serde_json::from_str(text).map_err(|source| SeedError::ParseFixture {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(records) = value else {
        return Err(malformed(path, "top-level value is not an array".to_string()));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| to_document(path, index, record))
        .collect()
}

fn to_document(path: &Path, index: usize, record: Value) -> Result<Document, SeedError> {
    if !record.is_object() {
        return Err(malformed(path, format!("record {index} is not an object")));
    }

    match Bson::try_from(record) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(malformed(
            path,
            format!("record {index} decoded to {:?}, not a document", other.element_type()),
        )),
        Err(e) => Err(malformed(
            path,
            format!("record {index} is not valid extended JSON: {e}"),
        )),
    }
}

fn malformed(path: &Path, reason: String) -> SeedError {
    SeedError::MalformedFixture {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    fn path() -> PathBuf {
        PathBuf::from("sample_data/users.json")
    }

    #[test]
    fn parses_array_of_records_in_order() {
        let text = r#"[{"name": "a", "age": 3}, {"name": "b", "tags": ["x"]}]"#;
        let docs = parse_fixture(&path(), text).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_str("name").unwrap(), "a");
        assert_eq!(docs[1].get_str("name").unwrap(), "b");
        assert_eq!(docs[1].get_array("tags").unwrap().len(), 1);
    }

    #[test]
    fn empty_array_yields_no_documents() {
        assert!(parse_fixture(&path(), "[]").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_fixture(&path(), "[{\"name\": ").unwrap_err();
        assert!(matches!(err, SeedError::ParseFixture { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn non_array_and_non_object_records_are_malformed() {
        let err = parse_fixture(&path(), r#"{"name": "a"}"#).unwrap_err();
        assert!(matches!(err, SeedError::MalformedFixture { .. }));

        let err = parse_fixture(&path(), r#"[{"name": "a"}, 7]"#).unwrap_err();
        match err {
            SeedError::MalformedFixture { reason, .. } => assert!(reason.contains("record 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extended_json_produces_native_types() {
        let text = r#"[{
            "_id": {"$oid": "64378abd85008f171cf2990d"},
            "createdAt": {"$date": "2024-01-01T00:00:00Z"},
            "title": "hello"
        }]"#;
        let docs = parse_fixture(&path(), text).unwrap();
        let doc = &docs[0];
        assert_eq!(
            doc.get_object_id("_id").unwrap(),
            ObjectId::parse_str("64378abd85008f171cf2990d").unwrap()
        );
        assert!(doc.get_datetime("createdAt").is_ok());
        assert_eq!(doc.get_str("title").unwrap(), "hello");
    }

    #[test]
    fn invalid_extended_json_is_malformed() {
        let text = r#"[{"_id": {"$oid": "not-an-object-id"}}]"#;
        let err = parse_fixture(&path(), text).unwrap_err();
        match err {
            SeedError::MalformedFixture { reason, .. } => {
                assert!(reason.contains("record 0"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_references_become_object_ids() {
        let text = r#"[{"members": [{"$oid": "64378abd85008f171cf2990e"}], "address": {"city": "Delhi"}}]"#;
        let docs = parse_fixture(&path(), text).unwrap();
        let members = docs[0].get_array("members").unwrap();
        assert_eq!(
            members[0],
            Bson::ObjectId(ObjectId::parse_str("64378abd85008f171cf2990e").unwrap())
        );
        assert_eq!(docs[0].get_document("address").unwrap(), &doc! { "city": "Delhi" });
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FixtureLoader::new(dir.path());
        let err = loader.load("users").await.unwrap_err();
        match err {
            SeedError::ReadFixture { path, .. } => assert_eq!(path, dir.path().join("users.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
