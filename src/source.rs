use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Person, Relationship};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid family snapshot: {0}")]
    Parse(String),
}

/// Where persons and relationships come from. Each call returns a full,
/// independent snapshot.
pub trait FamilySource {
    fn list_members(&self) -> Vec<Person>;
    fn list_relationships(&self) -> Vec<Relationship>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySnapshot {
    #[serde(default)]
    pub members: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl FamilySnapshot {
    pub fn new(members: Vec<Person>, relationships: Vec<Relationship>) -> Self {
        Self {
            members,
            relationships,
        }
    }

    pub fn from_source(source: &dyn FamilySource) -> Self {
        Self::new(source.list_members(), source.list_relationships())
    }

    /// Parses strict JSON, falling back to JSON5 for hand-written files.
    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        match serde_json::from_str(text) {
            Ok(snapshot) => Ok(snapshot),
            Err(json_err) => json5::from_str(text).map_err(|json5_err| {
                SourceError::Parse(format!("{json_err} (as JSON5: {json5_err})"))
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn read_from(mut reader: impl Read) -> Result<Self, SourceError> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|source| SourceError::Io {
            path: "<stdin>".to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl FamilySource for FamilySnapshot {
    fn list_members(&self) -> Vec<Person> {
        self.members.clone()
    }

    fn list_relationships(&self) -> Vec<Relationship> {
        self.relationships.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipKind;

    #[test]
    fn parses_json_and_json5() {
        let json = r#"{"members":[{"id":"a","firstName":"Anna"}],"relationships":[{"fromId":"a","toId":"b","type":"sibling"}]}"#;
        let snapshot = FamilySnapshot::from_json_str(json).unwrap();
        assert_eq!(snapshot.members[0].first_name, "Anna");
        assert_eq!(snapshot.relationships[0].kind, RelationshipKind::Sibling);

        let json5 = "{ members: [{ id: 'a' },], // trailing comma\n }";
        let snapshot = FamilySnapshot::from_json_str(json5).unwrap();
        assert_eq!(snapshot.members.len(), 1);
        assert!(snapshot.relationships.is_empty());
    }

    #[test]
    fn reports_parse_errors() {
        let err = FamilySnapshot::from_json_str("{ members: 3 }").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
        assert!(err.to_string().starts_with("invalid family snapshot"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FamilySnapshot::load(Path::new("/nonexistent/family.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn snapshot_is_a_source() {
        let snapshot = FamilySnapshot::new(vec![Person::new("a", "A", "")], vec![]);
        let copy = FamilySnapshot::from_source(&snapshot);
        assert_eq!(copy, snapshot);
    }
}
