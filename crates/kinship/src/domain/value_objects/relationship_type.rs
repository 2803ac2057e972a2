//! RelationshipType - Kind of a directed edge between two members

use serde::{Deserialize, Serialize};

/// Relationship edge type
///
/// Only `Parent` and `Child` drive statistics. Unrecognised types are kept
/// verbatim so a snapshot never fails to load over a new edge kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Parent,
    Child,
    Spouse,
    Sibling,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::Parent => "parent",
            RelationshipType::Child => "child",
            RelationshipType::Spouse => "spouse",
            RelationshipType::Sibling => "sibling",
            RelationshipType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "parent" => RelationshipType::Parent,
            "child" => RelationshipType::Child,
            "spouse" => RelationshipType::Spouse,
            "sibling" => RelationshipType::Sibling,
            _ => RelationshipType::Other(s),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(kind: RelationshipType) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_round_trip_lowercase() {
        let kind: RelationshipType = serde_json::from_str("\"Parent\"").unwrap();
        assert_eq!(kind, RelationshipType::Parent);
        assert_eq!(serde_json::to_string(&RelationshipType::Child).unwrap(), "\"child\"");
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let kind: RelationshipType = serde_json::from_str("\"step_parent\"").unwrap();
        assert_eq!(kind, RelationshipType::Other("step_parent".to_string()));
        assert_eq!(kind.to_string(), "step_parent");
    }
}
