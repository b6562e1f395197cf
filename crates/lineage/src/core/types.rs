//! Core type definitions for family tree layout
//!
//! This module contains the input records handed to the engine (people and
//! relationships), the closed set of relationship kinds, and the coordinate
//! type used in the output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a relationship between two people
///
/// Wire strings are lowercase (`"parent"`, `"spouse"`, `"sibling"`). Any other
/// string deserializes to [`RelationshipKind::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RelationshipKind {
    /// Directed: `from` is the parent, `to` is the child
    #[default]
    Parent,
    /// Symmetric: both people share a generation
    Spouse,
    /// Symmetric: carried through for rendering only
    Sibling,
    /// Anything the engine does not recognise
    Unknown,
}

impl RelationshipKind {
    /// Parse a wire string, falling back to `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "parent" => RelationshipKind::Parent,
            "spouse" => RelationshipKind::Spouse,
            "sibling" => RelationshipKind::Sibling,
            _ => RelationshipKind::Unknown,
        }
    }

    /// Returns true if the edge direction carries meaning
    pub fn is_directed(&self) -> bool {
        matches!(self, RelationshipKind::Parent)
    }

    /// Returns true if this kind takes part in generation propagation
    pub fn affects_generation(&self) -> bool {
        matches!(self, RelationshipKind::Parent | RelationshipKind::Spouse)
    }
}

impl From<String> for RelationshipKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for RelationshipKind {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Parent => write!(f, "parent"),
            RelationshipKind::Spouse => write!(f, "spouse"),
            RelationshipKind::Sibling => write!(f, "sibling"),
            RelationshipKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A person record as supplied by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier
    pub id: String,
    /// Name shown on the card
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// ISO-8601 date string, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// ISO-8601 date string, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    /// Photo URLs; the first one is the avatar
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Person {
    /// Create a person with only an id and a display name
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            given_name: None,
            family_name: None,
            gender: None,
            birth_date: None,
            death_date: None,
            photos: Vec::new(),
        }
    }

    pub fn with_names(mut self, given: impl Into<String>, family: impl Into<String>) -> Self {
        self.given_name = Some(given.into());
        self.family_name = Some(family.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }

    pub fn with_death_date(mut self, date: impl Into<String>) -> Self {
        self.death_date = Some(date.into());
        self
    }

    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photos.push(url.into());
        self
    }
}

/// A typed link between two people
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique identifier
    pub id: String,
    /// Source person (the parent for `Parent` relationships)
    pub from_id: String,
    /// Target person (the child for `Parent` relationships)
    pub to_id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// Optional display label ("father", "spouse", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Relationship {
    /// Create an unlabeled relationship of the given kind
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            kind,
            label: None,
        }
    }

    /// `parent_id` is a parent of `child_id`
    pub fn parent(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        child_id: impl Into<String>,
    ) -> Self {
        Self::new(id, parent_id, child_id, RelationshipKind::Parent)
    }

    pub fn spouse(id: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(id, a, b, RelationshipKind::Spouse)
    }

    pub fn sibling(id: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(id, a, b, RelationshipKind::Sibling)
    }

    /// Attach a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns true if either endpoint is `person_id`
    pub fn touches(&self, person_id: &str) -> bool {
        self.from_id == person_id || self.to_id == person_id
    }
}

/// A point in diagram space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_kind_parsing() {
        assert_eq!(RelationshipKind::parse("parent"), RelationshipKind::Parent);
        assert_eq!(RelationshipKind::parse("Spouse"), RelationshipKind::Spouse);
        assert_eq!(RelationshipKind::parse(" sibling "), RelationshipKind::Sibling);
        assert_eq!(RelationshipKind::parse("godparent"), RelationshipKind::Unknown);
        assert_eq!(RelationshipKind::parse(""), RelationshipKind::Unknown);
    }

    #[test]
    fn test_relationship_kind_properties() {
        assert!(RelationshipKind::Parent.is_directed());
        assert!(!RelationshipKind::Spouse.is_directed());

        assert!(RelationshipKind::Parent.affects_generation());
        assert!(RelationshipKind::Spouse.affects_generation());
        assert!(!RelationshipKind::Sibling.affects_generation());
        assert!(!RelationshipKind::Unknown.affects_generation());
    }

    #[test]
    fn test_relationship_kind_serde() {
        let kind: RelationshipKind = serde_json::from_str("\"spouse\"").unwrap();
        assert_eq!(kind, RelationshipKind::Spouse);

        let unknown: RelationshipKind = serde_json::from_str("\"cousin\"").unwrap();
        assert_eq!(unknown, RelationshipKind::Unknown);

        assert_eq!(
            serde_json::to_string(&RelationshipKind::Sibling).unwrap(),
            "\"sibling\""
        );
    }

    #[test]
    fn test_person_deserializes_camel_case() {
        let json = r#"{
            "id": "p1",
            "fullName": "William Smith",
            "givenName": "William",
            "birthDate": "1920-05-15"
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.full_name, "William Smith");
        assert_eq!(person.given_name.as_deref(), Some("William"));
        assert_eq!(person.family_name, None);
        assert_eq!(person.birth_date.as_deref(), Some("1920-05-15"));
        assert!(person.photos.is_empty());
    }

    #[test]
    fn test_relationship_deserializes_type_field() {
        let json = r#"{"id": "r1", "fromId": "a", "toId": "b", "type": "parent", "label": "father"}"#;
        let rel: Relationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.kind, RelationshipKind::Parent);
        assert_eq!(rel.label.as_deref(), Some("father"));
        assert!(rel.touches("a"));
        assert!(rel.touches("b"));
        assert!(!rel.touches("c"));
    }

    #[test]
    fn test_relationship_constructors() {
        let rel = Relationship::spouse("r1", "a", "b").with_label("married");
        assert_eq!(rel.kind, RelationshipKind::Spouse);
        assert_eq!(rel.label.as_deref(), Some("married"));

        let rel = Relationship::parent("r2", "mum", "kid");
        assert_eq!(rel.from_id, "mum");
        assert_eq!(rel.to_id, "kid");
    }
}
