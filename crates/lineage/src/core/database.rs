//! Family tree snapshot storage
//!
//! Holds the people and relationships of one tree exactly as the persistence
//! layer hands them over. Insertion order is preserved because the layout
//! depends on it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

use super::{LineageError, Person, Relationship};

/// Something the persistence layer should not have let through
///
/// None of these stop a layout; they are reported for validation tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssue {
    /// Two people share an id; only the first is laid out
    DuplicatePersonId { id: String },
    /// Two relationships share an id
    DuplicateRelationshipId { id: String },
    /// A relationship points at a person that is not in the snapshot
    DanglingEndpoint {
        relationship_id: String,
        missing_id: String,
    },
    /// A relationship links a person to themselves
    SelfReference {
        relationship_id: String,
        person_id: String,
    },
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotIssue::DuplicatePersonId { id } => {
                write!(f, "person id '{}' appears more than once", id)
            }
            SnapshotIssue::DuplicateRelationshipId { id } => {
                write!(f, "relationship id '{}' appears more than once", id)
            }
            SnapshotIssue::DanglingEndpoint {
                relationship_id,
                missing_id,
            } => write!(
                f,
                "relationship '{}' references unknown person '{}'",
                relationship_id, missing_id
            ),
            SnapshotIssue::SelfReference {
                relationship_id,
                person_id,
            } => write!(
                f,
                "relationship '{}' links '{}' to themselves",
                relationship_id, person_id
            ),
        }
    }
}

/// Family tree database
///
/// Stores people and relationships in insertion order. Deserializes from the
/// `{"people": [...], "relationships": [...]}` snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDatabase {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl TreeDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from already-validated collections
    pub fn from_parts(people: Vec<Person>, relationships: Vec<Relationship>) -> Self {
        Self {
            people,
            relationships,
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json(input: &str) -> Result<Self, LineageError> {
        let database: TreeDatabase = serde_json::from_str(input)?;
        debug!(
            person_count = database.person_count(),
            relationship_count = database.relationship_count(),
            "Loaded tree snapshot"
        );
        Ok(database)
    }

    /// Serialize back to the snapshot shape
    pub fn to_json(&self) -> Result<String, LineageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Add a person, rejecting ids that are already present
    pub fn add_person(&mut self, person: Person) -> Result<(), LineageError> {
        if self.has_person(&person.id) {
            return Err(LineageError::duplicate_person(person.id));
        }
        trace!(person_id = %person.id, "Adding person");
        self.people.push(person);
        Ok(())
    }

    /// Add a relationship
    ///
    /// Endpoints are not checked here; see [`TreeDatabase::issues`].
    pub fn add_relationship(&mut self, relationship: Relationship) {
        trace!(
            relationship_id = %relationship.id,
            kind = %relationship.kind,
            "Adding relationship"
        );
        self.relationships.push(relationship);
    }

    /// Check if a person exists
    pub fn has_person(&self, id: &str) -> bool {
        self.people.iter().any(|p| p.id == id)
    }

    /// Get a person by id (first match)
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// People in insertion order
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Relationships in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships touching a person, in insertion order
    pub fn relationships_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.relationships.iter().filter(move |r| r.touches(id))
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.people.clear();
        self.relationships.clear();
    }

    /// List integrity problems in snapshot order
    pub fn issues(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        let mut seen_people: HashSet<&str> = HashSet::new();
        for person in &self.people {
            if !seen_people.insert(person.id.as_str()) {
                issues.push(SnapshotIssue::DuplicatePersonId {
                    id: person.id.clone(),
                });
            }
        }

        let mut seen_relationships: HashMap<&str, usize> = HashMap::new();
        for rel in &self.relationships {
            let count = seen_relationships.entry(rel.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                issues.push(SnapshotIssue::DuplicateRelationshipId { id: rel.id.clone() });
            }

            for endpoint in [&rel.from_id, &rel.to_id] {
                if !seen_people.contains(endpoint.as_str()) {
                    issues.push(SnapshotIssue::DanglingEndpoint {
                        relationship_id: rel.id.clone(),
                        missing_id: endpoint.clone(),
                    });
                }
            }

            if rel.from_id == rel.to_id {
                issues.push(SnapshotIssue::SelfReference {
                    relationship_id: rel.id.clone(),
                    person_id: rel.from_id.clone(),
                });
            }
        }

        debug!(issue_count = issues.len(), "Snapshot validation completed");
        issues
    }
}
