//! Relationship lookup structures
//!
//! Turns the flat relationship list into per-person adjacency: child to
//! parents, parent to children, and symmetric spouse links. People are
//! addressed by their position in the (deduplicated) input list so that the
//! later stages can use plain vectors instead of string-keyed maps.

use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

use crate::core::{Person, Relationship, RelationshipKind};

/// Adjacency built from one snapshot
#[derive(Debug)]
pub struct RelationshipIndex<'a> {
    /// Unique people in input order
    people: Vec<&'a Person>,
    positions: HashMap<&'a str, usize>,
    /// child -> parents
    parents: Vec<Vec<usize>>,
    /// parent -> children
    children: Vec<Vec<usize>>,
    /// person -> spouses (both directions)
    spouses: Vec<Vec<usize>>,
    unresolved: usize,
}

impl<'a> RelationshipIndex<'a> {
    /// Build the index in one pass over the relationships
    ///
    /// Repeated person ids keep their first occurrence. Relationships with an
    /// endpoint outside `people` are ignored, as are siblings and unknown kinds.
    pub fn build(people: &'a [Person], relationships: &'a [Relationship]) -> Self {
        let mut unique = Vec::with_capacity(people.len());
        let mut positions = HashMap::with_capacity(people.len());
        for person in people {
            if positions.contains_key(person.id.as_str()) {
                warn!(person_id = %person.id, "Ignoring repeated person id");
                continue;
            }
            positions.insert(person.id.as_str(), unique.len());
            unique.push(person);
        }

        let count = unique.len();
        let mut parents = vec![Vec::new(); count];
        let mut children = vec![Vec::new(); count];
        let mut spouses = vec![Vec::new(); count];
        let mut unresolved = 0;

        for rel in relationships {
            let (Some(&from), Some(&to)) = (
                positions.get(rel.from_id.as_str()),
                positions.get(rel.to_id.as_str()),
            ) else {
                unresolved += 1;
                continue;
            };

            match rel.kind {
                RelationshipKind::Parent => {
                    parents[to].push(from);
                    children[from].push(to);
                }
                RelationshipKind::Spouse => {
                    if from != to {
                        spouses[from].push(to);
                        spouses[to].push(from);
                    }
                }
                RelationshipKind::Sibling | RelationshipKind::Unknown => {}
            }
        }

        debug!(
            person_count = count,
            relationship_count = relationships.len(),
            unresolved,
            "Built relationship index"
        );

        Self {
            people: unique,
            positions,
            parents,
            children,
            spouses,
            unresolved,
        }
    }

    /// Number of unique people
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Person at an index position
    pub fn person(&self, index: usize) -> &'a Person {
        self.people[index]
    }

    /// Unique people in input order
    pub fn people(&self) -> &[&'a Person] {
        &self.people
    }

    /// Index position of a person id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns true if the id belongs to a known person
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn parents_of(&self, index: usize) -> &[usize] {
        &self.parents[index]
    }

    pub fn children_of(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn spouses_of(&self, index: usize) -> &[usize] {
        &self.spouses[index]
    }

    /// Recorded parent ids of a person, in relationship order
    pub fn parent_ids(&self, id: &str) -> Vec<&'a str> {
        self.ids_of(id, &self.parents)
    }

    /// Spouse ids of a person, in relationship order
    pub fn spouse_ids(&self, id: &str) -> Vec<&'a str> {
        self.ids_of(id, &self.spouses)
    }

    fn ids_of(&self, id: &str, table: &[Vec<usize>]) -> Vec<&'a str> {
        self.position(id)
            .map(|i| table[i].iter().map(|&j| self.people[j].id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Returns true if the person has at least one recorded parent
    pub fn has_parent(&self, index: usize) -> bool {
        !self.parents[index].is_empty()
    }

    /// People without a recorded parent, in input order
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&i| !self.has_parent(i))
    }

    /// Everyone reachable through spouse links, including `index`, in visit order
    pub fn spouse_component(&self, index: usize) -> Vec<usize> {
        let mut seen = vec![false; self.len()];
        let mut component = Vec::new();
        let mut queue = VecDeque::from([index]);
        seen[index] = true;

        while let Some(current) = queue.pop_front() {
            component.push(current);
            for &spouse in &self.spouses[current] {
                if !seen[spouse] {
                    seen[spouse] = true;
                    queue.push_back(spouse);
                }
            }
        }
        component
    }

    /// Relationships skipped because an endpoint is unknown
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}
