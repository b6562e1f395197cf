//! Lineage - Lay out family trees as generation-ordered diagrams
//!
//! A library that turns a snapshot of people and typed relationships into
//! positioned nodes and styled edges for an interactive renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use lineage::layout_json;
//!
//! let input = r#"{
//!     "people": [
//!         {"id": "a", "fullName": "Ada Byron"},
//!         {"id": "b", "fullName": "Ben Byron"}
//!     ],
//!     "relationships": [
//!         {"id": "r1", "fromId": "a", "toId": "b", "type": "parent"}
//!     ]
//! }"#;
//! let json = layout_json(input).unwrap();
//! assert!(json.contains("\"nodes\""));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, run the engine on your own records:
//!
//! ```rust
//! use lineage::prelude::*;
//!
//! let people = vec![Person::new("w", "William"), Person::new("m", "Mary")];
//! let relationships = vec![Relationship::spouse("r1", "w", "m")];
//!
//! let config = LayoutConfig::default().with_horizontal_spacing(300.0);
//! let layout = FamilyTreeLayout::with_config(config);
//! let result = layout.compute(&people, &relationships);
//!
//! assert_eq!(result.nodes.len(), 2);
//! assert_eq!(result.nodes[1].position.x - result.nodes[0].position.x, 300.0);
//! ```

pub mod core;
pub mod tree;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        LayoutAlgorithm, LayoutConfig, LineageError, Person, Position, Relationship,
        RelationshipKind, TreeDatabase,
    };
    pub use crate::tree::{
        find_first_match, find_matches, AssignmentOutcome, Edge, EdgeCategory, FamilyTreeLayout,
        GenerationMap, Node, TreeLayout,
    };
}

/// Lay out people and relationships with the default configuration
///
/// # Example
/// ```rust
/// use lineage::{layout, Person};
///
/// let result = layout(&[Person::new("a", "Ada")], &[]);
/// assert_eq!(result.nodes.len(), 1);
/// assert!(result.edges.is_empty());
/// ```
pub fn layout(people: &[Person], relationships: &[Relationship]) -> tree::TreeLayout {
    tree::FamilyTreeLayout::new().compute(people, relationships)
}

/// Parse a JSON snapshot (`{"people": [...], "relationships": [...]}`)
///
/// # Example
/// ```rust
/// use lineage::parse;
///
/// let db = parse(r#"{"people": [{"id": "a", "fullName": "Ada"}]}"#).unwrap();
/// assert_eq!(db.person_count(), 1);
/// assert_eq!(db.relationship_count(), 0);
/// ```
pub fn parse(input: &str) -> anyhow::Result<TreeDatabase> {
    Ok(TreeDatabase::from_json(input)?)
}

/// Parse a JSON snapshot and return the layout as JSON
pub fn layout_json(input: &str) -> anyhow::Result<String> {
    layout_json_with_config(input, &LayoutConfig::default())
}

/// Parse a JSON snapshot and lay it out with `config`
pub fn layout_json_with_config(input: &str, config: &LayoutConfig) -> anyhow::Result<String> {
    config.validate()?;
    let database = parse(input)?;
    let result = tree::FamilyTreeLayout::with_config(config.clone()).layout(&database);
    Ok(serde_json::to_string(&result)?)
}
