//! Family tree layout engine
//!
//! Four stages, run in order on every call:
//! [`RelationshipIndex`] → [`GenerationAssigner`] → [`PositionLayout`] for
//! nodes, and [`EdgeStyler`] for edges. Nothing is cached between calls.

use serde::Serialize;
use tracing::{info, span, warn, Level};

use crate::core::{LayoutAlgorithm, LayoutConfig, Person, Relationship, TreeDatabase};

mod display;
mod edges;
mod generation;
mod index;
mod position;
mod search;

pub use display::*;
pub use edges::*;
pub use generation::*;
pub use index::*;
pub use position::*;
pub use search::*;

/// Engine output: nodes and edges for the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl TreeLayout {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Generation-ordered family tree layout
#[derive(Debug, Clone, Default)]
pub struct FamilyTreeLayout {
    config: LayoutConfig,
}

impl FamilyTreeLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Generations only, without placing anyone
    pub fn generations(&self, people: &[Person], relationships: &[Relationship]) -> GenerationMap {
        let index = RelationshipIndex::build(people, relationships);
        GenerationAssigner::new(&self.config).assign(&index)
    }

    /// Lay out a snapshot given as two slices
    pub fn compute(&self, people: &[Person], relationships: &[Relationship]) -> TreeLayout {
        let layout_span = span!(
            Level::INFO,
            "layout_family_tree",
            person_count = people.len(),
            relationship_count = relationships.len()
        );
        let _enter = layout_span.enter();

        let index_span = span!(Level::DEBUG, "build_index");
        let index_enter = index_span.enter();
        let index = RelationshipIndex::build(people, relationships);
        drop(index_enter);

        let generations = GenerationAssigner::new(&self.config).assign(&index);
        if generations.outcome().is_degraded() {
            warn!(outcome = ?generations.outcome(), "Generation layout is best effort");
        }

        let position_span = span!(Level::DEBUG, "position_nodes");
        let position_enter = position_span.enter();
        let nodes = PositionLayout::new(&self.config).position(&index, &generations);
        drop(position_enter);

        let edge_span = span!(Level::DEBUG, "style_edges");
        let edge_enter = edge_span.enter();
        let edges = EdgeStyler::new().style(&index, relationships);
        drop(edge_enter);

        info!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            generation_count = generations.distinct().len(),
            "Family tree layout completed"
        );

        TreeLayout { nodes, edges }
    }
}

impl LayoutAlgorithm for FamilyTreeLayout {
    type Output = TreeLayout;

    fn layout(&self, database: &TreeDatabase) -> Self::Output {
        self.compute(database.people(), database.relationships())
    }

    fn name(&self) -> &'static str {
        "family-tree"
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}
