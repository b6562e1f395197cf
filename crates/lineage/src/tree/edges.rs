//! Edge descriptors for the rendering layer
//!
//! Every relationship whose endpoints are both known people becomes one edge.
//! Duplicates are kept; overlap is the renderer's problem.

use serde::Serialize;
use tracing::debug;

use super::index::RelationshipIndex;
use crate::core::{Relationship, RelationshipKind};

/// Styling category of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCategory {
    Parent,
    Spouse,
    Sibling,
}

impl EdgeCategory {
    pub fn color(&self) -> &'static str {
        match self {
            EdgeCategory::Parent => "#059669",
            EdgeCategory::Spouse => "#9333ea",
            EdgeCategory::Sibling => "#0891b2",
        }
    }
}

impl From<RelationshipKind> for EdgeCategory {
    fn from(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Spouse => EdgeCategory::Spouse,
            RelationshipKind::Sibling => EdgeCategory::Sibling,
            RelationshipKind::Parent | RelationshipKind::Unknown => EdgeCategory::Parent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeData {
    /// Relationship label, empty when none was given
    pub label: String,
    pub kind: RelationshipKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub category: EdgeCategory,
    pub color: &'static str,
}

/// Arrow head at the target end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub marker_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub color: &'static str,
}

impl Marker {
    pub fn arrow(color: &'static str) -> Self {
        Self {
            marker_type: "arrowclosed",
            width: 20,
            height: 20,
            color,
        }
    }
}

/// A routable edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Id of the relationship this edge draws
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: &'static str,
    pub data: EdgeData,
    pub style: EdgeStyle,
    pub marker_end: Marker,
}

impl Edge {
    pub const EDGE_TYPE: &'static str = "relationship";

    pub fn from_relationship(rel: &Relationship) -> Self {
        let category = EdgeCategory::from(rel.kind);
        let color = category.color();

        Self {
            id: rel.id.clone(),
            source: rel.from_id.clone(),
            target: rel.to_id.clone(),
            edge_type: Self::EDGE_TYPE,
            data: EdgeData {
                label: rel.label.clone().unwrap_or_default(),
                kind: rel.kind,
            },
            style: EdgeStyle { category, color },
            marker_end: Marker::arrow(color),
        }
    }

    pub fn category(&self) -> EdgeCategory {
        self.style.category
    }
}

/// Maps relationships to edges
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeStyler;

impl EdgeStyler {
    pub fn new() -> Self {
        Self
    }

    /// Style every relationship with resolvable endpoints, in input order
    pub fn style(&self, index: &RelationshipIndex<'_>, relationships: &[Relationship]) -> Vec<Edge> {
        let edges: Vec<Edge> = relationships
            .iter()
            .filter(|rel| {
                let routable = index.contains(&rel.from_id) && index.contains(&rel.to_id);
                if !routable {
                    debug!(
                        relationship_id = %rel.id,
                        from_id = %rel.from_id,
                        to_id = %rel.to_id,
                        "Dropping relationship with unknown endpoint"
                    );
                }
                routable
            })
            .map(Edge::from_relationship)
            .collect();

        debug!(
            edge_count = edges.len(),
            dropped = relationships.len() - edges.len(),
            "Styled edges"
        );
        edges
    }
}
