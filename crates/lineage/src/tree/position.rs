//! Node placement
//!
//! Each generation is one row. Rows are ordered by ascending generation and
//! centred on x = 0; members keep their input order inside a row.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

use super::display::PersonData;
use super::generation::{Generation, GenerationMap};
use super::index::RelationshipIndex;
use crate::core::{LayoutConfig, Position};

/// A positioned person
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: &'static str,
    /// Top-left corner of the card slot
    pub position: Position,
    pub generation: Generation,
    pub data: PersonData,
}

impl Node {
    pub const NODE_TYPE: &'static str = "person";

    /// Horizontal centre of the slot for a given horizontal spacing
    pub fn slot_center_x(&self, horizontal_spacing: f64) -> f64 {
        self.position.x + horizontal_spacing / 2.0
    }
}

/// One row of the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRow {
    pub generation: Generation,
    /// Row number counted from the top
    pub rank: usize,
    /// Index positions in input order
    pub members: Vec<usize>,
}

/// Places people on a grid of generation rows
#[derive(Debug, Clone)]
pub struct PositionLayout {
    horizontal_spacing: f64,
    vertical_spacing: f64,
}

impl Default for PositionLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl PositionLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing,
            vertical_spacing: config.vertical_spacing,
        }
    }

    /// Group people into rows ordered by generation
    pub fn rows(&self, index: &RelationshipIndex<'_>, generations: &GenerationMap) -> Vec<GenerationRow> {
        let mut grouped: BTreeMap<Generation, Vec<usize>> = BTreeMap::new();
        for i in 0..index.len() {
            grouped.entry(generations.at(i)).or_default().push(i);
        }

        grouped
            .into_iter()
            .enumerate()
            .map(|(rank, (generation, members))| GenerationRow {
                generation,
                rank,
                members,
            })
            .collect()
    }

    /// x of the slot at `slot` in a row of `row_len` people
    pub fn slot_x(&self, row_len: usize, slot: usize) -> f64 {
        -(row_len as f64 * self.horizontal_spacing) / 2.0 + slot as f64 * self.horizontal_spacing
    }

    /// y of the row at `rank`
    pub fn row_y(&self, rank: usize) -> f64 {
        rank as f64 * self.vertical_spacing
    }

    /// Produce one node per unique person, row by row
    pub fn position(&self, index: &RelationshipIndex<'_>, generations: &GenerationMap) -> Vec<Node> {
        let rows = self.rows(index, generations);
        let mut nodes = Vec::with_capacity(index.len());

        for row in &rows {
            let y = self.row_y(row.rank);
            for (slot, &member) in row.members.iter().enumerate() {
                let person = index.person(member);
                let position = Position::new(self.slot_x(row.members.len(), slot), y);
                trace!(person_id = %person.id, x = position.x, y = position.y, "Placed person");

                nodes.push(Node {
                    id: person.id.clone(),
                    node_type: Node::NODE_TYPE,
                    position,
                    generation: row.generation,
                    data: PersonData::from(person),
                });
            }
        }

        nodes
    }
}
