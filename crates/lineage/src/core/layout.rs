//! Core layout trait
//!
//! A layout algorithm turns a tree snapshot into something a renderer can
//! draw. Implementations must be pure: no I/O and no state shared between
//! calls, so one instance can serve concurrent callers.

use super::TreeDatabase;

/// Core trait for layout algorithms
///
/// # Example
/// ```
/// use lineage::core::{LayoutAlgorithm, TreeDatabase};
/// use lineage::tree::FamilyTreeLayout;
///
/// let db = TreeDatabase::new();
/// let layout = FamilyTreeLayout::new();
/// let positioned = layout.layout(&db);
/// assert!(positioned.nodes.is_empty());
/// ```
pub trait LayoutAlgorithm: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange the people and relationships of a snapshot
    fn layout(&self, database: &TreeDatabase) -> Self::Output;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
