//! Name lookup over laid-out nodes

use super::position::Node;

fn matches(node: &Node, needle: &str) -> bool {
    node.data.full_name.to_lowercase().contains(needle)
}

fn needle(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

/// First node, in output order, whose full name contains `query`
///
/// Case-insensitive. A blank query matches nothing.
pub fn find_first_match<'a>(nodes: &'a [Node], query: &str) -> Option<&'a Node> {
    let needle = needle(query)?;
    nodes.iter().find(|node| matches(node, &needle))
}

/// Every node whose full name contains `query`
pub fn find_matches<'a>(nodes: &'a [Node], query: &str) -> Vec<&'a Node> {
    match needle(query) {
        Some(needle) => nodes.iter().filter(|node| matches(node, &needle)).collect(),
        None => Vec::new(),
    }
}
