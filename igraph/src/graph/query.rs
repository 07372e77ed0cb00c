//! Read-only questions about the graph. All of them accept ids of nodes that are not in the
//! graph and treat those as isolated.

use super::Graph;
use crate::{EdgeKind, NodeId};
use std::collections::BTreeSet;

impl Graph {
    /// Returns the nodes connected to `id` by an edge of `kind`.
    pub fn neighbours(&self, id: NodeId, kind: EdgeKind) -> BTreeSet<NodeId> {
        self.edges
            .iter()
            .filter(|edge| edge.kind() == kind)
            .filter_map(|edge| edge.other(id))
            .filter(|other| self.contains(*other))
            .collect()
    }

    /// Every edge incident to `id`, as `(other endpoint, kind)`.
    pub fn incident(&self, id: NodeId) -> impl Iterator<Item = (NodeId, EdgeKind)> + '_ {
        self.edges
            .iter()
            .filter_map(move |edge| edge.other(id).map(|other| (other, edge.kind())))
            .filter(|(other, _)| self.contains(*other))
    }

    /// The number of interference neighbours. Move edges don't count.
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbours(id, EdgeKind::Interference).len()
    }

    /// Returns `true` if `degree(id) >= k`.
    pub fn is_significant(&self, id: NodeId, k: u32) -> bool {
        self.degree(id) >= k as usize
    }

    pub fn is_move_related(&self, id: NodeId) -> bool {
        !self.neighbours(id, EdgeKind::Move).is_empty()
    }

    pub fn are_move_related(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a, EdgeKind::Move).contains(&b)
    }

    pub fn interfere(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a, EdgeKind::Interference).contains(&b)
    }

    /// `false` for nodes that are not in the graph.
    pub fn is_precoloured(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.is_precoloured())
    }

    /// The interference neighbours of `id` whose degree is at least `k`.
    pub fn significant_neighbours(&self, id: NodeId, k: u32) -> BTreeSet<NodeId> {
        self.neighbours(id, EdgeKind::Interference)
            .into_iter()
            .filter(|&t| self.is_significant(t, k))
            .collect()
    }
}
