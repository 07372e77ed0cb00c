use super::{Graph, GraphError};
use crate::{Edge, NodeId};
use log::debug;

impl Graph {
    /// Merges `b` into `a` and returns the id of the merged node, which is always `a`.
    ///
    /// The merged node gets the sorted concatenation of both labels and keeps `a`'s colour and
    /// position. Every edge of `b` (except one to `a`) is copied to `a` unless `a` already has an
    /// edge of the same kind to that neighbour. Interference and move edges are independent, so
    /// `a` may end up with both kinds of edge to the same neighbour. `b` is removed afterwards.
    ///
    /// This is destructive, clone the graph first to evaluate a merge speculatively.
    pub fn merge(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        let b_label = match (self.node(a), self.node(b)) {
            (None, _) => return Err(GraphError::UnknownNode(a)),
            (_, None) => return Err(GraphError::UnknownNode(b)),
            (Some(_), Some(node_b)) => node_b.label.clone(),
        };

        let inherited: Vec<_> = self.incident(b).filter(|(n, _)| *n != a).collect();
        for (neighbour, kind) in inherited {
            // Keyed on (pair, kind), so an existing edge of the same kind absorbs the copy.
            if let Some(edge) = Edge::new(a, neighbour, kind) {
                self.edges.insert(edge);
            }
        }
        self.remove_node(b);

        if let Some(node_a) = self.node_mut(a) {
            node_a.label = node_a.label.merged(&b_label);
            debug!("merged {b} into {a}, now labelled {}", node_a.label);
        }
        Ok(a)
    }
}
