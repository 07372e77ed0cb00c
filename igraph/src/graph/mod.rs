
mod merge;
mod query;

use crate::{Edge, EdgeKind, Label, Node, NodeId, Position};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Errors from structural graph edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    UnknownNode(NodeId),
    DuplicateNode(NodeId),
    SelfLoop(NodeId),
    IdOutOfRange(NodeId),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownNode(id) => write!(f, "there is no node {id} in the graph"),
            GraphError::DuplicateNode(id) => write!(f, "node {id} is already in the graph"),
            GraphError::SelfLoop(id) => write!(f, "can't connect node {id} to itself"),
            GraphError::IdOutOfRange(id) => write!(f, "node id {id} is too large"),
        }
    }
}

impl std::error::Error for GraphError {}

/// A node taken out of the graph together with the edges it had at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedNode {
    pub node: Node,
    /// The other endpoint and kind of every edge incident to `node`.
    pub edges: Vec<(NodeId, EdgeKind)>,
}

/// The interference graph. Owns every live node and edge.
///
/// Cloning a graph yields a completely independent copy, which is what speculative evaluation
/// relies on.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeSet<Edge>,
    next_id: u32,
}

/// Two graphs are equal if they have the same nodes and edges; the id counter is ignored.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new uncoloured node and returns its id.
    pub fn add_node(&mut self, label: Label, position: Position) -> NodeId {
        let id = NodeId(self.next_id);
        // Inserted ids are at most `NodeId::MAX_INSERTED`, leaving 2^31 fresh ids above them.
        self.next_id = self.next_id.saturating_add(1);
        debug!("added node {id} labelled {label}");
        self.nodes.insert(id, Node::new(id, label, position));
        id
    }

    /// Inserts a node with a predetermined id. Future ids will be larger than `node.id`.
    pub fn insert_node(&mut self, node: Node) -> Result<(), GraphError> {
        if node.id > NodeId::MAX_INSERTED {
            return Err(GraphError::IdOutOfRange(node.id));
        }
        self.put_node(node)
    }

    fn put_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.next_id = self.next_id.max(node.id.0.saturating_add(1));
        debug!("inserted node {} labelled {}", node.id, node.label);
        self.nodes.insert(node.id, node);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates the nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns the ids of the nodes with exactly this label.
    pub fn find_by_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .values()
            .filter(move |n| n.label.as_str() == label)
            .map(|n| n.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connects `a` and `b` with an edge of the given kind.
    ///
    /// Returns `false` if such an edge already existed, in which case nothing changed.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, kind: EdgeKind) -> Result<bool, GraphError> {
        for id in [a, b] {
            if !self.contains(id) {
                return Err(GraphError::UnknownNode(id));
            }
        }
        let edge = Edge::new(a, b, kind).ok_or(GraphError::SelfLoop(a))?;
        let added = self.edges.insert(edge);
        if added {
            debug!("added {kind} edge {a} -- {b}");
        }
        Ok(added)
    }

    /// Removes a node and every edge incident to it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.detach(id).map(|detached| detached.node)
    }

    /// Removes a node and its incident edges, handing both back so they can be reinserted with
    /// [`Graph::reattach`].
    pub fn detach(&mut self, id: NodeId) -> Option<DetachedNode> {
        let node = self.nodes.remove(&id)?;
        let mut edges = Vec::new();
        self.edges.retain(|edge| match edge.other(id) {
            Some(other) => {
                edges.push((other, edge.kind()));
                false
            }
            None => true,
        });
        debug!("detached node {id} with {} edges", edges.len());
        Some(DetachedNode { node, edges })
    }

    /// Reinserts a detached node. Edges towards nodes that are no longer in the graph are
    /// dropped; the number of restored edges is returned.
    pub fn reattach(&mut self, detached: DetachedNode) -> Result<usize, GraphError> {
        let DetachedNode { node, edges } = detached;
        let id = node.id;
        self.put_node(node)?;
        let mut restored = 0;
        for (other, kind) in edges {
            if !self.contains(other) {
                debug!("dropped {kind} edge {id} -- {other}, {other} is gone");
                continue;
            }
            if self.add_edge(id, other, kind)? {
                restored += 1;
            }
        }
        Ok(restored)
    }

    /// Removes every edge of `kind` incident to `id`, returning how many were removed.
    pub fn remove_edges_of(&mut self, id: NodeId, kind: EdgeKind) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|edge| !(edge.kind() == kind && edge.touches(id)));
        let removed = before - self.edges.len();
        debug!("removed {removed} {kind} edges of {id}");
        removed
    }

    /// Removes all nodes and edges and restarts the id counter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
