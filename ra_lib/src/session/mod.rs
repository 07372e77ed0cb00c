//! The state of one hand-driven allocation: the graph, the work stack and `K`.


mod report;

pub use report::*;

use crate::{
    error::{AllocError, Operation},
    heuristic::Heuristic,
    stack::{Removal, WorkStack},
    util::{label_of, Ice},
};
use igraph::{
    ColourError, EdgeKind, Graph, Label, LabelGenerator, NodeId, Position, PALETTE_LEN,
};
use log::{debug, info, warn};
use vec1::Vec1;

/// Radius of the circle pre-coloured nodes are laid out on.
const PRECOLOURED_RADIUS: f64 = 100.0;

#[derive(Debug, Clone, Default)]
pub struct Session {
    graph: Graph,
    stack: WorkStack,
    k: u32,
    labels: LabelGenerator,
}

impl Session {
    pub fn new(k: u32) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Starts a session on an existing graph with an empty stack.
    pub fn with_graph(graph: Graph, k: u32) -> Self {
        Self {
            graph,
            k,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn stack(&self) -> &WorkStack {
        &self.stack
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn set_k(&mut self, k: u32) {
        debug!("K is now {k}");
        self.k = k;
    }

    /// Replaces the graph and `K`, dropping everything on the stack.
    pub fn replace(&mut self, graph: Graph, k: u32) {
        info!("loaded a graph with {} nodes, K = {k}", graph.len());
        *self = Self::with_graph(graph, k);
    }

    /// Removes all nodes, including the ones on the stack.
    pub fn clear(&mut self) {
        self.replace(Graph::new(), self.k);
    }

    fn label_in_use(&self, label: &Label) -> bool {
        self.graph.nodes().any(|n| &n.label == label) || self.stack.labels().any(|l| l == label)
    }

    /// Adds an ordinary node with the next unused letter label.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        let mut labels = std::mem::take(&mut self.labels);
        let label = labels.next_unused(|l| self.label_in_use(l));
        self.labels = labels;
        self.graph.add_node(label, position)
    }

    /// Adds `k` pre-coloured nodes labelled `1` to `k` on a circle, every pair interfering.
    ///
    /// At most [`PALETTE_LEN`] nodes are added, one per colour there is.
    pub fn add_precoloured_nodes(&mut self, k: u32) -> Vec<NodeId> {
        let k = k.min(PALETTE_LEN as u32);
        let ids: Vec<_> = (0..k)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(k);
                let position = Position::new(
                    PRECOLOURED_RADIUS * angle.cos(),
                    -PRECOLOURED_RADIUS * angle.sin(),
                );
                self.graph.add_node((i + 1).to_string().into(), position)
            })
            .collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                self.graph.add_edge(a, b, EdgeKind::Interference).ice();
            }
        }
        ids
    }

    pub fn add_interference_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, AllocError> {
        self.add_edge(a, b, EdgeKind::Interference)
    }

    pub fn add_move_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, AllocError> {
        self.add_edge(a, b, EdgeKind::Move)
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId, kind: EdgeKind) -> Result<bool, AllocError> {
        for id in [a, b] {
            if !self.graph.contains(id) {
                return Err(AllocError::UnknownNode(id));
            }
        }
        if a == b {
            return Err(AllocError::SelfLoop(label_of(&self.graph, a)));
        }
        Ok(self.graph.add_edge(a, b, kind).ice())
    }

    /// Deletes the given nodes that are in the graph, returning the labels of the deleted ones.
    pub fn delete(&mut self, ids: &[NodeId]) -> Vec<Label> {
        ids.iter()
            .filter_map(|&id| self.graph.remove_node(id))
            .map(|node| node.label)
            .collect()
    }

    /// Keeps the selected nodes that are in the graph, without duplicates, and checks that
    /// exactly `needed` remain.
    fn live_selection(
        &self,
        selection: &[NodeId],
        needed: usize,
        operation: Operation,
    ) -> Result<Vec<NodeId>, AllocError> {
        let mut live = Vec::with_capacity(needed);
        for &id in selection {
            if self.graph.contains(id) && !live.contains(&id) {
                live.push(id);
            }
        }
        if live.len() != needed {
            warn!("{operation} needs {needed} nodes, got {}", live.len());
            return Err(AllocError::Selection {
                operation,
                needed,
                found: live.len(),
            });
        }
        Ok(live)
    }

    /// Removes a node of insignificant degree that is neither pre-coloured nor move-related,
    /// pushing it onto the stack.
    pub fn simplify(&mut self, selection: &[NodeId]) -> Result<Removed, AllocError> {
        self.remove_to_stack(selection, Removal::Simplified)
    }

    /// Like [`Session::simplify`], but for a node of significant degree.
    pub fn candidate_spill(&mut self, selection: &[NodeId]) -> Result<Removed, AllocError> {
        self.remove_to_stack(selection, Removal::Spilled)
    }

    fn remove_to_stack(
        &mut self,
        selection: &[NodeId],
        removal: Removal,
    ) -> Result<Removed, AllocError> {
        let operation = match removal {
            Removal::Simplified => Operation::Simplify,
            Removal::Spilled => Operation::Spill,
        };
        let id = self.live_selection(selection, 1, operation)?[0];
        let label = label_of(&self.graph, id);

        if self.graph.is_precoloured(id) {
            return Err(AllocError::Precoloured { operation, label });
        }
        if self.graph.is_move_related(id) {
            return Err(AllocError::MoveRelated { operation, label });
        }
        let degree = self.graph.degree(id);
        let k = self.k;
        let significant = degree >= k as usize;
        match (removal, significant) {
            (Removal::Simplified, true) => {
                return Err(AllocError::SignificantDegree { label, degree, k })
            }
            (Removal::Spilled, false) => {
                return Err(AllocError::InsignificantDegree { label, degree, k })
            }
            _ => {}
        }

        let detached = self
            .graph
            .detach(id)
            .ok_or(AllocError::UnknownNode(id))?;
        self.stack.push(detached, removal);
        info!("{removal} {label} (degree {degree}, K = {k})");
        Ok(Removed {
            id,
            label,
            degree,
            k,
            removal,
        })
    }

    /// Removes every move edge of the selected node, giving up on coalescing it.
    pub fn freeze(&mut self, selection: &[NodeId]) -> Result<Frozen, AllocError> {
        let id = self.live_selection(selection, 1, Operation::Freeze)?[0];
        let removed_moves = self.graph.remove_edges_of(id, EdgeKind::Move);
        let label = label_of(&self.graph, id);
        info!("froze {label}, removing {removed_moves} move edges");
        Ok(Frozen {
            id,
            label,
            removed_moves,
        })
    }

    /// Pops the top of the stack back into the graph and colours it.
    ///
    /// Returns `Ok(None)` if the stack is empty. If no colour is left the node is still put back
    /// (uncoloured) and [`AllocError::NoColourAvailable`] is returned.
    pub fn select(&mut self) -> Result<Option<Selected>, AllocError> {
        let Some(mut entry) = self.stack.pop() else {
            debug!("select on an empty stack");
            return Ok(None);
        };
        // A node spilled after an earlier select still carries its old colour.
        entry.detached.node.colour = None;
        let id = entry.detached.node.id;
        let label = entry.label().clone();
        let removal = entry.removal;

        let restored_edges = self.graph.reattach(entry.detached).ice();
        match self.graph.colour_node(id, self.k) {
            Ok(colour) => {
                info!("selected {label} and coloured it {colour}");
                Ok(Some(Selected {
                    id,
                    label,
                    removal,
                    colour,
                    restored_edges,
                }))
            }
            Err(err @ ColourError::UnknownNode(_)) => Err(err).ice(),
            Err(ColourError::NoColourAvailable(_)) => {
                warn!("selected {label} but no colour is left");
                Err(AllocError::NoColourAvailable {
                    labels: Vec1::new(label),
                })
            }
        }
    }

    /// Colours every pre-coloured node. Only allowed once all other nodes have been removed.
    pub fn assign_precolours(&mut self) -> Result<PrecolourReport, AllocError> {
        let remaining: Vec<_> = self
            .graph
            .nodes()
            .filter(|node| !node.is_precoloured())
            .map(|node| node.label.clone())
            .collect();
        if let Ok(labels) = Vec1::try_from_vec(remaining) {
            return Err(AllocError::NonPrecolouredRemain { labels });
        }

        let ids: Vec<_> = self.graph.node_ids().collect();
        let mut assigned = Vec::with_capacity(ids.len());
        let mut uncoloured = Vec::new();
        for id in ids {
            let label = label_of(&self.graph, id);
            match self.graph.colour_node(id, self.k) {
                Ok(colour) => assigned.push((label, colour)),
                Err(_) => uncoloured.push(label),
            }
        }
        info!("assigned {} pre-colours", assigned.len());

        match Vec1::try_from_vec(uncoloured) {
            Ok(labels) => Err(AllocError::NoColourAvailable { labels }),
            Err(_) => Ok(PrecolourReport { assigned }),
        }
    }

    /// Checks whether the two selected nodes may be coalesced under `heuristic`, without
    /// changing anything.
    pub fn check_coalesce(
        &self,
        selection: &[NodeId],
        heuristic: Heuristic,
    ) -> Result<Coalesced, AllocError> {
        let live = self.live_selection(selection, 2, Operation::Coalesce)?;
        let (a, b) = (live[0], live[1]);
        let a_label = label_of(&self.graph, a);
        let b_label = label_of(&self.graph, b);

        if self.graph.interfere(a, b) {
            return Err(AllocError::Interference {
                a: a_label,
                b: b_label,
            });
        }
        if !self.graph.are_move_related(a, b) {
            return Err(AllocError::NotMoveRelated {
                a: a_label,
                b: b_label,
            });
        }

        let evidence = heuristic
            .evaluate(&self.graph, a, b, self.k)
            .map_err(AllocError::Heuristic)?;
        Ok(Coalesced {
            merged: a,
            absorbed: b,
            label: a_label.merged(&b_label),
            a: a_label,
            b: b_label,
            heuristic,
            evidence,
        })
    }

    /// Coalesces the two selected nodes if `heuristic` allows it. The first one survives.
    pub fn coalesce(
        &mut self,
        selection: &[NodeId],
        heuristic: Heuristic,
    ) -> Result<Coalesced, AllocError> {
        let coalesced = self.check_coalesce(selection, heuristic).map_err(|err| {
            warn!("refused to coalesce: {err}");
            err
        })?;
        self.graph
            .merge(coalesced.merged, coalesced.absorbed)
            .ice();
        info!("{coalesced}");
        Ok(coalesced)
    }
}

/// A one-line summary, e.g. `K = 3, 4 nodes, 5 edges, stack: a, c`.
impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "K = {}, {} nodes, {} edges, stack: ",
            self.k,
            self.graph.len(),
            self.graph.edge_count()
        )?;
        match self.stack.is_empty() {
            true => f.write_str("empty"),
            false => write!(f, "{}", self.stack),
        }
    }
}
