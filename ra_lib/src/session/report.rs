use crate::{
    heuristic::{CoalesceEvidence, Heuristic},
    stack::Removal,
};
use igraph::{Colour, Label, NodeId};

fn join(labels: &[Label]) -> String {
    match labels.is_empty() {
        true => "none".to_owned(),
        false => labels
            .iter()
            .map(Label::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// A node pushed onto the stack by simplify or spill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub id: NodeId,
    pub label: Label,
    pub degree: usize,
    pub k: u32,
    pub removal: Removal,
}

impl std::fmt::Display for Removed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (verb, cmp) = match self.removal {
            Removal::Simplified => ("simplified", "<"),
            Removal::Spilled => ("spilled", ">="),
        };
        write!(
            f,
            "{verb} {}: degree {} {cmp} K ({})",
            self.label, self.degree, self.k
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frozen {
    pub id: NodeId,
    pub label: Label,
    pub removed_moves: usize,
}

impl std::fmt::Display for Frozen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges = if self.removed_moves == 1 { "edge" } else { "edges" };
        write!(
            f,
            "froze {}: removed {} move {edges}",
            self.label, self.removed_moves
        )
    }
}

/// A node popped from the stack and coloured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    pub id: NodeId,
    pub label: Label,
    pub removal: Removal,
    pub colour: Colour,
    pub restored_edges: usize,
}

impl std::fmt::Display for Selected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "selected {}: coloured {}", self.label, self.colour)?;
        if self.removal == Removal::Spilled {
            f.write_str(" (was a spill candidate)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coalesced {
    /// The surviving node, carrying the merged label.
    pub merged: NodeId,
    /// The node that was merged away.
    pub absorbed: NodeId,
    pub label: Label,
    pub a: Label,
    pub b: Label,
    pub heuristic: Heuristic,
    pub evidence: CoalesceEvidence,
}

impl std::fmt::Display for Coalesced {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "coalesced {} and {} into {} ({}: ",
            self.a, self.b, self.label, self.heuristic
        )?;
        match &self.evidence {
            CoalesceEvidence::Briggs { significant, k } => write!(
                f,
                "{} < K ({k}) neighbours of significant degree: {})",
                significant.len(),
                join(significant)
            ),
            CoalesceEvidence::George {
                from,
                to,
                significant,
            } => write!(
                f,
                "every significant-degree neighbour of {from} is a neighbour of {to}: {})",
                join(significant)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecolourReport {
    /// Labels and colours in ascending id order.
    pub assigned: Vec<(Label, Colour)>,
}

impl std::fmt::Display for PrecolourReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.assigned.is_empty() {
            return f.write_str("no pre-coloured nodes to colour");
        }
        f.write_str("assigned pre-colours: ")?;
        for (i, (label, colour)) in self.assigned.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label} {colour}")?;
        }
        Ok(())
    }
}
