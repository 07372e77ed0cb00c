//! Line-oriented command scripts, replaying what a user would do by hand.
//!
//! ```text
//! k 2
//! node
//! node 10 20     # a node at (10, 20)
//! interfere a b
//! simplify @0
//! ```

mod exec;
mod parse;
#[cfg(test)]
mod test;

pub use exec::{execute, Entry, Outcome, Transcript};
pub use parse::parse;

use crate::{diagnostic::Span, heuristic::Heuristic};
use igraph::{NodeId, Position};

/// A reference to a node, by label (`bd`) or by id (`@3`).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub target: Target,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Label(String),
    Id(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    SetK(u32),
    Node(Option<Position>),
    Precoloured,
    Interfere(NodeRef, NodeRef),
    Move(NodeRef, NodeRef),
    Delete(Vec<NodeRef>),
    Simplify(Vec<NodeRef>),
    Spill(Vec<NodeRef>),
    Select,
    Coalesce(Heuristic, Vec<NodeRef>),
    Freeze(Vec<NodeRef>),
    Precolour,
    Import(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    /// The whole command, without its comment.
    pub span: Span,
}
