//! The interference graph used while allocating registers by hand.
//!
//! A [`Graph`] owns its nodes and two independent edge relations: interference edges, which
//! forbid two values from sharing a register, and move edges, which mark values related by a
//! copy. Nodes whose label contains a digit are pre-coloured (they stand for a physical
//! register).

mod colour;
mod edge;
mod graph;
mod node;

pub use colour::{palette, Colour, ColourError, PALETTE_LEN};
pub use edge::{Edge, EdgeKind};
pub use graph::{DetachedNode, Graph, GraphError};
pub use node::{Label, LabelGenerator, Node, NodeId, Position};
