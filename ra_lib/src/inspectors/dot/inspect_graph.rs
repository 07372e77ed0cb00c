use super::{dot_graph::DotGraph, ToDot};
use crate::session::Session;
use igraph::{Graph, NodeId};

fn dot_id(id: NodeId) -> String {
    format!("n{}", id.0)
}

impl ToDot for Graph {
    fn to_dot(&self) -> DotGraph {
        let mut dot = DotGraph::new();
        for node in self.nodes() {
            let fill = node.colour.map_or("white", |colour| colour.name());
            dot.add_node(
                dot_id(node.id),
                vec![
                    ("label", node.label.to_string()),
                    ("fillcolor", fill.to_owned()),
                    // Graphviz puts y upwards.
                    ("pos", format!("{},{}!", node.position.x, 0.0 - node.position.y)),
                ],
            );
        }
        for edge in self.edges() {
            let (from, to) = edge.endpoints();
            let attributes = match edge.kind().is_move() {
                true => vec![("style", "dashed".to_owned())],
                false => vec![],
            };
            dot.add_edge(dot_id(from), dot_id(to), attributes);
        }
        dot
    }
}

impl ToDot for Session {
    fn to_dot(&self) -> DotGraph {
        let mut dot = self.graph().to_dot();
        let stack = match self.stack().is_empty() {
            true => "empty".to_owned(),
            false => self.stack().to_string(),
        };
        dot.set_caption(format!("K = {}, stack: {stack}", self.k()));
        dot
    }
}
