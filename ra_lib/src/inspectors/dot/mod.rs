mod dot_graph;
mod inspect_graph;
#[cfg(test)]
mod test;

use crate::session::Session;
use dot_graph::DotGraph;
use igraph::Graph;

trait ToDot {
    fn to_dot(&self) -> DotGraph;
}

pub fn inspect_graph(graph: &Graph) -> String {
    graph.to_dot().to_string()
}

/// Like [`inspect_graph`], captioned with `K` and the stack.
pub fn inspect_session(session: &Session) -> String {
    session.to_dot().to_string()
}
