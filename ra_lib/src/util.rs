pub trait Ice {
    type Target;

    /// Unwraps `self` or panics with an ICE (Internal Consistency Error), optionally with a
    /// message based on error data contained in `self`.
    fn ice(self) -> Self::Target;
}

impl<T, M: std::fmt::Display> Ice for std::result::Result<T, M> {
    type Target = T;

    fn ice(self) -> T {
        self.map_err(|msg| format!("ICE: {msg}")).unwrap()
    }
}

/// Looks up the label of a node, falling back on its id for nodes that are not in `graph`.
pub(crate) fn label_of(graph: &igraph::Graph, id: igraph::NodeId) -> igraph::Label {
    graph
        .node(id)
        .map(|node| node.label.clone())
        .unwrap_or_else(|| id.to_string().into())
}

pub(crate) fn labels_of(
    graph: &igraph::Graph,
    ids: impl IntoIterator<Item = igraph::NodeId>,
) -> Vec<igraph::Label> {
    ids.into_iter().map(|id| label_of(graph, id)).collect()
}
