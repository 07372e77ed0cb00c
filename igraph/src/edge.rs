use crate::NodeId;

/// The two relations of the graph. They are independent: a pair of nodes can have an
/// interference edge and a move edge at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    Interference,
    Move,
}

impl EdgeKind {
    pub fn from_is_move(is_move: bool) -> Self {
        match is_move {
            true => Self::Move,
            false => Self::Interference,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move)
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EdgeKind::Interference => "interference",
            EdgeKind::Move => "move",
        })
    }
}

/// An undirected edge between two distinct nodes.
///
/// The endpoints are stored in ascending order, so two edges between the same pair of nodes and
/// of the same kind compare equal regardless of the order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
    kind: EdgeKind,
}

impl Edge {
    /// Returns `None` if `a == b`, edges never loop.
    pub fn new(a: NodeId, b: NodeId, kind: EdgeKind) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                low: a,
                high: b,
                kind,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                low: b,
                high: a,
                kind,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.low == id || self.high == id
    }

    /// Returns the endpoint opposite to `id`, or `None` if `id` is not an endpoint.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_order_is_irrelevant() {
        let e1 = Edge::new(NodeId(3), NodeId(1), EdgeKind::Move).unwrap();
        let e2 = Edge::new(NodeId(1), NodeId(3), EdgeKind::Move).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.endpoints(), (NodeId(1), NodeId(3)));
        assert_ne!(
            e1,
            Edge::new(NodeId(1), NodeId(3), EdgeKind::Interference).unwrap()
        );
    }

    #[test]
    fn refuses_self_loops() {
        assert!(Edge::new(NodeId(2), NodeId(2), EdgeKind::Interference).is_none());
    }

    #[test]
    fn finds_other_endpoint() {
        let e = Edge::new(NodeId(4), NodeId(7), EdgeKind::Interference).unwrap();
        assert_eq!(e.other(NodeId(4)), Some(NodeId(7)));
        assert_eq!(e.other(NodeId(7)), Some(NodeId(4)));
        assert_eq!(e.other(NodeId(5)), None);
        assert!(e.touches(NodeId(7)));
        assert!(!e.touches(NodeId(5)));
    }
}
