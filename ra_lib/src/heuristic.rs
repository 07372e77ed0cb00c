//! Conservative coalescing tests.
//!
//! Both tests only answer whether coalescing two nodes is safe; they never modify the live
//! graph. The callers are responsible for checking that the nodes exist, differ, don't
//! interfere and are move-related.

use crate::{
    error::HeuristicFailure,
    util::{label_of, labels_of, Ice},
};
use igraph::{Graph, Label, NodeId};
use vec1::Vec1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Briggs,
    George,
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Heuristic::Briggs => "Briggs",
            Heuristic::George => "George",
        })
    }
}

/// Why a heuristic allowed coalescing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoalesceEvidence {
    /// The coalesced node has fewer than `k` neighbours of significant degree.
    Briggs { significant: Vec<Label>, k: u32 },
    /// Every significant-degree neighbour of `from` is a neighbour of `to`.
    George {
        from: Label,
        to: Label,
        significant: Vec<Label>,
    },
}

impl Heuristic {
    pub fn evaluate(
        &self,
        graph: &Graph,
        a: NodeId,
        b: NodeId,
        k: u32,
    ) -> Result<CoalesceEvidence, HeuristicFailure> {
        match self {
            Heuristic::Briggs => briggs(graph, a, b, k),
            Heuristic::George => george(graph, a, b, k),
        }
    }
}

/// Coalescing `a` and `b` is safe if the merged node has fewer than `k` neighbours of
/// significant degree. Evaluated on a copy of `graph`.
pub fn briggs(
    graph: &Graph,
    a: NodeId,
    b: NodeId,
    k: u32,
) -> Result<CoalesceEvidence, HeuristicFailure> {
    let mut speculative = graph.clone();
    let merged = speculative.merge(a, b).ice();

    let significant = speculative.significant_neighbours(merged, k);
    let over_limit = significant.len() >= k as usize;
    let significant = labels_of(&speculative, significant);

    match over_limit {
        true => Err(HeuristicFailure::Briggs { significant, k }),
        false => Ok(CoalesceEvidence::Briggs { significant, k }),
    }
}

/// Coalescing `a` and `b` is safe if every significant-degree neighbour of one of them also
/// interferes with the other. Tries `a` first.
pub fn george(
    graph: &Graph,
    a: NodeId,
    b: NodeId,
    k: u32,
) -> Result<CoalesceEvidence, HeuristicFailure> {
    let a_blockers = match george_blockers(graph, a, b, k) {
        Ok(significant) => return Ok(george_evidence(graph, a, b, significant)),
        Err(blockers) => blockers,
    };
    let b_blockers = match george_blockers(graph, b, a, k) {
        Ok(significant) => return Ok(george_evidence(graph, b, a, significant)),
        Err(blockers) => blockers,
    };

    Err(HeuristicFailure::George {
        a: label_of(graph, a),
        b: label_of(graph, b),
        a_blockers,
        b_blockers,
    })
}

/// Returns the significant-degree neighbours of `x` if they all interfere with `y`, otherwise
/// the ones that don't.
fn george_blockers(
    graph: &Graph,
    x: NodeId,
    y: NodeId,
    k: u32,
) -> Result<Vec<NodeId>, Vec1<Label>> {
    let significant = graph.significant_neighbours(x, k);
    let blockers: Vec<_> = significant
        .iter()
        .copied()
        .filter(|&t| !graph.interfere(t, y))
        .collect();
    match Vec1::try_from_vec(labels_of(graph, blockers)) {
        Ok(blockers) => Err(blockers),
        Err(_) => Ok(significant.into_iter().collect()),
    }
}

fn george_evidence(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    significant: Vec<NodeId>,
) -> CoalesceEvidence {
    CoalesceEvidence::George {
        from: label_of(graph, from),
        to: label_of(graph, to),
        significant: labels_of(graph, significant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use igraph::{EdgeKind, Position};

    fn pair() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node("a".into(), Position::default());
        let b = graph.add_node("b".into(), Position::default());
        graph.add_edge(a, b, EdgeKind::Move).unwrap();
        (graph, a, b)
    }

    #[test]
    fn briggs_never_allows_coalescing_without_registers() {
        let (graph, a, b) = pair();
        assert_eq!(
            briggs(&graph, a, b, 0),
            Err(HeuristicFailure::Briggs {
                significant: vec![],
                k: 0
            })
        );
        assert!(briggs(&graph, a, b, 1).is_ok());
    }

    #[test]
    fn briggs_counts_neighbours_of_the_merged_node() {
        // c interferes with both a and b, so after merging it only counts once.
        let (mut graph, a, b) = pair();
        let c = graph.add_node("c".into(), Position::default());
        let d = graph.add_node("d".into(), Position::default());
        for (x, y) in [(a, c), (b, c), (c, d)] {
            graph.add_edge(x, y, EdgeKind::Interference).unwrap();
        }
        let before = graph.clone();

        assert_eq!(
            Heuristic::Briggs.evaluate(&graph, a, b, 2),
            Ok(CoalesceEvidence::Briggs {
                significant: vec!["c".into()],
                k: 2
            })
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn george_prefers_the_first_node() {
        let (graph, a, b) = pair();
        assert_eq!(
            george(&graph, a, b, 2),
            Ok(CoalesceEvidence::George {
                from: "a".into(),
                to: "b".into(),
                significant: vec![]
            })
        );
    }
}
