use crate::{diagnostic::Code, heuristic::Heuristic};
use igraph::{Label, NodeId};
use vec1::Vec1;

/// The allocator commands that act on a selection of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Simplify,
    Spill,
    Freeze,
    Coalesce,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Simplify => "simplify",
            Operation::Spill => "spill",
            Operation::Freeze => "freeze",
            Operation::Coalesce => "coalesce",
        })
    }
}

/// Why a heuristic refused to coalesce two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicFailure {
    /// The coalesced node would have at least `k` neighbours of significant degree.
    Briggs { significant: Vec<Label>, k: u32 },
    /// Neither node's significant-degree neighbours are all neighbours of the other.
    /// `a_blockers` are the significant neighbours of `a` that don't interfere with `b`, and vice
    /// versa.
    George {
        a: Label,
        b: Label,
        a_blockers: Vec1<Label>,
        b_blockers: Vec1<Label>,
    },
}

impl HeuristicFailure {
    pub fn heuristic(&self) -> Heuristic {
        match self {
            HeuristicFailure::Briggs { .. } => Heuristic::Briggs,
            HeuristicFailure::George { .. } => Heuristic::George,
        }
    }
}

/// A command the allocator refused. The session is unchanged, except for
/// [`AllocError::NoColourAvailable`] which is reported after the command did its work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    Selection {
        operation: Operation,
        needed: usize,
        found: usize,
    },
    Precoloured {
        operation: Operation,
        label: Label,
    },
    NonPrecolouredRemain {
        labels: Vec1<Label>,
    },
    MoveRelated {
        operation: Operation,
        label: Label,
    },
    NotMoveRelated {
        a: Label,
        b: Label,
    },
    SignificantDegree {
        label: Label,
        degree: usize,
        k: u32,
    },
    InsignificantDegree {
        label: Label,
        degree: usize,
        k: u32,
    },
    Interference {
        a: Label,
        b: Label,
    },
    Heuristic(HeuristicFailure),
    NoColourAvailable {
        labels: Vec1<Label>,
    },
    UnknownNode(NodeId),
    SelfLoop(Label),
}

impl AllocError {
    pub fn code(&self) -> Code {
        match self {
            AllocError::Selection { .. } => Code::Selection,
            AllocError::Precoloured { .. } => Code::Precoloured,
            AllocError::NonPrecolouredRemain { .. } => Code::NonPrecolouredRemain,
            AllocError::MoveRelated { .. } => Code::MoveRelated,
            AllocError::NotMoveRelated { .. } => Code::NotMoveRelated,
            AllocError::SignificantDegree { .. } => Code::SignificantDegree,
            AllocError::InsignificantDegree { .. } => Code::InsignificantDegree,
            AllocError::Interference { .. } => Code::Interference,
            AllocError::Heuristic(_) => Code::Heuristic,
            AllocError::NoColourAvailable { .. } => Code::NoColourAvailable,
            AllocError::UnknownNode(_) => Code::UnknownNode,
            AllocError::SelfLoop(_) => Code::SelfLoop,
        }
    }
}

impl AllocError {
    /// The nodes the error is about, as far as they were named in the command.
    pub fn culprits(&self) -> Vec<&Label> {
        match self {
            AllocError::Precoloured { label, .. }
            | AllocError::MoveRelated { label, .. }
            | AllocError::SignificantDegree { label, .. }
            | AllocError::InsignificantDegree { label, .. }
            | AllocError::SelfLoop(label) => vec![label],
            AllocError::NotMoveRelated { a, b } | AllocError::Interference { a, b } => vec![a, b],
            AllocError::Heuristic(HeuristicFailure::George { a, b, .. }) => vec![a, b],
            AllocError::Selection { .. }
            | AllocError::NonPrecolouredRemain { .. }
            | AllocError::Heuristic(HeuristicFailure::Briggs { .. })
            | AllocError::NoColourAvailable { .. }
            | AllocError::UnknownNode(_) => Vec::new(),
        }
    }
}

fn join(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocError::Selection {
                operation,
                needed,
                found,
            } => {
                let nodes = if *needed == 1 { "node" } else { "nodes" };
                let count = match needed {
                    1 => "one",
                    2 => "two",
                    _ => "more",
                };
                write!(
                    f,
                    "need exactly {count} {nodes} to {operation}, but {found} selected"
                )
            }
            AllocError::Precoloured { operation, label } => {
                write!(f, "cannot {operation} pre-coloured node {label}")
            }
            AllocError::NonPrecolouredRemain { labels } => write!(
                f,
                "cannot assign pre-colours: some non-pre-coloured nodes remain ({})",
                join(labels)
            ),
            AllocError::MoveRelated { operation, label } => {
                write!(f, "cannot {operation} move-related node {label}")
            }
            AllocError::NotMoveRelated { a, b } => {
                write!(f, "cannot coalesce {a} and {b}: they are not move-related")
            }
            AllocError::SignificantDegree { label, degree, k } => write!(
                f,
                "cannot simplify node {label} of significant degree: {degree} >= K ({k})"
            ),
            AllocError::InsignificantDegree { label, degree, k } => write!(
                f,
                "cannot spill node {label} of insignificant degree: {degree} < K ({k}), \
                 simplify it instead"
            ),
            AllocError::Interference { a, b } => {
                write!(f, "cannot coalesce {a} and {b}: they interfere")
            }
            AllocError::Heuristic(HeuristicFailure::Briggs { significant, k }) => write!(
                f,
                "cannot coalesce according to the Briggs heuristic: coalesced node will have \
                 {} >= K ({k}) neighbours of significant degree ({})",
                significant.len(),
                join(significant)
            ),
            AllocError::Heuristic(HeuristicFailure::George {
                a,
                b,
                a_blockers,
                b_blockers,
            }) => write!(
                f,
                "cannot coalesce according to the George heuristic: {a} has significant-degree \
                 neighbours that are not neighbours of {b} ({}), and {b} has significant-degree \
                 neighbours that are not neighbours of {a} ({})",
                join(a_blockers),
                join(b_blockers)
            ),
            AllocError::NoColourAvailable { labels } if labels.len() == 1 => write!(
                f,
                "node {} cannot be coloured: no colours left",
                labels.first()
            ),
            AllocError::NoColourAvailable { labels } => write!(
                f,
                "nodes {} cannot be coloured: no colours left",
                join(labels)
            ),
            AllocError::UnknownNode(id) => write!(f, "there is no node {id}"),
            AllocError::SelfLoop(label) => write!(f, "can't connect {label} to itself"),
        }
    }
}

impl std::error::Error for AllocError {}
