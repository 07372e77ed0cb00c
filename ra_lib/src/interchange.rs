//! The JSON form of a graph, compatible with the exports of the browser tool:
//!
//! ```json
//! { "nodes": [{ "id": 0, "label": "a", "x": 0.0, "y": 0.0 }],
//!   "edges": [{ "from": 0, "to": 1, "dashes": true }],
//!   "K": 3 }
//! ```
//!
//! `dashes` marks a move edge. Older exports may write `K` as a string and ids as strings; both
//! are accepted on import.

use crate::{session::Session, util::Ice};
use igraph::{EdgeKind, Graph, Node, NodeId, Position};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashMap, path::Path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    #[serde(rename = "K", deserialize_with = "number_or_string")]
    pub k: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: RecordId,
    pub label: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: RecordId,
    pub to: RecordId,
    #[serde(default)]
    pub dashes: bool,
}

/// A node id as found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u32),
    Text(String),
}

impl RecordId {
    fn as_number(&self) -> Option<u32> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(text) => text.parse().ok(),
        }
    }

    /// `"3"` and `3` refer to the same node.
    fn normalized(&self) -> RecordId {
        match self.as_number() {
            Some(n) => RecordId::Number(n),
            None => self.clone(),
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<NodeId> for RecordId {
    fn from(id: NodeId) -> Self {
        RecordId::Number(id.0)
    }
}

/// JSON has no NaN or infinity; such a coordinate is written as the origin's.
fn finite_or_zero(coordinate: f64) -> f64 {
    if coordinate.is_finite() {
        coordinate
    } else {
        0.0
    }
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("K must be a number, not {text:?}"))),
    }
}

#[derive(Debug)]
pub enum InterchangeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateNode(RecordId),
    UnknownEndpoint(RecordId),
    SelfLoop(RecordId),
    IdOutOfRange(RecordId),
}

impl std::fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterchangeError::Io(err) => write!(f, "{err}"),
            InterchangeError::Json(err) => write!(f, "invalid graph: {err}"),
            InterchangeError::DuplicateNode(id) => write!(f, "node {id} is listed twice"),
            InterchangeError::UnknownEndpoint(id) => {
                write!(f, "an edge refers to node {id}, which is not listed")
            }
            InterchangeError::SelfLoop(id) => write!(f, "node {id} has an edge to itself"),
            InterchangeError::IdOutOfRange(id) => write!(
                f,
                "node {id} has an id above the largest allowed id {}",
                NodeId::MAX_INSERTED.0
            ),
        }
    }
}

impl std::error::Error for InterchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterchangeError::Io(err) => Some(err),
            InterchangeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InterchangeError {
    fn from(err: std::io::Error) -> Self {
        InterchangeError::Io(err)
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(err: serde_json::Error) -> Self {
        InterchangeError::Json(err)
    }
}

impl Document {
    /// Describes the live nodes of `graph`, in ascending id order, and its edges.
    pub fn export(graph: &Graph, k: u32) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id.into(),
                label: node.label.to_string(),
                x: finite_or_zero(node.position.x),
                y: finite_or_zero(node.position.y),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| {
                let (from, to) = edge.endpoints();
                EdgeRecord {
                    from: from.into(),
                    to: to.into(),
                    dashes: edge.kind().is_move(),
                }
            })
            .collect();
        Self { nodes, edges, k }
    }

    /// Builds the uncoloured graph described by this document.
    ///
    /// Numeric ids are kept; other ids are given fresh numbers after the largest numeric one.
    /// No id may exceed [`NodeId::MAX_INSERTED`].
    pub fn to_graph(&self) -> Result<Graph, InterchangeError> {
        if let Some(record) = self.nodes.iter().find(|node| {
            node.id
                .as_number()
                .map_or(false, |n| n > NodeId::MAX_INSERTED.0)
        }) {
            return Err(InterchangeError::IdOutOfRange(record.id.clone()));
        }
        let mut next_free = self
            .nodes
            .iter()
            .filter_map(|node| node.id.as_number())
            .max()
            .map_or(0, |max| max + 1);

        let mut ids = HashMap::with_capacity(self.nodes.len());
        let mut graph = Graph::new();
        for record in &self.nodes {
            let id = match record.id.as_number() {
                Some(n) => NodeId(n),
                None if next_free > NodeId::MAX_INSERTED.0 => {
                    return Err(InterchangeError::IdOutOfRange(record.id.clone()));
                }
                None => {
                    next_free += 1;
                    NodeId(next_free - 1)
                }
            };
            if ids.insert(record.id.normalized(), id).is_some() {
                return Err(InterchangeError::DuplicateNode(record.id.clone()));
            }
            let position = Position::new(record.x, record.y);
            let node = Node::new(id, record.label.as_str().into(), position);
            graph.insert_node(node).ice();
        }

        for record in &self.edges {
            let endpoint = |id: &RecordId| {
                ids.get(&id.normalized())
                    .copied()
                    .ok_or_else(|| InterchangeError::UnknownEndpoint(id.clone()))
            };
            let (from, to) = (endpoint(&record.from)?, endpoint(&record.to)?);
            if from == to {
                return Err(InterchangeError::SelfLoop(record.from.clone()));
            }
            let kind = EdgeKind::from_is_move(record.dashes);
            if !graph.add_edge(from, to, kind).ice() {
                debug!("ignored duplicate {kind} edge {from} -- {to}");
            }
        }
        Ok(graph)
    }

    pub fn from_json(json: &str) -> Result<Self, InterchangeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).ice()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InterchangeError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), InterchangeError> {
        std::fs::write(path, self.to_json())?;
        Ok(())
    }
}

impl Session {
    pub fn export(&self) -> Document {
        Document::export(self.graph(), self.k())
    }

    /// Replaces the graph, `K` and the stack with the contents of `document`.
    ///
    /// Nothing changes if the document is invalid.
    pub fn import(&mut self, document: &Document) -> Result<(), InterchangeError> {
        let graph = document.to_graph()?;
        info!(
            "imported {} nodes and {} edges",
            graph.len(),
            graph.edge_count()
        );
        self.replace(graph, document.k);
        Ok(())
    }
}
