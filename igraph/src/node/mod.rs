#[cfg(test)]
mod test;

mod label_generator;

pub use label_generator::*;

use crate::Colour;

/// Identifies a node within a [`Graph`](crate::Graph).
///
/// Ids are handed out by the graph from a counter that never rewinds, so an id is never reused
/// for a different node.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The largest id [`Graph::insert_node`](crate::Graph::insert_node) accepts.
    pub const MAX_INSERTED: NodeId = NodeId(i32::MAX as u32);
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The name shown for a node.
///
/// Ordinary nodes are named with lowercase letters, pre-coloured nodes with a numeral. Merging
/// two nodes concatenates their labels and sorts the characters.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this label names a pre-coloured node, i.e. contains a decimal digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use igraph::Label;
    ///
    /// assert!(Label::new("3").is_precoloured());
    /// assert!(Label::new("1ab").is_precoloured());
    /// assert!(!Label::new("abd").is_precoloured());
    /// ```
    pub fn is_precoloured(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_digit())
    }

    /// The label of the node obtained by merging nodes labelled `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use igraph::Label;
    ///
    /// let bd = Label::new("b").merged(&Label::new("d"));
    /// assert_eq!(bd.as_str(), "bd");
    /// assert_eq!(bd.merged(&Label::new("a")).as_str(), "abd");
    /// ```
    pub fn merged(&self, other: &Label) -> Label {
        let mut chars: Vec<char> = self.0.chars().chain(other.0.chars()).collect();
        chars.sort_unstable();
        Label(chars.into_iter().collect())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout hint carried along for whoever draws the graph. The allocator never looks at it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    /// `None` while the node is uncoloured.
    pub colour: Option<Colour>,
    pub position: Position,
}

impl Node {
    pub fn new(id: NodeId, label: Label, position: Position) -> Self {
        Self {
            id,
            label,
            colour: None,
            position,
        }
    }

    pub fn is_precoloured(&self) -> bool {
        self.label.is_precoloured()
    }
}
