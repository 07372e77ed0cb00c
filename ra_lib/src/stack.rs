use igraph::{DetachedNode, Label};

/// Which command pushed a node onto the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Simplified,
    Spilled,
}

impl std::fmt::Display for Removal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Removal::Simplified => "simplified",
            Removal::Spilled => "spilled",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry {
    /// The node and the edges it had when it was removed.
    pub detached: DetachedNode,
    pub removal: Removal,
}

impl StackEntry {
    pub fn label(&self) -> &Label {
        &self.detached.node.label
    }
}

/// Nodes removed by simplify and spill, waiting to be selected (last in, first out).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkStack {
    entries: Vec<StackEntry>,
}

impl WorkStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, detached: DetachedNode, removal: Removal) {
        self.entries.push(StackEntry { detached, removal });
    }

    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.entries.iter().map(StackEntry::label)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Lists the labels from bottom to top, e.g. `a, c, b`.
impl std::fmt::Display for WorkStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<_> = self.labels().map(Label::as_str).collect();
        f.write_str(&labels.join(", "))
    }
}
