
use crate::{Graph, NodeId};
use arrayvec::ArrayVec;
use log::debug;

/// The number of colours in the palette. `K` larger than this behaves as if it were this.
pub const PALETTE_LEN: usize = 8;

/// A colour, i.e. an abstract register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    LightBlue,
    Orange,
    Green,
    Red,
    Purple,
    Brown,
    Pink,
    Cyan,
}

impl Colour {
    /// All colours, in the order they are handed out.
    pub const PALETTE: [Colour; PALETTE_LEN] = [
        Colour::LightBlue,
        Colour::Orange,
        Colour::Green,
        Colour::Red,
        Colour::Purple,
        Colour::Brown,
        Colour::Pink,
        Colour::Cyan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colour::LightBlue => "lightblue",
            Colour::Orange => "orange",
            Colour::Green => "green",
            Colour::Red => "red",
            Colour::Purple => "purple",
            Colour::Brown => "brown",
            Colour::Pink => "pink",
            Colour::Cyan => "cyan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PALETTE.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The colours usable with `k` registers.
///
/// # Examples
///
/// ```
/// use igraph::{palette, Colour};
///
/// assert_eq!(palette(2), &[Colour::LightBlue, Colour::Orange]);
/// assert!(palette(0).is_empty());
/// assert_eq!(palette(20).len(), 8);
/// ```
pub fn palette(k: u32) -> &'static [Colour] {
    let len = usize::try_from(k).map_or(PALETTE_LEN, |k| k.min(PALETTE_LEN));
    &Colour::PALETTE[..len]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    UnknownNode(NodeId),
    /// Every colour in the palette is taken by an interference neighbour.
    NoColourAvailable(NodeId),
}

impl std::fmt::Display for ColourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColourError::UnknownNode(id) => write!(f, "there is no node {id} in the graph"),
            ColourError::NoColourAvailable(id) => {
                write!(f, "node {id} cannot be coloured: no colours left")
            }
        }
    }
}

impl std::error::Error for ColourError {}

impl Graph {
    /// The colours of the first `k` palette entries not used by an interference neighbour of
    /// `id`, in palette order.
    pub fn available_colours(&self, id: NodeId, k: u32) -> ArrayVec<Colour, PALETTE_LEN> {
        let taken: ArrayVec<Colour, PALETTE_LEN> = self
            .neighbours(id, crate::EdgeKind::Interference)
            .into_iter()
            .filter_map(|n| self.node(n).and_then(|node| node.colour))
            .fold(ArrayVec::new(), |mut taken, colour| {
                if !taken.contains(&colour) {
                    taken.push(colour);
                }
                taken
            });
        palette(k)
            .iter()
            .copied()
            .filter(|colour| !taken.contains(colour))
            .collect()
    }

    /// Gives `id` the first available colour in palette order.
    ///
    /// If there is none, the node is left uncoloured.
    pub fn colour_node(&mut self, id: NodeId, k: u32) -> Result<Colour, ColourError> {
        if !self.contains(id) {
            return Err(ColourError::UnknownNode(id));
        }
        let colour = *self
            .available_colours(id, k)
            .first()
            .ok_or(ColourError::NoColourAvailable(id))?;
        if let Some(node) = self.node_mut(id) {
            node.colour = Some(colour);
        }
        debug!("coloured {id} {colour}");
        Ok(colour)
    }
}
