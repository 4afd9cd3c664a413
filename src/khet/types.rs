//! Core domain types for Khet 3D board configurations.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Owner of a piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Owner {
    /// First player, written `A`.
    #[strum(serialize = "A")]
    PlayerA,
    /// Second player, written `B`.
    #[strum(serialize = "B")]
    PlayerB,
    /// Nobody, written `N`. Used for scenery and empty cells.
    #[strum(serialize = "N")]
    Neutral,
}

impl Owner {
    /// Parses an owner tag (`A`, `B` or `N`).
    #[instrument]
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }

    /// Returns true for the two players, false for [`Owner::Neutral`].
    pub fn is_player(self) -> bool {
        !matches!(self, Owner::Neutral)
    }
}

/// Category of a piece symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// One of the four directional sphinx glyphs.
    Sphinx,
    /// One of the two pharaoh glyphs.
    Pharaoh,
    /// Anything else.
    Other,
}

impl Glyph {
    /// Sphinx glyphs, one per facing.
    pub const SPHINXES: [&'static str; 4] = ["▲", "▼", "◀", "▶"];

    /// Pharaoh glyphs.
    pub const PHARAOHS: [&'static str; 2] = ["•", "⊕"];

    /// Classifies a symbol.
    #[instrument]
    pub fn classify(symbol: &str) -> Self {
        if Self::SPHINXES.contains(&symbol) {
            Glyph::Sphinx
        } else if Self::PHARAOHS.contains(&symbol) {
            Glyph::Pharaoh
        } else {
            Glyph::Other
        }
    }
}

/// A piece on the board: a display symbol and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    symbol: String,
    owner: Owner,
}

impl Piece {
    /// Creates a piece. Returns `None` for a blank symbol.
    #[instrument(skip(symbol), fields(symbol = %symbol.as_ref()))]
    pub fn new(symbol: impl AsRef<str>, owner: Owner) -> Option<Self> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return None;
        }
        Some(Self {
            symbol: symbol.to_string(),
            owner,
        })
    }

    /// Returns the display symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the owner.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Returns the category of this piece's symbol.
    pub fn glyph(&self) -> Glyph {
        Glyph::classify(&self.symbol)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.symbol, self.owner)
    }
}

/// Board dimensions as declared on the first line of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    width: usize,
    height: usize,
    layers: usize,
}

impl Dimensions {
    /// Allowed range for width and height.
    pub const SIDE: std::ops::RangeInclusive<usize> = 3..=30;

    /// Allowed range for the number of layers.
    pub const LAYERS: std::ops::RangeInclusive<usize> = 1..=8;

    /// Creates dimensions, returning `None` if any value is out of bounds.
    #[instrument]
    pub fn new(width: usize, height: usize, layers: usize) -> Option<Self> {
        if Self::SIDE.contains(&width) && Self::SIDE.contains(&height) && Self::LAYERS.contains(&layers)
        {
            Some(Self {
                width,
                height,
                layers,
            })
        } else {
            None
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows per layer.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Index of the topmost layer, the only one allowed to hold pharaohs.
    pub fn last_layer(&self) -> usize {
        self.layers - 1
    }

    /// Total line count a configuration with these dimensions must have.
    ///
    /// Dimension line and blank line, then per layer a header, `height`
    /// rows and a blank line.
    pub fn expected_line_count(&self) -> usize {
        2 + self.layers * (self.height + 2)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.width, self.height, self.layers)
    }
}
