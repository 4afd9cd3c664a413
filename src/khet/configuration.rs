//! Validated board configuration.

use super::layer::Layer;
use super::types::{Dimensions, Owner};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Per-player count of one special piece category.
///
/// Neutral pieces are never tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PieceTally {
    player_a: usize,
    player_b: usize,
}

impl PieceTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one piece for `owner`. Neutral owners are ignored.
    pub fn record(&mut self, owner: Owner) {
        if !owner.is_player() {
            return;
        }
        if owner == Owner::PlayerA {
            self.player_a += 1;
        } else {
            self.player_b += 1;
        }
    }

    /// Returns the count for `owner`. Always zero for [`Owner::Neutral`].
    pub fn get(&self, owner: Owner) -> usize {
        match owner {
            Owner::PlayerA => self.player_a,
            Owner::PlayerB => self.player_b,
            Owner::Neutral => 0,
        }
    }

    /// True when each player has exactly one.
    pub fn is_one_each(&self) -> bool {
        self.player_a == 1 && self.player_b == 1
    }
}

/// A fully validated Khet 3D board configuration.
///
/// Only the validator constructs this type, so holding one means every
/// grammar rule and piece invariant passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    sphinxes: PieceTally,
    pharaohs: PieceTally,
}

impl Configuration {
    #[instrument(skip(layers))]
    pub(super) fn new(
        dimensions: Dimensions,
        layers: Vec<Layer>,
        sphinxes: PieceTally,
        pharaohs: PieceTally,
    ) -> Self {
        Self {
            dimensions,
            layers,
            sphinxes,
            pharaohs,
        }
    }

    /// Returns the declared dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the layers in index order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the layer at `index`.
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Per-player sphinx counts.
    pub fn sphinxes(&self) -> PieceTally {
        self.sphinxes
    }

    /// Per-player pharaoh counts.
    pub fn pharaohs(&self) -> PieceTally {
        self.pharaohs
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::render::render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_ignores_neutral() {
        let mut tally = PieceTally::new();
        tally.record(Owner::PlayerA);
        tally.record(Owner::Neutral);
        tally.record(Owner::PlayerB);
        assert_eq!(tally.get(Owner::PlayerA), 1);
        assert_eq!(tally.get(Owner::PlayerB), 1);
        assert_eq!(tally.get(Owner::Neutral), 0);
        assert!(tally.is_one_each());
    }

    #[test]
    fn test_tally_requires_exactly_one() {
        let mut tally = PieceTally::new();
        assert!(!tally.is_one_each());
        tally.record(Owner::PlayerA);
        tally.record(Owner::PlayerA);
        tally.record(Owner::PlayerB);
        assert!(!tally.is_one_each());
    }
}
