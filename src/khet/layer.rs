//! A single z-level of the board.
//!
//! Layers are assembled row by row through a [`LayerBuilder`] and frozen
//! into an immutable [`Layer`] once every row and the trailing blank line
//! have been accepted. A partially read layer never reaches a
//! [`Configuration`](super::Configuration).

use super::types::Piece;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One z-level of the board: a `width` × `height` grid of optional pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    index: usize,
    width: usize,
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Option<Piece>>,
}

impl Layer {
    /// Returns this layer's z-index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets the piece at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&Piece> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_ref()
    }

    /// Iterates over rows, top to bottom as stored.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>]> {
        self.cells.chunks(self.width)
    }

    /// Iterates over occupied cells as `(x, y, piece)`.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, &Piece)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|piece| (i % width, i / width, piece)))
    }
}

/// Scoped, mutable construction of a [`Layer`].
#[derive(Debug)]
pub struct LayerBuilder {
    index: usize,
    width: usize,
    height: usize,
    cells: Vec<Option<Piece>>,
}

impl LayerBuilder {
    /// Starts an empty layer.
    #[instrument]
    pub fn new(index: usize, width: usize, height: usize) -> Self {
        Self {
            index,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Returns the z-index of the layer under construction.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Places a cell at column `x`, row `y`. Out-of-range coordinates are ignored.
    pub fn put(&mut self, x: usize, y: usize, cell: Option<Piece>) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// Freezes the builder into an immutable layer.
    #[instrument(skip(self), fields(index = self.index))]
    pub fn build(self) -> Layer {
        Layer {
            index: self.index,
            width: self.width,
            height: self.height,
            cells: self.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::khet::types::Owner;

    fn piece(symbol: &str, owner: Owner) -> Option<Piece> {
        Piece::new(symbol, owner)
    }

    #[test]
    fn test_empty_layer() {
        let layer = LayerBuilder::new(0, 3, 4).build();
        assert_eq!(layer.rows().count(), 4);
        assert!(layer.rows().all(|row| row.len() == 3));
        assert_eq!(layer.pieces().count(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut builder = LayerBuilder::new(2, 3, 3);
        builder.put(2, 1, piece("▲", Owner::PlayerA));
        let layer = builder.build();

        assert_eq!(layer.index(), 2);
        assert_eq!(layer.get(2, 1).map(Piece::symbol), Some("▲"));
        assert!(layer.get(1, 2).is_none());
        assert!(layer.get(3, 0).is_none());
    }

    #[test]
    fn test_out_of_range_put_ignored() {
        let mut builder = LayerBuilder::new(0, 3, 3);
        builder.put(3, 0, piece("x", Owner::Neutral));
        builder.put(0, 3, piece("x", Owner::Neutral));
        assert_eq!(builder.build().pieces().count(), 0);
    }

    #[test]
    fn test_pieces_reports_coordinates() {
        let mut builder = LayerBuilder::new(0, 4, 3);
        builder.put(3, 2, piece("•", Owner::PlayerB));
        let layer = builder.build();
        let found: Vec<_> = layer.pieces().map(|(x, y, p)| (x, y, p.to_string())).collect();
        assert_eq!(found, vec![(3, 2, "(•,B)".to_string())]);
    }
}
