mod configuration;
mod diagnostic;
mod invariants;
mod layer;
mod moves;
mod render;
mod types;
mod validator;

pub use configuration::{Configuration, PieceTally};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use invariants::{
    Invariant, InvariantSet, PharaohCountInvariant, PieceCountInvariants, SphinxCountInvariant,
    Tallies,
};
pub use layer::{Layer, LayerBuilder};
pub use moves::{MoveCommand, MoveCoord, MoveParseError, Rotation, is_valid_move};
pub use render::{EMPTY_CELL, render, render_document};
pub use types::{Dimensions, Glyph, Owner, Piece};
pub use validator::{
    CountedInput, DimensionedInput, PopulatedBoard, RawInput, SeparatedInput, validate,
};
