//! Khet 3D library - configuration validation for three-dimensional Khet boards
//!
//! Reads a textual board description, enforces its positional grammar and
//! the sphinx/pharaoh invariants, and renders a validated board in
//! canonical form. Validation is fail-fast: a run yields either a
//! [`Configuration`] or exactly one [`Diagnostic`].
//!
//! # Architecture
//!
//! - **Validator**: typestate pipeline, one type per grammar stage
//! - **Diagnostics**: closed catalog of ten rejection kinds
//! - **Renderer**: canonical text for a validated board
//! - **Output**: per-config artifact files and the missing-file fallback
//! - **Moves**: standalone move-command grammar
//!
//! # Example
//!
//! ```
//! use khet3d::{DiagnosticKind, validate};
//!
//! let text = "3,3,1\n\nLayer 0:\n(▲,A) ( ,N) (•,B)\n( ,N) ( ,N) ( ,N)\n(•,A) ( ,N) (▼,B)\n\n";
//! let config = validate(text).expect("valid board");
//! assert_eq!(config.layers().len(), 1);
//!
//! let err = validate("2,5,1\n\n").unwrap_err();
//! assert_eq!(err.kind(), &DiagnosticKind::InvalidDimensions);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod khet;
mod output;
mod settings;

// Crate-level exports - Board model
pub use khet::{Configuration, Dimensions, Glyph, Layer, LayerBuilder, Owner, Piece, PieceTally};

// Crate-level exports - Diagnostics
pub use khet::{Diagnostic, DiagnosticKind};

// Crate-level exports - Validation stages
pub use khet::{
    CountedInput, DimensionedInput, PopulatedBoard, RawInput, SeparatedInput, validate,
};

// Crate-level exports - Invariants
pub use khet::{
    Invariant, InvariantSet, PharaohCountInvariant, PieceCountInvariants, SphinxCountInvariant,
    Tallies,
};

// Crate-level exports - Rendering
pub use khet::{EMPTY_CELL, render, render_document};

// Crate-level exports - Move grammar
pub use khet::{MoveCommand, MoveCoord, MoveParseError, Rotation, is_valid_move};

// Crate-level exports - Output and settings
pub use output::{Outcome, OutputError, Report, process};
pub use settings::{OUTPUT_DIR_ENV, Settings, SettingsError};
