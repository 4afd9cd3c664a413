//! Diagnostic catalog for rejected configurations.
//!
//! Every way a configuration can be rejected is one [`DiagnosticKind`].
//! A validation run produces at most one [`Diagnostic`].

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The closed set of reasons a configuration can be rejected.
///
/// Each variant carries the positional arguments of its message.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The configuration file does not exist or cannot be read.
    #[display("Config file '{}' not found", path)]
    #[strum(serialize = "no_config")]
    MissingConfigFile {
        /// Path as given by the caller.
        path: String,
    },

    /// The first line is not three comma-separated integers within bounds.
    #[display("Invalid dimensions format in the configuration file")]
    InvalidDimensions,

    /// An expected blank line is missing.
    ///
    /// Used after the dimension line and after every layer.
    #[display("Expected an empty line after dimensions in the configuration file")]
    #[strum(serialize = "no_empty_line")]
    MissingBlankLineAfterDimensions,

    /// Total line count does not match the declared dimensions.
    #[display(
        "Expected {} lines according to given dimensions in the configuration file, got {}",
        expected,
        actual
    )]
    InvalidLineCount {
        /// Line count implied by the dimensions.
        expected: usize,
        /// Line count of the input.
        actual: usize,
    },

    /// A layer header is not exactly `Layer <index>:`.
    #[display(
        "Invalid layer header format and/or layer index at line {}, expected 'Layer {}:'",
        line,
        layer
    )]
    InvalidLayerHeader {
        /// 1-based line number of the offending header.
        line: usize,
        /// Layer index the header should have named.
        layer: usize,
    },

    /// A row has the wrong number of tokens or a malformed token.
    #[display("Invalid row format at layer {}, row {}", layer, row)]
    InvalidRowFormat {
        /// Layer index.
        layer: usize,
        /// Row index within the layer.
        row: usize,
    },

    /// A sphinx was found outside layer 0.
    #[display(
        "Invalid sphinxes: sphinx found on layer {}, only allowed on layer 0",
        layer
    )]
    #[strum(serialize = "invalid_sphinx_layer")]
    SphinxOnWrongLayer {
        /// Layer the sphinx was found on.
        layer: usize,
    },

    /// A pharaoh was found outside the last layer.
    #[display(
        "Invalid pharaohs: pharaoh found on layer {}, only allowed on layer {}",
        layer,
        expected
    )]
    #[strum(serialize = "invalid_pharaoh_layer")]
    PharaohOnWrongLayer {
        /// Layer the pharaoh was found on.
        layer: usize,
        /// The last layer, the only one pharaohs may occupy.
        expected: usize,
    },

    /// Not exactly one sphinx per player.
    #[display("Invalid sphinxes: expected exactly 1 sphinx per player")]
    InvalidSphinxCount,

    /// Not exactly one pharaoh per player.
    #[display("Invalid pharaohs: expected exactly 1 pharaoh per player")]
    InvalidPharaohCount,
}

impl DiagnosticKind {
    /// Stable snake_case code for this kind, used in logs and reports.
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// The single diagnostic produced by a rejected validation run.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
#[display("{}", kind)]
pub struct Diagnostic {
    kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic of the given kind.
    #[instrument(fields(code = kind.code()))]
    pub fn new(kind: DiagnosticKind) -> Self {
        Self { kind }
    }

    /// Returns the kind, including its positional arguments.
    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    /// Returns the rendered single-line message, without a trailing newline.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<DiagnosticKind> for Diagnostic {
    fn from(kind: DiagnosticKind) -> Self {
        Self::new(kind)
    }
}
