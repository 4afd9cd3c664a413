//! Phase-specific typestate pipeline for configuration validation.
//!
//! Each stage of the grammar is its own type and consumes the previous
//! stage, so a later check can never run after an earlier one failed and
//! stage-specific data (dimensions, tallies) only exists once it has been
//! established. Every transition returns `Result<_, Diagnostic>`; the first
//! `Err` ends the run.
//!
//! ```text
//! RawInput ─parse_dimensions→ DimensionedInput ─check_blank_line→ SeparatedInput
//!   ─check_line_count→ CountedInput ─parse_layers→ PopulatedBoard
//!   ─check_piece_counts→ Configuration
//! ```

use super::configuration::Configuration;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::invariants::{InvariantSet, PieceCountInvariants, Tallies};
use super::layer::{Layer, LayerBuilder};
use super::types::{Dimensions, Glyph, Owner, Piece};
use tracing::{debug, instrument};

/// Validates a complete configuration text.
///
/// Runs every stage in order and stops at the first violation.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn validate(text: &str) -> Result<Configuration, Diagnostic> {
    RawInput::new(text)
        .parse_dimensions()?
        .check_blank_line()?
        .check_line_count()?
        .parse_layers()?
        .check_piece_counts()
}

// ─────────────────────────────────────────────────────────────
//  Raw input
// ─────────────────────────────────────────────────────────────

/// Configuration text split into lines, nothing checked yet.
#[derive(Debug, Clone)]
pub struct RawInput<'a> {
    lines: Vec<&'a str>,
}

impl<'a> RawInput<'a> {
    /// Splits `text` into lines. A final newline does not start a new line.
    #[instrument(skip(text))]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Number of input lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Parses `width,height,layers` from the first line.
    #[instrument(skip(self))]
    pub fn parse_dimensions(self) -> Result<DimensionedInput<'a>, Diagnostic> {
        let first = self
            .lines
            .first()
            .ok_or(DiagnosticKind::InvalidDimensions)?;

        let dimensions = parse_dimension_line(first).ok_or(DiagnosticKind::InvalidDimensions)?;
        debug!(%dimensions, "Parsed dimensions");

        Ok(DimensionedInput {
            lines: self.lines,
            dimensions,
        })
    }
}

/// Splits on `\n`, `\r\n` and a lone `\r`.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(i) = rest.find(['\n', '\r']) {
        lines.push(&rest[..i]);
        let break_len = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + break_len..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

fn parse_dimension_line(line: &str) -> Option<Dimensions> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let [width, height, layers] = fields.as_slice() else {
        return None;
    };
    let parse = |field: &str| -> Option<usize> {
        let value: i64 = field.trim().parse().ok()?;
        usize::try_from(value).ok()
    };
    Dimensions::new(parse(*width)?, parse(*height)?, parse(*layers)?)
}

// ─────────────────────────────────────────────────────────────
//  Dimensioned
// ─────────────────────────────────────────────────────────────

/// Input whose dimension line parsed within bounds.
#[derive(Debug, Clone)]
pub struct DimensionedInput<'a> {
    lines: Vec<&'a str>,
    dimensions: Dimensions,
}

impl<'a> DimensionedInput<'a> {
    /// Returns the declared dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Requires the second line to be blank.
    #[instrument(skip(self))]
    pub fn check_blank_line(self) -> Result<SeparatedInput<'a>, Diagnostic> {
        if !is_blank(self.lines.get(1).copied()) {
            return Err(DiagnosticKind::MissingBlankLineAfterDimensions.into());
        }
        Ok(SeparatedInput {
            lines: self.lines,
            dimensions: self.dimensions,
        })
    }
}

fn is_blank(line: Option<&str>) -> bool {
    line.is_some_and(|line| line.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────
//  Separated
// ─────────────────────────────────────────────────────────────

/// Input with a valid dimension line followed by a blank line.
#[derive(Debug, Clone)]
pub struct SeparatedInput<'a> {
    lines: Vec<&'a str>,
    dimensions: Dimensions,
}

impl<'a> SeparatedInput<'a> {
    /// Requires the total line count to match the dimensions.
    #[instrument(skip(self))]
    pub fn check_line_count(self) -> Result<CountedInput<'a>, Diagnostic> {
        let expected = self.dimensions.expected_line_count();
        let actual = self.lines.len();
        if expected != actual {
            return Err(DiagnosticKind::InvalidLineCount { expected, actual }.into());
        }
        Ok(CountedInput {
            lines: self.lines,
            dimensions: self.dimensions,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Counted
// ─────────────────────────────────────────────────────────────

/// Input whose line count matches its dimensions; layers not yet read.
#[derive(Debug, Clone)]
pub struct CountedInput<'a> {
    lines: Vec<&'a str>,
    dimensions: Dimensions,
}

impl CountedInput<'_> {
    /// Reads every layer: header, rows and trailing blank line.
    ///
    /// Sphinx and pharaoh placement is checked as each piece is placed.
    #[instrument(skip(self), fields(dimensions = %self.dimensions))]
    pub fn parse_layers(self) -> Result<PopulatedBoard, Diagnostic> {
        let dimensions = self.dimensions;
        let mut cursor = LineCursor::new(&self.lines, 2);
        let mut tallies = Tallies::default();
        let mut layers = Vec::with_capacity(dimensions.layers());

        for z in 0..dimensions.layers() {
            let header = cursor.next();
            if header.map(str::trim) != Some(format!("Layer {z}:").as_str()) {
                return Err(DiagnosticKind::InvalidLayerHeader {
                    line: cursor.line_number(),
                    layer: z,
                }
                .into());
            }

            let mut builder = LayerBuilder::new(z, dimensions.width(), dimensions.height());
            for row in 0..dimensions.height() {
                let line = cursor.next().ok_or(DiagnosticKind::InvalidLineCount {
                    expected: dimensions.expected_line_count(),
                    actual: self.lines.len(),
                })?;
                read_row(line, row, &dimensions, &mut builder, &mut tallies)?;
            }

            if !is_blank(cursor.next()) {
                return Err(DiagnosticKind::MissingBlankLineAfterDimensions.into());
            }

            debug!(layer = z, "Layer accepted");
            layers.push(builder.build());
        }

        Ok(PopulatedBoard {
            dimensions,
            layers,
            tallies,
        })
    }
}

/// Walks input lines and remembers how many have been consumed.
struct LineCursor<'l, 'a> {
    lines: &'l [&'a str],
    position: usize,
}

impl<'l, 'a> LineCursor<'l, 'a> {
    fn new(lines: &'l [&'a str], position: usize) -> Self {
        Self { lines, position }
    }

    /// Consumes the next line.
    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.position).copied();
        self.position += 1;
        line
    }

    /// 1-based number of the most recently consumed line.
    fn line_number(&self) -> usize {
        self.position
    }
}

/// A parsed row token.
enum Cell {
    Empty,
    Occupied(Piece),
}

fn read_row(
    line: &str,
    row: usize,
    dimensions: &Dimensions,
    builder: &mut LayerBuilder,
    tallies: &mut Tallies,
) -> Result<(), Diagnostic> {
    let z = builder.index();
    let row_error = || Diagnostic::new(DiagnosticKind::InvalidRowFormat { layer: z, row });

    let tokens = tokenize(line);
    if tokens.len() != dimensions.width() {
        return Err(row_error());
    }

    for (column, token) in tokens.into_iter().enumerate() {
        let piece = match parse_token(token).ok_or_else(row_error)? {
            Cell::Empty => {
                builder.put(column, row, None);
                continue;
            }
            Cell::Occupied(piece) => piece,
        };

        match piece.glyph() {
            Glyph::Sphinx => {
                if z != 0 {
                    return Err(DiagnosticKind::SphinxOnWrongLayer { layer: z }.into());
                }
                tallies.sphinxes.record(piece.owner());
            }
            Glyph::Pharaoh => {
                let expected = dimensions.last_layer();
                if z != expected {
                    return Err(DiagnosticKind::PharaohOnWrongLayer { layer: z, expected }.into());
                }
                tallies.pharaohs.record(piece.owner());
            }
            Glyph::Other => {}
        }

        builder.put(column, row, Some(piece));
    }

    Ok(())
}

/// Splits a row on whitespace.
///
/// A lone `(` followed by `,N)` is re-joined so the empty-cell token
/// `( ,N)` survives a round trip through the renderer.
fn tokenize(line: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else {
            start.get_or_insert(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }

    let mut tokens = Vec::with_capacity(spans.len());
    let mut spans = spans.into_iter().peekable();
    while let Some((s, e)) = spans.next() {
        if &line[s..e] == "(" {
            if let Some((_, next_end)) = spans.next_if(|&(ns, ne)| &line[ns..ne] == ",N)") {
                tokens.push(&line[s..next_end]);
                continue;
            }
        }
        tokens.push(&line[s..e]);
    }
    tokens
}

/// Parses `(symbol,owner)`. A blank symbol is an empty cell and must be neutral.
fn parse_token(token: &str) -> Option<Cell> {
    let inner = token.strip_prefix('(')?.strip_suffix(')')?;
    let (symbol, owner) = inner.split_once(',')?;
    if owner.contains(',') {
        return None;
    }
    let owner = Owner::from_tag(owner.trim())?;
    match Piece::new(symbol, owner) {
        Some(piece) => Some(Cell::Occupied(piece)),
        None if owner == Owner::Neutral => Some(Cell::Empty),
        None => None,
    }
}

// ─────────────────────────────────────────────────────────────
//  Populated
// ─────────────────────────────────────────────────────────────

/// Every layer read and placement-checked; piece counts not yet verified.
#[derive(Debug, Clone)]
pub struct PopulatedBoard {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    tallies: Tallies,
}

impl PopulatedBoard {
    /// Returns the layers read so far.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Requires exactly one sphinx and one pharaoh per player.
    #[instrument(skip(self))]
    pub fn check_piece_counts(self) -> Result<Configuration, Diagnostic> {
        if let Some(kind) = PieceCountInvariants::first_violation(&self.tallies) {
            return Err(kind.into());
        }
        Ok(Configuration::new(
            self.dimensions,
            self.layers,
            self.tallies.sphinxes,
            self.tallies.pharaohs,
        ))
    }
}
