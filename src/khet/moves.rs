//! Move-command grammar.
//!
//! A standalone recognizer for single move strings. The configuration
//! validator never calls it; it is purely syntactic and does not check
//! coordinates against any board.
//!
//! ```text
//! move   := "q" | coord ( "C" | "A" | "M" coord [ "F" ] )
//! coord  := num "," num "," num
//! num    := 1 or 2 ASCII digits
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A board coordinate as written in a move: `x,y,z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCoord {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
    /// Layer.
    pub z: u8,
}

impl std::fmt::Display for MoveCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Direction of a rotation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// `C`
    Clockwise,
    /// `A`
    Anticlockwise,
}

/// A syntactically valid move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCommand {
    /// `q`
    Quit,
    /// `x,y,zC` or `x,y,zA`
    Rotate {
        /// Piece to rotate.
        at: MoveCoord,
        /// Rotation direction.
        rotation: Rotation,
    },
    /// `x,y,zMx,y,z` with an optional trailing `F`.
    Move {
        /// Source square.
        from: MoveCoord,
        /// Destination square.
        to: MoveCoord,
        /// Whether the trailing `F` marker was present.
        flagged: bool,
    },
}

/// Why a string is not a move command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid move '{}': {}", input, reason)]
pub struct MoveParseError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl MoveParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Returns true if `input` is a syntactically valid move command.
#[instrument]
pub fn is_valid_move(input: &str) -> bool {
    input.parse::<MoveCommand>().is_ok()
}

impl FromStr for MoveCommand {
    type Err = MoveParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == "q" {
            return Ok(MoveCommand::Quit);
        }

        let (at, rest) = parse_coord(input).ok_or_else(|| {
            MoveParseError::new(input, "expected a coordinate of three 1-2 digit numbers")
        })?;

        match rest {
            "C" => Ok(MoveCommand::Rotate {
                at,
                rotation: Rotation::Clockwise,
            }),
            "A" => Ok(MoveCommand::Rotate {
                at,
                rotation: Rotation::Anticlockwise,
            }),
            _ => {
                let target = rest
                    .strip_prefix('M')
                    .ok_or_else(|| MoveParseError::new(input, "expected 'C', 'A' or 'M'"))?;
                let (to, tail) = parse_coord(target).ok_or_else(|| {
                    MoveParseError::new(input, "expected a destination coordinate after 'M'")
                })?;
                let flagged = match tail {
                    "" => false,
                    "F" => true,
                    _ => return Err(MoveParseError::new(input, "unexpected trailing input")),
                };
                Ok(MoveCommand::Move {
                    from: at,
                    to,
                    flagged,
                })
            }
        }
    }
}

impl std::fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveCommand::Quit => write!(f, "q"),
            MoveCommand::Rotate { at, rotation } => {
                let suffix = match rotation {
                    Rotation::Clockwise => 'C',
                    Rotation::Anticlockwise => 'A',
                };
                write!(f, "{at}{suffix}")
            }
            MoveCommand::Move { from, to, flagged } => {
                write!(f, "{from}M{to}")?;
                if *flagged {
                    write!(f, "F")?;
                }
                Ok(())
            }
        }
    }
}

/// Parses `num,num,num` from the front of `s`, returning the rest.
fn parse_coord(s: &str) -> Option<(MoveCoord, &str)> {
    let (x, s) = parse_num(s)?;
    let s = s.strip_prefix(',')?;
    let (y, s) = parse_num(s)?;
    let s = s.strip_prefix(',')?;
    let (z, s) = parse_num(s)?;
    Some((MoveCoord { x, y, z }, s))
}

/// Parses 1 or 2 leading ASCII digits.
fn parse_num(s: &str) -> Option<(u8, &str)> {
    let len = s.bytes().take(2).take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let (digits, rest) = s.split_at(len);
    Some((digits.parse().ok()?, rest))
}
