//! Whole-configuration invariants.
//!
//! These hold across every layer at once, so they can only be checked
//! after all rows have been read.

use super::configuration::PieceTally;
use super::diagnostic::DiagnosticKind;

/// A property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;

    /// Diagnostic reported when the invariant does not hold.
    fn violation() -> DiagnosticKind;
}

/// Running tallies collected while reading layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tallies {
    /// Per-player sphinx counts.
    pub sphinxes: PieceTally,
    /// Per-player pharaoh counts.
    pub pharaohs: PieceTally,
}

/// Invariant: exactly one sphinx per player.
pub struct SphinxCountInvariant;

impl Invariant<Tallies> for SphinxCountInvariant {
    fn holds(tallies: &Tallies) -> bool {
        tallies.sphinxes.is_one_each()
    }

    fn description() -> &'static str {
        "Each player has exactly one sphinx"
    }

    fn violation() -> DiagnosticKind {
        DiagnosticKind::InvalidSphinxCount
    }
}

/// Invariant: exactly one pharaoh per player.
pub struct PharaohCountInvariant;

impl Invariant<Tallies> for PharaohCountInvariant {
    fn holds(tallies: &Tallies) -> bool {
        tallies.pharaohs.is_one_each()
    }

    fn description() -> &'static str {
        "Each player has exactly one pharaoh"
    }

    fn violation() -> DiagnosticKind {
        DiagnosticKind::InvalidPharaohCount
    }
}

/// An ordered set of invariants checked first to last.
///
/// Unlike a report of every violation, checking stops at the first
/// invariant that fails.
pub trait InvariantSet<S> {
    /// Returns the first violated invariant's diagnostic, if any.
    fn first_violation(state: &S) -> Option<DiagnosticKind>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn first_violation(state: &S) -> Option<DiagnosticKind> {
        if !I1::holds(state) {
            tracing::debug!(invariant = I1::description(), "Invariant violated");
            return Some(I1::violation());
        }
        if !I2::holds(state) {
            tracing::debug!(invariant = I2::description(), "Invariant violated");
            return Some(I2::violation());
        }
        None
    }
}

/// Piece-count invariants, sphinxes before pharaohs.
pub type PieceCountInvariants = (SphinxCountInvariant, PharaohCountInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::khet::types::Owner;

    fn one_each() -> PieceTally {
        let mut tally = PieceTally::new();
        tally.record(Owner::PlayerA);
        tally.record(Owner::PlayerB);
        tally
    }

    #[test]
    fn test_valid_tallies_hold() {
        let tallies = Tallies {
            sphinxes: one_each(),
            pharaohs: one_each(),
        };
        assert!(SphinxCountInvariant::holds(&tallies));
        assert!(PharaohCountInvariant::holds(&tallies));
        assert_eq!(PieceCountInvariants::first_violation(&tallies), None);
    }

    #[test]
    fn test_sphinx_checked_before_pharaoh() {
        let tallies = Tallies::default();
        assert_eq!(
            PieceCountInvariants::first_violation(&tallies),
            Some(DiagnosticKind::InvalidSphinxCount)
        );
    }

    #[test]
    fn test_missing_pharaoh_reported() {
        let mut pharaohs = PieceTally::new();
        pharaohs.record(Owner::PlayerA);
        let tallies = Tallies {
            sphinxes: one_each(),
            pharaohs,
        };
        assert_eq!(
            PieceCountInvariants::first_violation(&tallies),
            Some(DiagnosticKind::InvalidPharaohCount)
        );
    }
}
