//! Error types for team validation and belief updates.
//!
//! Contract violations inside the engine (unknown catalog ids, illegal
//! agent actions) are programming errors and panic instead; see the
//! catalog `get_unchecked` methods and the action assertions in the
//! battle engine.

use thiserror::Error;

use crate::monster::StatKey;

/// Validation failure while constructing a monster or team.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("unknown species id {0}")]
    UnknownSpecies(u32),

    #[error("unknown move id {0}")]
    UnknownMove(u32),

    #[error("a monster must know at least one move")]
    NoMoves,

    #[error("level {0} outside 1..=100")]
    InvalidLevel(u32),

    #[error("EVs for {stat:?} must be 0..=255, got {value}")]
    InvalidEvs { stat: StatKey, value: u32 },

    #[error("a team must have at least one member")]
    EmptyTeam,
}

/// Failure while narrowing an opponent belief.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BeliefError {
    /// An observation eliminated every remaining candidate. The stored
    /// candidate set is left untouched; callers decide how to proceed.
    #[error("observed {observed_pct:.1}% damage is consistent with no remaining {stat:?} candidate for species {species}")]
    Contradiction {
        species: u32,
        stat: StatKey,
        observed_pct: f64,
    },
}
