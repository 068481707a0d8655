//! Side identification for two-sided battles.
//!
//! A battle always has exactly two sides. `SideId` indexes into
//! per-side arrays and knows its opponent.

use serde::{Deserialize, Serialize};

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    /// The first side (seated from `team_a`).
    A,
    /// The second side (seated from `team_b`).
    B,
}

impl SideId {
    /// Both sides, in seating order.
    pub const BOTH: [SideId; 2] = [SideId::A, SideId::B];

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> SideId {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    /// Index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SideId::A => 0,
            SideId::B => 1,
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideId::A => write!(f, "side-a"),
            SideId::B => write!(f, "side-b"),
        }
    }
}
