//! Turn events and battle outcomes.
//!
//! Events are the only record of what happened in a turn, and the only
//! channel through which agents learn about the opponent. Damage is
//! reported both raw and as a percentage of the defender's maximum HP,
//! since HP bars are public in percent while raw totals are not.

use serde::{Deserialize, Serialize};

use crate::core::SideId;
use crate::data::{MoveId, SpeciesId};
use crate::monster::Status;

/// What one side did (or suffered) during a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Voluntary switch to a benched member.
    Switch { member: SpeciesId },
    /// A move was used against the opposing active.
    Attack {
        mv: MoveId,
        target: SpeciesId,
        /// Raw damage dealt, after immunity and substitute absorption.
        damage: i32,
        /// Damage as percent of the target's maximum HP.
        pct_damage: f64,
        /// False when the accuracy roll failed.
        hit: bool,
    },
    /// The actor could not move (paralysis, freeze, sleep).
    Immobilized { status: Status },
    /// End-of-turn damage from a persistent status.
    StatusDamage { status: Status, damage: i32 },
    /// The actor's active member fainted.
    Faint,
    /// A fainted active was replaced from the bench.
    Replacement { member: SpeciesId },
}

/// One logged event: which turn, which side acted, which species was
/// active for that side, and what happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u32,
    pub side: SideId,
    pub species: SpeciesId,
    pub kind: EventKind,
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// `None` is a draw: simultaneous elimination or the turn ceiling.
    pub winner: Option<SideId>,
    pub turns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_round_trip() {
        let event = TurnEvent {
            turn: 3,
            side: SideId::A,
            species: SpeciesId::new(1),
            kind: EventKind::Attack {
                mv: MoveId::new(2),
                target: SpeciesId::new(4),
                damage: 57,
                pct_damage: 23.5,
                hit: true,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: TurnEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
