//! Decision-making agents.
//!
//! An agent is anything that can pick an action from a [`BattleView`].
//! The engine drives both sides through this trait, so baselines,
//! planners, and test scripts all plug in the same way.

mod planner;
mod random;

pub use planner::PlanningAgent;
pub use random::RandomAgent;

use crate::engine::{BattleView, TurnEvent};

/// One side's choice for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Use the active monster's move at this index.
    Attack(usize),
    /// Switch to the team member at this index.
    Switch(usize),
}

/// A battle participant.
///
/// `choose_action` and `choose_replacement` must return legal choices
/// for the given view; the engine treats an illegal choice as a
/// programmer error and panics.
pub trait Agent {
    /// Pick this turn's action.
    fn choose_action(&mut self, view: &BattleView<'_>) -> Action;

    /// Pick a team index to send out after the active member fainted.
    ///
    /// Only called when the view has at least one living bench member.
    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize;

    /// Observe the events of a resolved turn.
    ///
    /// The view reflects the post-turn state. Agents that maintain
    /// beliefs about the opponent update them here.
    fn observe_turn(&mut self, _view: &BattleView<'_>, _events: &[TurnEvent]) {}
}
