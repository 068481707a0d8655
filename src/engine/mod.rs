//! The battle engine.
//!
//! [`BattleEngine`] owns the full state of one battle and is the only
//! place it mutates. Agents interact through [`BattleView`] snapshots
//! and the [`TurnEvent`] log; resolution order, status handling, and
//! the win condition all live in [`battle`].

mod battle;
mod events;
mod state;
mod view;

pub use battle::{BattleEngine, DEFAULT_TURN_LIMIT};
pub use events::{EventKind, Outcome, TurnEvent};
pub use state::{BattleState, SideState};
pub use view::{BattleView, OpponentMember, OpponentView};
