//! Damage model: the deterministic formula and the range estimator.
//!
//! The formula ([`calculate_damage`]) needs both combatants' exact
//! stats; the engine uses it with `DamageMode::Random`. The estimator
//! ([`RangeEstimator`]) produces a conservative `[min, max]` percent
//! range when one side's stat investment is unknown, and is the
//! workhorse of investment inference and the planning agent.

mod estimator;
mod formula;

pub use estimator::{RangeCombatant, RangeEstimator, RangeParams, StatProfile};
pub use formula::{calculate_damage, calculate_modifier, DamageMode};
