//! Core building blocks: side identity, deterministic RNG, error types.

pub mod error;
pub mod rng;
pub mod side;

pub use error::{BeliefError, TeamError};
pub use rng::BattleRng;
pub use side::SideId;
