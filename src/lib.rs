//! A deterministic, turn-based creature battle simulator with hidden
//! information.
//!
//! Two teams of monsters fight through a fixed-order turn loop: both
//! sides commit an action, switches resolve before attacks, attacks
//! order by priority then speed, and persistent statuses tick at the
//! end of the turn. Everything stochastic flows through one seeded RNG,
//! so a battle replays bit-for-bit.
//!
//! What makes the game interesting is what each side cannot see: the
//! opponent's stat investment and nature. The [`inference`] module
//! maintains shrinking candidate sets over those hidden values, the
//! [`damage`] estimator turns them into percent-damage ranges, and the
//! [`agent::PlanningAgent`] maximizes expected position over both.
//!
//! ```
//! use rust_arena::agent::{PlanningAgent, RandomAgent};
//! use rust_arena::engine::BattleEngine;
//! use rust_arena::sample;
//!
//! let catalogs = sample::catalogs();
//! let team_a = vec![sample::monster("riptide", &catalogs)];
//! let team_b = vec![sample::monster("cindercub", &catalogs)];
//!
//! let mut engine = BattleEngine::new(&catalogs, team_a, team_b, 42).unwrap();
//! let mut planner = PlanningAgent::new(&catalogs);
//! let mut baseline = RandomAgent::new(7);
//! let outcome = engine.run(&mut planner, &mut baseline);
//! assert!(outcome.turns > 0);
//! ```

pub mod agent;
pub mod core;
pub mod damage;
pub mod data;
pub mod engine;
pub mod inference;
pub mod monster;
pub mod sample;

pub use agent::{Action, Agent};
pub use core::{BattleRng, BeliefError, SideId, TeamError};
pub use engine::{BattleEngine, Outcome};
pub use monster::Monster;
