//! Immutable data catalogs.
//!
//! The catalogs are the closed-world declarative data a battle runs on:
//! species base stats and typing, move capability data, the
//! type-effectiveness chart, and the usage-frequency table the planner
//! consults for unseen opponent moves.
//!
//! Catalogs are constructed once (by a loader outside this crate, or by
//! the [`crate::sample`] module in tests) and passed by reference into
//! the engine, damage model, and agents. Nothing mutates them after
//! construction.

pub mod moves;
pub mod species;
pub mod types;
pub mod usage;

pub use moves::{
    Accuracy, BoostSpec, BoostTarget, Category, MoveCatalog, MoveDef, MoveId, SecondaryEffect,
    VolatileSpec,
};
pub use species::{BaseStats, SpeciesCatalog, SpeciesDef, SpeciesId};
pub use types::{ElemType, TypeChart};
pub use usage::UsageTable;

/// The full set of catalogs a battle needs.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub species: SpeciesCatalog,
    pub moves: MoveCatalog,
    pub type_chart: TypeChart,
    pub usage: UsageTable,
}
