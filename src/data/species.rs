//! Species definitions and the species catalog.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::types::ElemType;
use crate::monster::StatKey;

/// Unique identifier for a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Base stat block for a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl BaseStats {
    /// Base value for a stat.
    #[must_use]
    pub fn get(&self, stat: StatKey) -> u32 {
        match stat {
            StatKey::Hp => self.hp,
            StatKey::Atk => self.atk,
            StatKey::Def => self.def,
            StatKey::Spa => self.spa,
            StatKey::Spd => self.spd,
            StatKey::Spe => self.spe,
        }
    }
}

/// A species definition: typing and base stats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: SpeciesId,
    pub name: String,
    pub types: SmallVec<[ElemType; 2]>,
    pub base: BaseStats,
}

impl SpeciesDef {
    #[must_use]
    pub fn new(
        id: SpeciesId,
        name: impl Into<String>,
        types: &[ElemType],
        base: BaseStats,
    ) -> Self {
        assert!(!types.is_empty(), "a species needs at least one type");
        Self {
            id,
            name: name.into(),
            types: SmallVec::from_slice(types),
            base,
        }
    }
}

/// Registry of species definitions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    species: FxHashMap<SpeciesId, SpeciesDef>,
}

impl SpeciesCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species definition.
    ///
    /// Panics if a species with the same ID already exists.
    pub fn register(&mut self, def: SpeciesDef) {
        if self.species.contains_key(&def.id) {
            panic!("Species with ID {:?} already registered", def.id);
        }
        self.species.insert(def.id, def);
    }

    #[must_use]
    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesDef> {
        self.species.get(&id)
    }

    /// Get a species definition, panicking if not found.
    ///
    /// The data catalogs are assumed complete; a missing id is a fatal
    /// lookup failure.
    #[must_use]
    pub fn get_unchecked(&self, id: SpeciesId) -> &SpeciesDef {
        self.species.get(&id).expect("Species not found in catalog")
    }

    #[must_use]
    pub fn contains(&self, id: SpeciesId) -> bool {
        self.species.contains_key(&id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesDef> {
        self.species.values().find(|s| s.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef> {
        self.species.values()
    }
}
