//! The entity model: a battling monster.
//!
//! A `Monster` owns its computed stats, current HP, persistent status,
//! boost stages, volatile conditions, and move list. Only the battle
//! engine holds mutable references once a battle starts; agents see
//! read-only snapshots or anonymized views.

mod stats;

pub use stats::{boost_factor, calculate_hp_stat, calculate_stat, Nature, StatKey, Status};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::TeamError;
use crate::data::{Catalogs, ElemType, MoveId, SpeciesId};

/// Effort values per stat, each 0..=255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvSpread {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl EvSpread {
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

    fn validate(&self) -> Result<(), TeamError> {
        for stat in [
            StatKey::Hp,
            StatKey::Atk,
            StatKey::Def,
            StatKey::Spa,
            StatKey::Spd,
            StatKey::Spe,
        ] {
            let value = self.get(stat);
            if value > 255 {
                return Err(TeamError::InvalidEvs { stat, value });
            }
        }
        Ok(())
    }
}

/// State payload of an active volatile condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatileData {
    /// Bare named flag.
    Flag,
    /// Named condition with an effect payload and per-turn counter.
    Effect { effect: String, counter: u32 },
    /// HP buffer that absorbs damage in lieu of the owner.
    Substitute { hp: i32 },
    /// Committed move plus the number of turns the lock has persisted.
    LockedMove { mv: MoveId, turns: u32 },
}

/// Derived stat block after EV, level, and nature adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct DerivedStats {
    max_hp: i32,
    attack: i32,
    defense: i32,
    sp_attack: i32,
    sp_defense: i32,
    speed: i32,
}

impl DerivedStats {
    fn get(&self, stat: StatKey) -> i32 {
        match stat {
            StatKey::Hp => self.max_hp,
            StatKey::Atk => self.attack,
            StatKey::Def => self.defense,
            StatKey::Spa => self.sp_attack,
            StatKey::Spd => self.sp_defense,
            StatKey::Spe => self.speed,
        }
    }
}

/// A battling creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub species: SpeciesId,
    pub level: u32,
    pub nature: Nature,
    pub evs: EvSpread,
    pub types: SmallVec<[ElemType; 2]>,
    pub moves: SmallVec<[MoveId; 4]>,

    stats: DerivedStats,
    pub current_hp: i32,
    pub status: Option<Status>,
    /// Turn counter for the current status (sleep turns, toxic turns).
    pub status_turns: u32,
    /// Boost stages for the five boostable stats, each in [-6, 6].
    boosts: [i8; 5],
    volatiles: FxHashMap<String, VolatileData>,
}

impl Monster {
    /// Build a monster, validating species, moves, level, and EVs.
    pub fn new(
        species: SpeciesId,
        moves: &[MoveId],
        level: u32,
        nature: Nature,
        evs: EvSpread,
        catalogs: &Catalogs,
    ) -> Result<Self, TeamError> {
        let def = catalogs
            .species
            .get(species)
            .ok_or(TeamError::UnknownSpecies(species.0))?;

        if moves.is_empty() {
            return Err(TeamError::NoMoves);
        }
        for &mv in moves {
            if !catalogs.moves.contains(mv) {
                return Err(TeamError::UnknownMove(mv.0));
            }
        }
        if !(1..=100).contains(&level) {
            return Err(TeamError::InvalidLevel(level));
        }
        evs.validate()?;

        let mut stats = DerivedStats {
            max_hp: calculate_hp_stat(def.base.hp, evs.hp, level),
            attack: calculate_stat(def.base.atk, evs.atk, level),
            defense: calculate_stat(def.base.def, evs.def, level),
            sp_attack: calculate_stat(def.base.spa, evs.spa, level),
            sp_defense: calculate_stat(def.base.spd, evs.spd, level),
            speed: calculate_stat(def.base.spe, evs.spe, level),
        };

        // Nature modifies exactly one stat up and one down; HP is exempt.
        if let (Some(inc), Some(dec)) = (nature.increased(), nature.decreased()) {
            let raised = (f64::from(stats.get(inc)) * 1.1).floor() as i32;
            let lowered = (f64::from(stats.get(dec)) * 0.9).floor() as i32;
            Self::set_stat(&mut stats, inc, raised);
            Self::set_stat(&mut stats, dec, lowered);
        }

        Ok(Self {
            species,
            level,
            nature,
            evs,
            types: def.types.clone(),
            moves: SmallVec::from_slice(moves),
            current_hp: stats.max_hp,
            stats,
            status: None,
            status_turns: 0,
            boosts: [0; 5],
            volatiles: FxHashMap::default(),
        })
    }

    fn set_stat(stats: &mut DerivedStats, stat: StatKey, value: i32) {
        match stat {
            StatKey::Hp => stats.max_hp = value,
            StatKey::Atk => stats.attack = value,
            StatKey::Def => stats.defense = value,
            StatKey::Spa => stats.sp_attack = value,
            StatKey::Spd => stats.sp_defense = value,
            StatKey::Spe => stats.speed = value,
        }
    }

    fn boost_index(stat: StatKey) -> usize {
        match stat {
            StatKey::Atk => 0,
            StatKey::Def => 1,
            StatKey::Spa => 2,
            StatKey::Spd => 3,
            StatKey::Spe => 4,
            StatKey::Hp => panic!("HP has no boost stage"),
        }
    }

    /// Maximum HP.
    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp
    }

    /// Raw (unboosted) value of a stat.
    #[must_use]
    pub fn raw_stat(&self, stat: StatKey) -> i32 {
        self.stats.get(stat)
    }

    /// Current boost stage of a stat.
    #[must_use]
    pub fn boost(&self, stat: StatKey) -> i8 {
        self.boosts[Self::boost_index(stat)]
    }

    /// Apply a boost-stage delta, clamping to [-6, 6].
    ///
    /// This is the only place stage values are clamped.
    pub fn apply_boost(&mut self, stat: StatKey, delta: i8) {
        let slot = &mut self.boosts[Self::boost_index(stat)];
        *slot = (i16::from(*slot) + i16::from(delta)).clamp(-6, 6) as i8;
    }

    /// Effective stat after boost multiplier and status modifiers.
    ///
    /// Burn halves effective attack; paralysis halves effective speed.
    /// The result is floored.
    #[must_use]
    pub fn effective_stat(&self, stat: StatKey) -> i32 {
        let mut value = f64::from(self.stats.get(stat));
        if stat != StatKey::Hp {
            value *= boost_factor(self.boost(stat));
        }

        let status_modifier = match (stat, self.status) {
            (StatKey::Atk, Some(Status::Burn)) => 0.5,
            (StatKey::Spe, Some(Status::Paralysis)) => 0.5,
            _ => 1.0,
        };

        (value * status_modifier).floor() as i32
    }

    /// Fraction of HP remaining, in [0, 1].
    #[must_use]
    pub fn fraction_hp(&self) -> f64 {
        f64::from(self.current_hp.max(0)) / f64::from(self.stats.max_hp)
    }

    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.current_hp <= 0
    }

    /// Subtract damage, flooring HP at 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
    }

    /// Restore a fraction of max HP, capped at max.
    pub fn heal_fraction(&mut self, fraction: f64) {
        let amount = (f64::from(self.stats.max_hp) * fraction).floor() as i32;
        self.current_hp = (self.current_hp + amount).min(self.stats.max_hp);
    }

    /// Set a persistent status. A status already present is never
    /// overwritten; first-observed wins.
    pub fn try_set_status(&mut self, status: Status) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        self.status_turns = 0;
        true
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_turns = 0;
    }

    // === Volatile conditions ===

    #[must_use]
    pub fn has_volatile(&self, name: &str) -> bool {
        self.volatiles.contains_key(name)
    }

    #[must_use]
    pub fn volatile(&self, name: &str) -> Option<&VolatileData> {
        self.volatiles.get(name)
    }

    #[must_use]
    pub fn volatile_mut(&mut self, name: &str) -> Option<&mut VolatileData> {
        self.volatiles.get_mut(name)
    }

    /// Add a volatile condition. A condition already present is never
    /// re-applied; returns whether the insert happened.
    pub fn add_volatile(&mut self, name: impl Into<String>, data: VolatileData) -> bool {
        let name = name.into();
        if self.volatiles.contains_key(&name) {
            return false;
        }
        self.volatiles.insert(name, data);
        true
    }

    pub fn remove_volatile(&mut self, name: &str) {
        self.volatiles.remove(name);
    }

    /// Increment per-turn counters on all active volatile conditions.
    pub fn tick_volatile_counters(&mut self) {
        for data in self.volatiles.values_mut() {
            match data {
                VolatileData::Effect { counter, .. } => *counter += 1,
                VolatileData::LockedMove { turns, .. } => *turns += 1,
                VolatileData::Flag | VolatileData::Substitute { .. } => {}
            }
        }
    }

    /// Active volatile condition names, for anonymized views.
    pub fn volatile_names(&self) -> impl Iterator<Item = &str> {
        self.volatiles.keys().map(String::as_str)
    }

    /// Reset per-tenure state when this monster takes the field.
    ///
    /// Boosts and volatile conditions clear; the toxic counter restarts.
    /// Other statuses keep their counters (sleep remembers its turns).
    pub fn reset_on_entry(&mut self) {
        self.boosts = [0; 5];
        self.volatiles.clear();
        if self.status == Some(Status::Toxic) {
            self.status_turns = 0;
        }
    }
}
