//! Belief maintenance over hidden opponent stat investment.
//!
//! For every opponent species observed in a battle, a belief tracks
//! which `(max EVs, positive nature)` combinations remain plausible for
//! each stat, plus a numeric speed interval. Observations only ever
//! shrink candidate sets and move the speed bounds inward; an
//! eliminated candidate never returns. Beliefs live for one battle and
//! are discarded at its end.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::BeliefError;
use crate::damage::{RangeCombatant, RangeEstimator, RangeParams, StatProfile};
use crate::data::{Catalogs, Category, MoveId, SpeciesId};
use crate::monster::{calculate_stat, Monster, StatKey};

/// The full cross product of investment hypotheses for one stat.
fn full_profiles() -> Vec<StatProfile> {
    vec![
        StatProfile::new(false, false),
        StatProfile::new(true, false),
        StatProfile::new(false, true),
        StatProfile::new(true, true),
    ]
}

/// Belief state for one opponent species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentBelief {
    pub species: SpeciesId,
    /// Remaining candidates per offensive/defensive stat.
    pub atk: Vec<StatProfile>,
    pub spa: Vec<StatProfile>,
    pub def: Vec<StatProfile>,
    pub spd: Vec<StatProfile>,
    /// Remaining HP candidates (`max_evs` only).
    pub hp: Vec<bool>,
    /// Plausible effective-speed interval; bounds only move inward.
    pub spe_min: f64,
    pub spe_max: f64,
}

impl OpponentBelief {
    /// Seed a fresh belief with the widest possible candidate sets.
    ///
    /// The speed interval spans the level-100 stat at zero investment
    /// with a 0.9 negative-nature margin up to 252 EVs with a 1.1
    /// positive-nature margin.
    #[must_use]
    pub fn seed(species: SpeciesId, base_spe: u32) -> Self {
        Self {
            species,
            atk: full_profiles(),
            spa: full_profiles(),
            def: full_profiles(),
            spd: full_profiles(),
            hp: vec![true, false],
            spe_min: f64::from(calculate_stat(base_spe, 0, 100)) * 0.9,
            spe_max: f64::from(calculate_stat(base_spe, 252, 100)) * 1.1,
        }
    }

    /// Candidate set for an offensive or defensive stat.
    #[must_use]
    pub fn candidates(&self, stat: StatKey) -> &[StatProfile] {
        match stat {
            StatKey::Atk => &self.atk,
            StatKey::Spa => &self.spa,
            StatKey::Def => &self.def,
            StatKey::Spd => &self.spd,
            _ => panic!("no combination candidates for {stat:?}"),
        }
    }

    fn candidates_mut(&mut self, stat: StatKey) -> &mut Vec<StatProfile> {
        match stat {
            StatKey::Atk => &mut self.atk,
            StatKey::Spa => &mut self.spa,
            StatKey::Def => &mut self.def,
            StatKey::Spd => &mut self.spd,
            _ => panic!("no combination candidates for {stat:?}"),
        }
    }

    /// Midpoint of the plausible speed interval.
    #[must_use]
    pub fn speed_midpoint(&self) -> f64 {
        (self.spe_min + self.spe_max) / 2.0
    }
}

/// Per-battle store of opponent beliefs and observed movesets.
///
/// Owned by an agent; only the inference procedures here mutate it.
#[derive(Clone, Debug)]
pub struct BeliefStore<'c> {
    catalogs: &'c Catalogs,
    estimator: RangeEstimator,
    beliefs: FxHashMap<SpeciesId, OpponentBelief>,
    observed_moves: FxHashMap<SpeciesId, Vec<MoveId>>,
}

impl<'c> BeliefStore<'c> {
    #[must_use]
    pub fn new(catalogs: &'c Catalogs) -> Self {
        Self {
            catalogs,
            estimator: RangeEstimator::new(),
            beliefs: FxHashMap::default(),
            observed_moves: FxHashMap::default(),
        }
    }

    /// Seed beliefs for a species the moment it is first observed.
    pub fn observe_species(&mut self, species: SpeciesId) {
        let base_spe = self.catalogs.species.get_unchecked(species).base.spe;
        self.beliefs
            .entry(species)
            .or_insert_with(|| OpponentBelief::seed(species, base_spe));
    }

    #[must_use]
    pub fn belief(&self, species: SpeciesId) -> Option<&OpponentBelief> {
        self.beliefs.get(&species)
    }

    /// Moves this species has been seen using, in observation order.
    #[must_use]
    pub fn known_moves(&self, species: SpeciesId) -> &[MoveId] {
        self.observed_moves
            .get(&species)
            .map_or(&[], Vec::as_slice)
    }

    /// Record a move used by an opponent species.
    pub fn record_move(&mut self, species: SpeciesId, mv: MoveId) {
        let moves = self.observed_moves.entry(species).or_default();
        if !moves.contains(&mv) {
            moves.push(mv);
        }
    }

    /// Narrow an opponent's offense candidates after it attacked one of
    /// our monsters whose investment we know exactly.
    ///
    /// `observed_pct` is the percent damage dealt (0..=100).
    pub fn narrow_offense(
        &mut self,
        attacker_species: SpeciesId,
        mv: MoveId,
        own_defender: &Monster,
        observed_pct: f64,
    ) -> Result<(), BeliefError> {
        self.observe_species(attacker_species);
        let move_def = self.catalogs.moves.get_unchecked(mv);
        if !move_def.is_damaging() {
            return Ok(());
        }

        let stat = if move_def.category == Category::Physical {
            StatKey::Atk
        } else {
            StatKey::Spa
        };
        let def_stat = if stat == StatKey::Atk {
            StatKey::Def
        } else {
            StatKey::Spd
        };

        let attacker = RangeCombatant::from_species(self.catalogs.species.get_unchecked(attacker_species));
        let defender = RangeCombatant::from_species(self.catalogs.species.get_unchecked(own_defender.species));

        // Our own investment is known, not hypothesized.
        let def_profile = own_profile(own_defender, def_stat);
        let hp_max_evs = own_defender.evs.hp > 124;

        let mut valid = Vec::new();
        for profile in full_profiles() {
            let params = RangeParams {
                atk: profile,
                def: def_profile,
                hp_max_evs,
            };
            let (min, max) =
                self.estimator
                    .calculate_range(move_def, &attacker, &defender, &params, &self.catalogs.type_chart);
            if observed_pct >= f64::from(min) && observed_pct <= f64::from(max) {
                valid.push(profile);
            }
        }

        let belief = self.beliefs.get_mut(&attacker_species).expect("seeded above");
        let candidates = belief.candidates_mut(stat);
        if !candidates.iter().any(|c| valid.contains(c)) {
            return Err(BeliefError::Contradiction {
                species: attacker_species.0,
                stat,
                observed_pct,
            });
        }
        candidates.retain(|c| valid.contains(c));
        debug!(
            species = attacker_species.0,
            ?stat,
            remaining = candidates.len(),
            "narrowed offense belief"
        );
        Ok(())
    }

    /// Narrow an opponent's defense and HP candidates after one of our
    /// monsters attacked it.
    pub fn narrow_defense(
        &mut self,
        defender_species: SpeciesId,
        mv: MoveId,
        own_attacker: &Monster,
        observed_pct: f64,
    ) -> Result<(), BeliefError> {
        self.observe_species(defender_species);
        let move_def = self.catalogs.moves.get_unchecked(mv);
        if !move_def.is_damaging() {
            return Ok(());
        }

        let stat = if move_def.category == Category::Physical {
            StatKey::Def
        } else {
            StatKey::Spd
        };
        let atk_stat = if stat == StatKey::Def {
            StatKey::Atk
        } else {
            StatKey::Spa
        };

        let attacker = RangeCombatant::from_species(self.catalogs.species.get_unchecked(own_attacker.species));
        let defender = RangeCombatant::from_species(self.catalogs.species.get_unchecked(defender_species));
        let atk_profile = own_profile(own_attacker, atk_stat);

        // The unknowns pair up: 4 defense combinations x 2 HP
        // combinations. Validity is projected onto each set separately.
        let mut valid_def = Vec::new();
        let mut valid_hp = Vec::new();
        for profile in full_profiles() {
            for hp_max_evs in [false, true] {
                let params = RangeParams {
                    atk: atk_profile,
                    def: profile,
                    hp_max_evs,
                };
                let (min, max) = self.estimator.calculate_range(
                    move_def,
                    &attacker,
                    &defender,
                    &params,
                    &self.catalogs.type_chart,
                );
                if observed_pct >= f64::from(min) && observed_pct <= f64::from(max) {
                    if !valid_def.contains(&profile) {
                        valid_def.push(profile);
                    }
                    if !valid_hp.contains(&hp_max_evs) {
                        valid_hp.push(hp_max_evs);
                    }
                }
            }
        }

        let belief = self.beliefs.get_mut(&defender_species).expect("seeded above");
        let def_ok = belief.candidates(stat).iter().any(|c| valid_def.contains(c));
        let hp_ok = belief.hp.iter().any(|c| valid_hp.contains(c));
        if !def_ok || !hp_ok {
            return Err(BeliefError::Contradiction {
                species: defender_species.0,
                stat: if def_ok { StatKey::Hp } else { stat },
                observed_pct,
            });
        }

        belief.candidates_mut(stat).retain(|c| valid_def.contains(c));
        belief.hp.retain(|c| valid_hp.contains(c));
        debug!(
            species = defender_species.0,
            ?stat,
            remaining = belief.candidates(stat).len(),
            "narrowed defense belief"
        );
        Ok(())
    }

    /// Narrow the speed interval from a turn-order observation at a
    /// known own speed.
    ///
    /// Acting first caps the opponent's maximum; acting second raises
    /// its minimum. Bounds only ever move inward.
    pub fn narrow_speed(&mut self, species: SpeciesId, own_speed: i32, acted_first: bool) {
        self.observe_species(species);
        let belief = self.beliefs.get_mut(&species).expect("seeded above");
        let own_speed = f64::from(own_speed);

        if acted_first {
            if belief.spe_max > own_speed {
                belief.spe_max = own_speed;
            }
        } else if belief.spe_min < own_speed {
            belief.spe_min = own_speed;
        }
    }
}

/// Exact investment profile of one of our own monsters for a stat.
fn own_profile(monster: &Monster, stat: StatKey) -> StatProfile {
    StatProfile::new(
        monster.evs.get(stat) > 124,
        monster.nature.increased() == Some(stat),
    )
}
