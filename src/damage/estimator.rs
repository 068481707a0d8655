//! Conservative damage-range estimation under unknown investment.
//!
//! When the opponent's EVs and nature are hidden, exact damage cannot
//! be computed. The estimator maps base-stat values through a sparse
//! precomputed "damage stat" table, adjusts for role (HP / offense),
//! investment, and nature, and produces a `[min, max]` percent-damage
//! range that deliberately widens, never narrows, the true range.

use serde::{Deserialize, Serialize};

use crate::data::{Category, ElemType, MoveDef, SpeciesDef, TypeChart};
use crate::monster::{boost_factor, Monster, StatKey, Status};

use super::formula::calculate_modifier;

/// Damage-stat constants for representative base-stat values.
///
/// Sparse above 150; the final entry is the table's literal data and is
/// kept as-is.
const DAMAGE_STATS: [(i32, f64); 39] = [
    (5, 2.19),
    (10, 2.67),
    (15, 3.14),
    (20, 3.62),
    (25, 4.10),
    (30, 4.57),
    (35, 5.05),
    (40, 5.52),
    (45, 6.00),
    (50, 6.48),
    (55, 6.95),
    (60, 7.43),
    (65, 7.90),
    (70, 8.38),
    (75, 8.86),
    (80, 9.33),
    (85, 9.81),
    (90, 10.29),
    (95, 10.76),
    (100, 11.24),
    (105, 11.71),
    (110, 12.19),
    (115, 12.67),
    (120, 13.14),
    (125, 13.62),
    (130, 14.10),
    (135, 14.57),
    (140, 15.05),
    (145, 15.52),
    (150, 16.00),
    (160, 16.95),
    (165, 17.43),
    (170, 17.90),
    (180, 18.86),
    (190, 19.81),
    (200, 20.76),
    (230, 23.62),
    (250, 25.52),
    (255, 260.0),
];

/// Hidden-investment hypothesis for a single stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatProfile {
    pub max_evs: bool,
    pub positive_nature: bool,
}

impl StatProfile {
    #[must_use]
    pub const fn new(max_evs: bool, positive_nature: bool) -> Self {
        Self {
            max_evs,
            positive_nature,
        }
    }
}

/// Investment hypotheses for one range computation: the attacking stat,
/// the defending stat, and whether the defender's HP is max-invested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeParams {
    pub atk: StatProfile,
    pub def: StatProfile,
    pub hp_max_evs: bool,
}

/// Role of the stat being estimated; HP and offense get extra
/// adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatRole {
    Hp,
    Offense,
    Defense,
}

/// One side of a range computation: species data plus whatever boost
/// and status context is known.
#[derive(Clone, Copy, Debug)]
pub struct RangeCombatant<'a> {
    pub species: &'a SpeciesDef,
    boosts: [i8; 5],
    burned: bool,
}

impl<'a> RangeCombatant<'a> {
    /// A combatant about which nothing beyond species is known.
    #[must_use]
    pub fn from_species(species: &'a SpeciesDef) -> Self {
        Self {
            species,
            boosts: [0; 5],
            burned: false,
        }
    }

    /// A combatant with known boost stages and status.
    #[must_use]
    pub fn from_monster(species: &'a SpeciesDef, monster: &Monster) -> Self {
        let mut boosts = [0; 5];
        for (i, &stat) in StatKey::BOOSTABLE.iter().enumerate() {
            boosts[i] = monster.boost(stat);
        }
        Self {
            species,
            boosts,
            burned: monster.status == Some(Status::Burn),
        }
    }

    /// A combatant with explicitly supplied boost stages, ordered as
    /// [`StatKey::BOOSTABLE`].
    #[must_use]
    pub fn with_boosts(species: &'a SpeciesDef, boosts: [i8; 5]) -> Self {
        Self {
            species,
            boosts,
            burned: false,
        }
    }

    /// Mark the combatant as burned (halves its physical output).
    #[must_use]
    pub fn burned(mut self, burned: bool) -> Self {
        self.burned = burned;
        self
    }

    fn boost(&self, stat: StatKey) -> i8 {
        StatKey::BOOSTABLE
            .iter()
            .position(|&s| s == stat)
            .map_or(0, |i| self.boosts[i])
    }

    fn types(&self) -> &[ElemType] {
        &self.species.types
    }
}

/// The damage-range estimator.
///
/// Stateless apart from its constant table; cheap to construct and
/// share.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeEstimator;

impl RangeEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimate the percent-damage range of `mv` from `attacker` into
    /// `defender` under the investment hypotheses in `params`.
    ///
    /// Returns `(min, max)` in whole percent, `min <= max`.
    #[must_use]
    pub fn calculate_range(
        &self,
        mv: &MoveDef,
        attacker: &RangeCombatant<'_>,
        defender: &RangeCombatant<'_>,
        params: &RangeParams,
        chart: &TypeChart,
    ) -> (i32, i32) {
        let physical = mv.category == Category::Physical;
        let (atk_stat, def_stat) = if physical {
            (StatKey::Atk, StatKey::Def)
        } else {
            (StatKey::Spa, StatKey::Spd)
        };

        let mut modifier = calculate_modifier(mv.elem, attacker.types(), defender.types(), chart);
        modifier *= boost_factor(attacker.boost(atk_stat)) / boost_factor(defender.boost(def_stat));

        let d_atk = self.estimate_dmg_val(
            attacker.species.base.get(atk_stat) as i32,
            StatRole::Offense,
            params.atk.max_evs,
            params.atk.positive_nature,
        );
        let d_hp = self.estimate_dmg_val(
            defender.species.base.hp as i32,
            StatRole::Hp,
            params.hp_max_evs,
            false,
        );
        let d_def = self.estimate_dmg_val(
            defender.species.base.get(def_stat) as i32,
            StatRole::Defense,
            params.def.max_evs,
            params.def.positive_nature,
        );

        let mut max_dmg = d_atk * modifier * f64::from(mv.base_power) / (d_hp * d_def);

        // Burned attackers have their physical damage halved.
        if attacker.burned && physical {
            max_dmg *= 0.5;
        }

        ((0.85 * max_dmg).floor() as i32, max_dmg.ceil() as i32)
    }

    /// Look up (or interpolate) the damage-stat constant for a base
    /// stat value and adjust it for role, investment, and nature.
    fn estimate_dmg_val(
        &self,
        stat_val: i32,
        role: StatRole,
        max_evs: bool,
        positive_nature: bool,
    ) -> f64 {
        let mut dmg_val = match DAMAGE_STATS.iter().find(|&&(k, _)| k == stat_val) {
            Some(&(_, v)) => v,
            None => {
                let (key, offset) = Self::find_closest(stat_val);
                let base = DAMAGE_STATS
                    .iter()
                    .find(|&&(k, _)| k == key)
                    .map(|&(_, v)| v)
                    .unwrap_or_default();
                base + 0.19 * f64::from(offset) / 2.0
            }
        };

        if max_evs {
            dmg_val += 3.0;
        }

        match role {
            StatRole::Hp => dmg_val += 5.0,
            StatRole::Offense => dmg_val *= 4.0,
            StatRole::Defense => {}
        }

        if positive_nature {
            dmg_val *= 1.1;
        }

        // Double rounding keeps the .4999... artifacts of the table
        // arithmetic from leaking into comparisons.
        round_to(round_to(dmg_val, 3), 2)
    }

    /// Find the tabulated key closest to `number` and the signed offset
    /// from it.
    ///
    /// Values below the smallest key extrapolate from it with a
    /// negative offset; this reuses the in-table slope outside its
    /// fitted domain and is an unverified boundary at extreme low
    /// stats. The scan keeps the literal signed-distance comparison of
    /// the table's reference data; no tie rule is implied.
    fn find_closest(number: i32) -> (i32, i32) {
        let first = DAMAGE_STATS[0].0;
        if number < first {
            return (first, number - first);
        }

        let mut smallest_diff = f64::INFINITY;
        let mut closest = first;
        for &(key, _) in DAMAGE_STATS.iter() {
            let diff = number - key;
            if f64::from(diff.abs()) < smallest_diff {
                smallest_diff = f64::from(diff);
                closest = key;
            }
        }

        (closest, number - closest)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
