//! The deterministic damage formula.

use crate::core::BattleRng;
use crate::data::{Category, ElemType, MoveDef, TypeChart};
use crate::monster::{Monster, StatKey};

/// Whether a damage computation rolls the stochastic factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageMode {
    /// Roll the critical hit (1/16, x1.5) and the spread ([0.85, 1.0]).
    Random,
    /// Skip both rolls; used for reproducible expectation computation.
    Deterministic,
}

/// STAB and type-effectiveness modifier for an attack.
///
/// 1.5x when the move's type is among the attacker's types, multiplied
/// by the effectiveness product over all defender types. A product of
/// zero means the move is immune.
#[must_use]
pub fn calculate_modifier(
    move_type: ElemType,
    attacker_types: &[ElemType],
    defender_types: &[ElemType],
    chart: &TypeChart,
) -> f64 {
    let stab = if attacker_types.contains(&move_type) {
        1.5
    } else {
        1.0
    };
    stab * chart.multiplier(move_type, defender_types)
}

/// Compute damage for a damaging move.
///
/// `floor(2*level/5 + 2) * power`, scaled by the attacker/defender
/// effective-stat ratio for the move's category, `floor(/50) + 2`, then
/// multiplied by STAB, type effectiveness, and (in `Random` mode) the
/// critical and spread factors.
///
/// Callers must not pass status-category moves.
#[must_use]
pub fn calculate_damage(
    mv: &MoveDef,
    attacker: &Monster,
    defender: &Monster,
    chart: &TypeChart,
    rng: &mut BattleRng,
    mode: DamageMode,
) -> i32 {
    let (atk_stat, def_stat) = match mv.category {
        Category::Physical => (StatKey::Atk, StatKey::Def),
        Category::Special => (StatKey::Spa, StatKey::Spd),
        Category::Status => panic!("status moves have no base damage"),
    };

    let mut damage = f64::from(2 * attacker.level / 5 + 2);
    damage *= f64::from(mv.base_power);
    damage = (damage * f64::from(attacker.effective_stat(atk_stat))).floor()
        / f64::from(defender.effective_stat(def_stat));
    damage = (damage / 50.0).floor() + 2.0;

    let mut modifier = calculate_modifier(mv.elem, &attacker.types, &defender.types, chart);
    if mode == DamageMode::Random {
        if rng.crit_roll() {
            modifier *= 1.5;
        }
        modifier *= rng.damage_spread();
    }

    (damage * modifier).floor() as i32
}
