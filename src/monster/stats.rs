//! Stat keys, natures, statuses, and the stat formulas.

use serde::{Deserialize, Serialize};

/// The six stats of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl StatKey {
    /// The five boostable stats (everything except HP).
    pub const BOOSTABLE: [StatKey; 5] = [
        StatKey::Atk,
        StatKey::Def,
        StatKey::Spa,
        StatKey::Spd,
        StatKey::Spe,
    ];
}

/// A persistent status condition. A monster carries at most one, and it
/// survives switching out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Burn,
    Poison,
    Toxic,
    Paralysis,
    Freeze,
    Sleep,
}

/// A fixed trait that raises one stat by 10% and lowers another by 10%.
///
/// Neutral natures modify nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nature {
    /// Neutral.
    #[default]
    Quirky,
    /// Neutral.
    Serious,
    /// +Atk, -Spa.
    Adamant,
    /// +Spa, -Atk.
    Modest,
    /// +Spe, -Spa.
    Jolly,
    /// +Spe, -Atk.
    Timid,
    /// +Atk, -Spe.
    Brave,
    /// +Def, -Atk.
    Bold,
    /// +Spd, -Atk.
    Calm,
}

impl Nature {
    /// The stat this nature raises, if any.
    #[must_use]
    pub fn increased(self) -> Option<StatKey> {
        match self {
            Nature::Quirky | Nature::Serious => None,
            Nature::Adamant | Nature::Brave => Some(StatKey::Atk),
            Nature::Modest => Some(StatKey::Spa),
            Nature::Jolly | Nature::Timid => Some(StatKey::Spe),
            Nature::Bold => Some(StatKey::Def),
            Nature::Calm => Some(StatKey::Spd),
        }
    }

    /// The stat this nature lowers, if any.
    #[must_use]
    pub fn decreased(self) -> Option<StatKey> {
        match self {
            Nature::Quirky | Nature::Serious => None,
            Nature::Adamant | Nature::Jolly => Some(StatKey::Spa),
            Nature::Modest | Nature::Timid | Nature::Bold | Nature::Calm => Some(StatKey::Atk),
            Nature::Brave => Some(StatKey::Spe),
        }
    }
}

/// The non-HP stat formula.
///
/// `floor((2*base + 31 + floor(ev/4)) * level / 100) + 5`
///
/// ```
/// use rust_arena::monster::calculate_stat;
///
/// assert_eq!(calculate_stat(100, 0, 100), 236);
/// assert_eq!(calculate_stat(100, 252, 100), 299);
/// ```
#[must_use]
pub fn calculate_stat(base: u32, ev: u32, level: u32) -> i32 {
    (((2 * base + 31 + ev / 4) * level) / 100 + 5) as i32
}

/// The HP stat formula: adds `level + 10` instead of `+ 5`.
#[must_use]
pub fn calculate_hp_stat(base: u32, ev: u32, level: u32) -> i32 {
    (((2 * base + 31 + ev / 4) * level) / 100 + level + 10) as i32
}

/// Multiplier for a boost stage.
///
/// Positive stages scale by `(2 + stage) / 2`, negative stages by
/// `2 / (2 - stage)`.
#[must_use]
pub fn boost_factor(stage: i8) -> f64 {
    if stage > 0 {
        (2.0 + f64::from(stage)) / 2.0
    } else if stage < 0 {
        2.0 / (2.0 - f64::from(stage))
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_formula_known_values() {
        // base 100, no investment, level 100
        assert_eq!(calculate_stat(100, 0, 100), 236);
        // max investment
        assert_eq!(calculate_stat(100, 252, 100), 299);
        // low level
        assert_eq!(calculate_stat(100, 0, 5), 16);
    }

    #[test]
    fn test_hp_formula_known_values() {
        assert_eq!(calculate_hp_stat(100, 0, 100), 341);
        assert_eq!(calculate_hp_stat(100, 252, 100), 404);
    }

    #[test]
    fn test_formulas_monotonic_in_ev_and_level() {
        for base in [30u32, 80, 130] {
            let mut prev = calculate_stat(base, 0, 50);
            for ev in (4..=252).step_by(4) {
                let cur = calculate_stat(base, ev, 50);
                assert!(cur >= prev);
                prev = cur;
            }

            let mut prev = calculate_hp_stat(base, 0, 1);
            for level in 2..=100 {
                let cur = calculate_hp_stat(base, 0, level);
                assert!(cur >= prev);
                prev = cur;
            }
        }
    }

    #[test]
    fn test_boost_factor_endpoints() {
        assert_eq!(boost_factor(0), 1.0);
        assert_eq!(boost_factor(6), 4.0);
        assert_eq!(boost_factor(-6), 0.25);
        assert_eq!(boost_factor(2), 2.0);
        assert_eq!(boost_factor(-2), 0.5);
    }

    #[test]
    fn test_natures_modify_one_stat_each_way() {
        for nature in [
            Nature::Quirky,
            Nature::Serious,
            Nature::Adamant,
            Nature::Modest,
            Nature::Jolly,
            Nature::Timid,
            Nature::Brave,
            Nature::Bold,
            Nature::Calm,
        ] {
            match (nature.increased(), nature.decreased()) {
                (None, None) => {}
                (Some(inc), Some(dec)) => assert_ne!(inc, dec),
                other => panic!("nature {nature:?} is half-modified: {other:?}"),
            }
        }
    }
}
