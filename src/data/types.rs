//! Elemental types and the effectiveness chart.
//!
//! The chart is keyed defender-first: for each defending type it stores
//! the attacking types with a non-neutral multiplier. Multiple defending
//! types multiply their individual factors.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An elemental type carried by species and moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElemType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// Type-effectiveness lookup table.
///
/// ```
/// use rust_arena::data::{ElemType, TypeChart};
///
/// let chart = TypeChart::standard();
/// assert_eq!(chart.multiplier(ElemType::Water, &[ElemType::Fire]), 2.0);
/// assert_eq!(chart.multiplier(ElemType::Normal, &[ElemType::Ghost]), 0.0);
/// assert_eq!(chart.multiplier(ElemType::Grass, &[ElemType::Fire, ElemType::Flying]), 0.25);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeChart {
    /// defending type -> attacking type -> multiplier.
    chart: FxHashMap<ElemType, FxHashMap<ElemType, f64>>,
}

impl TypeChart {
    /// Create an empty chart where everything is neutral.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multiplier for an attacking type against a defending type.
    pub fn set(&mut self, defending: ElemType, attacking: ElemType, multiplier: f64) {
        self.chart
            .entry(defending)
            .or_default()
            .insert(attacking, multiplier);
    }

    /// Effectiveness of an attacking type against one defending type.
    #[must_use]
    pub fn single(&self, attacking: ElemType, defending: ElemType) -> f64 {
        self.chart
            .get(&defending)
            .and_then(|row| row.get(&attacking))
            .copied()
            .unwrap_or(1.0)
    }

    /// Effectiveness product across all of a defender's types.
    #[must_use]
    pub fn multiplier(&self, attacking: ElemType, defending: &[ElemType]) -> f64 {
        defending
            .iter()
            .map(|&d| self.single(attacking, d))
            .product()
    }

    /// The standard 18-type chart.
    #[must_use]
    pub fn standard() -> Self {
        use ElemType::*;

        let mut chart = Self::new();
        // (attacker, super-effective targets, resisted targets, immune targets)
        let rows: &[(ElemType, &[ElemType], &[ElemType], &[ElemType])] = &[
            (Normal, &[], &[Rock, Steel], &[Ghost]),
            (Fire, &[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
            (Water, &[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
            (
                Grass,
                &[Water, Ground, Rock],
                &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
                &[],
            ),
            (Electric, &[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
            (Ice, &[Grass, Ground, Flying, Dragon], &[Fire, Water, Ice, Steel], &[]),
            (
                Fighting,
                &[Normal, Ice, Rock, Dark, Steel],
                &[Poison, Flying, Psychic, Bug, Fairy],
                &[Ghost],
            ),
            (Poison, &[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
            (
                Ground,
                &[Fire, Electric, Poison, Rock, Steel],
                &[Grass, Bug],
                &[Flying],
            ),
            (Flying, &[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
            (Psychic, &[Fighting, Poison], &[Psychic, Steel], &[Dark]),
            (
                Bug,
                &[Grass, Psychic, Dark],
                &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
                &[],
            ),
            (Rock, &[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
            (Ghost, &[Psychic, Ghost], &[Dark], &[Normal]),
            (Dragon, &[Dragon], &[Steel], &[Fairy]),
            (Dark, &[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
            (Steel, &[Ice, Rock, Fairy], &[Fire, Water, Electric, Steel], &[]),
            (Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
        ];

        for &(attacker, strong, weak, immune) in rows {
            for &t in strong {
                chart.set(t, attacker, 2.0);
            }
            for &t in weak {
                chart.set(t, attacker, 0.5);
            }
            for &t in immune {
                chart.set(t, attacker, 0.0);
            }
        }

        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElemType::*;

    #[test]
    fn test_neutral_default() {
        let chart = TypeChart::new();
        assert_eq!(chart.multiplier(Fire, &[Water]), 1.0);
    }

    #[test]
    fn test_standard_super_effective() {
        let chart = TypeChart::standard();
        assert_eq!(chart.multiplier(Water, &[Fire]), 2.0);
        assert_eq!(chart.multiplier(Electric, &[Water, Flying]), 4.0);
    }

    #[test]
    fn test_standard_resisted() {
        let chart = TypeChart::standard();
        assert_eq!(chart.multiplier(Fire, &[Water]), 0.5);
        assert_eq!(chart.multiplier(Grass, &[Fire, Flying]), 0.25);
    }

    #[test]
    fn test_standard_immunity() {
        let chart = TypeChart::standard();
        assert_eq!(chart.multiplier(Normal, &[Ghost]), 0.0);
        assert_eq!(chart.multiplier(Ground, &[Flying]), 0.0);
        // Immunity dominates any second type.
        assert_eq!(chart.multiplier(Electric, &[Ground, Water]), 0.0);
    }

    #[test]
    fn test_set_overrides() {
        let mut chart = TypeChart::new();
        chart.set(Fire, Water, 2.0);
        chart.set(Fire, Water, 0.5);
        assert_eq!(chart.multiplier(Water, &[Fire]), 0.5);
    }

    #[test]
    fn test_serde_round_trip() {
        let chart = TypeChart::standard();
        let json = serde_json::to_string(&chart).unwrap();
        let back: TypeChart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.multiplier(Water, &[Fire]), 2.0);
    }
}
