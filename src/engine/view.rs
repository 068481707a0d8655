//! Per-side views of the battle.
//!
//! Agents never see the raw [`BattleState`]: their own side is exposed
//! in full, the opponent only through what a player could legitimately
//! observe. Hidden EVs, natures, and exact HP totals stay hidden; HP is
//! a percentage, investment must be inferred.

use crate::core::SideId;
use crate::data::SpeciesId;
use crate::monster::{Monster, Status};

use super::state::BattleState;

/// What a side can see of one opposing team member: its species and
/// how full its HP bar is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpponentMember {
    pub species: SpeciesId,
    /// Remaining HP as a fraction of maximum, in [0, 1].
    pub fraction_hp: f64,
}

/// What a side knows about the opposing team.
#[derive(Clone, Debug, PartialEq)]
pub struct OpponentView {
    pub species: SpeciesId,
    /// Remaining HP of the active member as a fraction of maximum.
    pub fraction_hp: f64,
    pub status: Option<Status>,
    /// Boost stages ordered as [`crate::monster::StatKey::BOOSTABLE`].
    pub boosts: [i8; 5],
    /// Names of visible volatile conditions.
    pub volatiles: Vec<String>,
    /// Every opposing team member in seating order, the active slot
    /// included.
    pub members: Vec<OpponentMember>,
    /// Index of the active member within `members`.
    pub active_member: usize,
    /// How many opposing team members are still standing.
    pub living_count: usize,
}

impl OpponentView {
    /// How many opposing members could be switched in right now.
    #[must_use]
    pub fn living_bench_count(&self) -> usize {
        self.members
            .iter()
            .enumerate()
            .filter(|&(i, m)| i != self.active_member && m.fraction_hp > 0.0)
            .count()
    }
}

/// Everything one side may act on for a single decision.
#[derive(Debug)]
pub struct BattleView<'a> {
    pub side: SideId,
    pub turn: u32,
    /// This side's active monster, fully visible.
    pub active: &'a Monster,
    /// This side's full team, including the active slot.
    pub team: &'a [Monster],
    pub active_index: usize,
    pub opponent: OpponentView,
}

impl<'a> BattleView<'a> {
    /// Build the view for one side of a battle state.
    #[must_use]
    pub fn of(state: &'a BattleState, side: SideId) -> Self {
        let own = state.side(side);
        let opp = state.side(side.opponent());
        let opp_active = opp.active();

        let mut boosts = [0; 5];
        for (i, &stat) in crate::monster::StatKey::BOOSTABLE.iter().enumerate() {
            boosts[i] = opp_active.boost(stat);
        }

        Self {
            side,
            turn: state.turn,
            active: own.active(),
            team: own.team(),
            active_index: own.active_index(),
            opponent: OpponentView {
                species: opp_active.species,
                fraction_hp: opp_active.fraction_hp(),
                status: opp_active.status,
                boosts,
                volatiles: opp_active.volatile_names().map(str::to_owned).collect(),
                members: opp
                    .team()
                    .iter()
                    .map(|m| OpponentMember { species: m.species, fraction_hp: m.fraction_hp() })
                    .collect(),
                active_member: opp.active_index(),
                living_count: opp.team().iter().filter(|m| !m.is_fainted()).count(),
            },
        }
    }

    /// Team indices this side could switch to right now.
    #[must_use]
    pub fn living_bench(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|&(i, m)| i != self.active_index && !m.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::monster::StatKey;

    fn state() -> BattleState {
        let catalogs = sample::catalogs();
        BattleState::new(
            vec![
                sample::monster("slugger", &catalogs),
                sample::monster("cindercub", &catalogs),
            ],
            vec![sample::monster("riptide", &catalogs)],
        )
        .unwrap()
    }

    #[test]
    fn test_own_side_fully_visible() {
        let state = state();
        let view = BattleView::of(&state, SideId::A);

        assert_eq!(view.team.len(), 2);
        assert_eq!(view.active.species, view.team[0].species);
        assert_eq!(view.living_bench(), vec![1]);
    }

    #[test]
    fn test_opponent_anonymized_to_observables() {
        let mut state = state();
        let opp = state.side_mut(SideId::B).active_mut();
        opp.apply_boost(StatKey::Atk, 2);
        let half = opp.max_hp() / 2;
        opp.take_damage(half);

        let view = BattleView::of(&state, SideId::A);
        assert_eq!(view.opponent.boosts[0], 2);
        assert!((view.opponent.fraction_hp - 0.5).abs() < 0.01);
        assert_eq!(view.opponent.living_count, 1);
    }

    #[test]
    fn test_opponent_bench_shows_percent_hp() {
        let catalogs = sample::catalogs();
        let mut hurt = sample::monster("cindercub", &catalogs);
        let half = hurt.max_hp() / 2;
        hurt.take_damage(half);
        let state = BattleState::new(
            vec![sample::monster("slugger", &catalogs)],
            vec![sample::monster("riptide", &catalogs), hurt],
        )
        .unwrap();

        let view = BattleView::of(&state, SideId::A);
        assert_eq!(view.opponent.members.len(), 2);
        assert_eq!(view.opponent.active_member, 0);
        assert!((view.opponent.members[1].fraction_hp - 0.5).abs() < 0.01);
        assert_eq!(view.opponent.living_bench_count(), 1);
    }
}
