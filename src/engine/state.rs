//! Battle state: two sides, their teams, and the event log.

use serde::{Deserialize, Serialize};

use crate::core::{SideId, TeamError};
use crate::monster::Monster;

use super::events::TurnEvent;

/// One side's team. The active member is an index into the team, so
/// fainted members keep their slot and switch targets are stable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SideState {
    team: Vec<Monster>,
    active: usize,
}

impl SideState {
    /// Build a side from a team, sending out the first member.
    pub fn new(team: Vec<Monster>) -> Result<Self, TeamError> {
        if team.is_empty() {
            return Err(TeamError::EmptyTeam);
        }
        Ok(Self { team, active: 0 })
    }

    #[must_use]
    pub fn active(&self) -> &Monster {
        &self.team[self.active]
    }

    #[must_use]
    pub fn active_mut(&mut self) -> &mut Monster {
        &mut self.team[self.active]
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn team(&self) -> &[Monster] {
        &self.team
    }

    /// Team indices that could be switched to: alive and not active.
    #[must_use]
    pub fn living_bench(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|&(i, m)| i != self.active && !m.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether any team member is still standing.
    #[must_use]
    pub fn has_living(&self) -> bool {
        self.team.iter().any(|m| !m.is_fainted())
    }

    /// Bring a benched member in, resetting its per-tenure state.
    ///
    /// Panics on an invalid target: out of range, fainted, or already
    /// active. Action validation happens before resolution, so reaching
    /// this with a bad index is a bug in the caller.
    pub fn switch_to(&mut self, index: usize) {
        assert!(index < self.team.len(), "switch target out of range");
        assert!(index != self.active, "switch target already active");
        assert!(!self.team[index].is_fainted(), "switch target has fainted");
        self.active = index;
        self.team[index].reset_on_entry();
    }
}

/// Full battle state. Agents never see this directly; they get
/// per-side views with the opponent anonymized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleState {
    pub turn: u32,
    pub sides: [SideState; 2],
    pub events: Vec<TurnEvent>,
}

impl BattleState {
    pub fn new(team_a: Vec<Monster>, team_b: Vec<Monster>) -> Result<Self, TeamError> {
        Ok(Self {
            turn: 0,
            sides: [SideState::new(team_a)?, SideState::new(team_b)?],
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn side(&self, id: SideId) -> &SideState {
        &self.sides[id.index()]
    }

    #[must_use]
    pub fn side_mut(&mut self, id: SideId) -> &mut SideState {
        &mut self.sides[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn test_empty_team_rejected() {
        let catalogs = sample::catalogs();
        let team = vec![sample::monster("slugger", &catalogs)];
        assert!(matches!(
            BattleState::new(Vec::new(), team),
            Err(TeamError::EmptyTeam)
        ));
    }

    #[test]
    fn test_living_bench_excludes_active_and_fainted() {
        let catalogs = sample::catalogs();
        let mut side = SideState::new(vec![
            sample::monster("slugger", &catalogs),
            sample::monster("cindercub", &catalogs),
            sample::monster("sproutling", &catalogs),
        ])
        .unwrap();

        assert_eq!(side.living_bench(), vec![1, 2]);

        side.team[2].current_hp = 0;
        assert_eq!(side.living_bench(), vec![1]);

        side.switch_to(1);
        assert_eq!(side.living_bench(), vec![0]);
    }

    #[test]
    #[should_panic(expected = "fainted")]
    fn test_switch_to_fainted_panics() {
        let catalogs = sample::catalogs();
        let mut side = SideState::new(vec![
            sample::monster("slugger", &catalogs),
            sample::monster("cindercub", &catalogs),
        ])
        .unwrap();
        side.team[1].current_hp = 0;
        side.switch_to(1);
    }

    #[test]
    fn test_switch_resets_entry_state() {
        let catalogs = sample::catalogs();
        let mut side = SideState::new(vec![
            sample::monster("slugger", &catalogs),
            sample::monster("cindercub", &catalogs),
        ])
        .unwrap();

        side.team[1].apply_boost(crate::monster::StatKey::Atk, 2);
        side.switch_to(1);
        assert_eq!(side.active().boost(crate::monster::StatKey::Atk), 0);
    }
}
