//! Uniformly random baseline agent.

use crate::core::BattleRng;
use crate::engine::BattleView;

use super::{Action, Agent};

/// Picks between switching and attacking with a coin flip, then picks
/// uniformly within the chosen kind. Useful as a sanity baseline and
/// for stress-testing the engine.
pub struct RandomAgent {
    rng: BattleRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: BattleRng::new(seed) }
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, view: &BattleView<'_>) -> Action {
        let bench = view.living_bench();
        if !bench.is_empty() && self.rng.coin_flip() {
            Action::Switch(bench[self.rng.gen_range_usize(0..bench.len())])
        } else {
            let moves = view.active.moves.len();
            Action::Attack(self.rng.gen_range_usize(0..moves))
        }
    }

    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize {
        let bench = view.living_bench();
        bench[self.rng.gen_range_usize(0..bench.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BattleState;
    use crate::core::SideId;
    use crate::sample;

    #[test]
    fn test_actions_are_always_legal() {
        let catalogs = sample::catalogs();
        let state = BattleState::new(
            vec![
                sample::monster("slugger", &catalogs),
                sample::monster("cindercub", &catalogs),
            ],
            vec![sample::monster("riptide", &catalogs)],
        )
        .unwrap();
        let view = BattleView::of(&state, SideId::A);

        let mut agent = RandomAgent::new(9);
        for _ in 0..200 {
            match agent.choose_action(&view) {
                Action::Attack(i) => assert!(i < view.active.moves.len()),
                Action::Switch(i) => assert!(view.living_bench().contains(&i)),
            }
        }
    }

    #[test]
    fn test_no_switch_without_bench() {
        let catalogs = sample::catalogs();
        let state = BattleState::new(
            vec![sample::monster("slugger", &catalogs)],
            vec![sample::monster("riptide", &catalogs)],
        )
        .unwrap();
        let view = BattleView::of(&state, SideId::A);

        let mut agent = RandomAgent::new(9);
        for _ in 0..100 {
            assert!(matches!(agent.choose_action(&view), Action::Attack(_)));
        }
    }
}
