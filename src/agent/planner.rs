//! Expectation-maximizing planning agent.
//!
//! The planner scores every legal action against every plausible
//! opponent response one turn ahead. Opponent damage is estimated
//! through the range estimator over the surviving belief candidates,
//! opponent speed through the belief interval midpoint, and hit/miss
//! branches are weighted by accuracy. The action with the best average
//! resulting position wins; ties keep the first action enumerated.

use tracing::{debug, warn};

use crate::core::SideId;
use crate::damage::{RangeCombatant, RangeEstimator, RangeParams, StatProfile};
use crate::data::{Catalogs, Category, MoveDef, MoveId};
use crate::engine::{BattleView, EventKind, TurnEvent};
use crate::inference::BeliefStore;
use crate::monster::{boost_factor, Monster, StatKey, Status};

use super::{Action, Agent};

/// How many opponent moves to consider; unseen slots are backfilled
/// from the usage table.
const MODELED_MOVES: usize = 4;

/// What the opponent is modeled as doing this turn.
#[derive(Clone, Copy, Debug)]
enum OppAction {
    Move(MoveId),
    /// A switch is modeled as a turn the opponent deals no damage.
    Switch,
}

/// One-turn-lookahead planner with investment inference.
pub struct PlanningAgent<'c> {
    catalogs: &'c Catalogs,
    beliefs: BeliefStore<'c>,
    estimator: RangeEstimator,
}

impl<'c> PlanningAgent<'c> {
    #[must_use]
    pub fn new(catalogs: &'c Catalogs) -> Self {
        Self {
            catalogs,
            beliefs: BeliefStore::new(catalogs),
            estimator: RangeEstimator::new(),
        }
    }

    /// Read access to the maintained beliefs, mainly for inspection.
    #[must_use]
    pub fn beliefs(&self) -> &BeliefStore<'c> {
        &self.beliefs
    }

    fn own_actions(view: &BattleView<'_>) -> Vec<Action> {
        let mut actions: Vec<Action> = (0..view.active.moves.len()).map(Action::Attack).collect();
        actions.extend(view.living_bench().into_iter().map(Action::Switch));
        actions
    }

    /// The opponent's modeled action set: moves it has shown, padded
    /// from the usage table, plus a switch when it has a bench.
    fn opponent_actions(&self, view: &BattleView<'_>) -> Vec<OppAction> {
        let species = view.opponent.species;
        let mut moves: Vec<MoveId> = self.beliefs.known_moves(species).to_vec();
        self.catalogs.usage.backfill(species, &mut moves, MODELED_MOVES);

        let mut actions: Vec<OppAction> = moves.into_iter().map(OppAction::Move).collect();
        // One switch option per member they could actually bring in.
        for _ in 0..view.opponent.living_bench_count() {
            actions.push(OppAction::Switch);
        }
        if actions.is_empty() {
            // Nothing observed and nothing ranked: model a pass.
            actions.push(OppAction::Switch);
        }
        actions
    }

    /// Expected percent damage one of our monsters deals to the
    /// opponent's active with `mv`: the mean of range midpoints over
    /// the surviving defense and HP candidates.
    fn expected_damage_to_opponent(&self, mv: &MoveDef, own: &Monster, view: &BattleView<'_>) -> f64 {
        if !mv.is_damaging() {
            return 0.0;
        }
        if mv.ohko {
            return view.opponent.fraction_hp * 100.0;
        }

        let def_stat = if mv.category == Category::Physical {
            StatKey::Def
        } else {
            StatKey::Spd
        };
        let atk_stat = if def_stat == StatKey::Def { StatKey::Atk } else { StatKey::Spa };

        let attacker =
            RangeCombatant::from_monster(self.catalogs.species.get_unchecked(own.species), own);
        let defender = RangeCombatant::with_boosts(
            self.catalogs.species.get_unchecked(view.opponent.species),
            view.opponent.boosts,
        );

        let belief = self.beliefs.belief(view.opponent.species).expect("belief seeded");
        let atk_profile = known_profile(own, atk_stat);

        let mut total = 0.0;
        let mut count = 0u32;
        for &def_profile in belief.candidates(def_stat) {
            for &hp_max_evs in &belief.hp {
                let params = RangeParams { atk: atk_profile, def: def_profile, hp_max_evs };
                let (min, max) = self.estimator.calculate_range(
                    mv,
                    &attacker,
                    &defender,
                    &params,
                    &self.catalogs.type_chart,
                );
                total += f64::from(min + max) / 2.0;
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        total / f64::from(count)
    }

    /// Expected percent damage the opponent's active deals to `target`
    /// with `mv`, averaged over surviving offense candidates.
    fn expected_damage_from_opponent(
        &self,
        mv: &MoveDef,
        target: &Monster,
        view: &BattleView<'_>,
    ) -> f64 {
        if !mv.is_damaging() || mv.ohko {
            // Modeling a one-hit gamble as its full bar would dominate
            // every projection; treat it as zero expected pressure and
            // let accuracy weighting handle real damage moves.
            return 0.0;
        }

        let atk_stat = if mv.category == Category::Physical {
            StatKey::Atk
        } else {
            StatKey::Spa
        };
        let def_stat = if atk_stat == StatKey::Atk { StatKey::Def } else { StatKey::Spd };

        let attacker = RangeCombatant::with_boosts(
            self.catalogs.species.get_unchecked(view.opponent.species),
            view.opponent.boosts,
        )
        .burned(view.opponent.status == Some(Status::Burn));
        let defender =
            RangeCombatant::from_monster(self.catalogs.species.get_unchecked(target.species), target);

        let belief = self.beliefs.belief(view.opponent.species).expect("belief seeded");
        let def_profile = known_profile(target, def_stat);
        let hp_max_evs = target.evs.hp > 124;

        let candidates = belief.candidates(atk_stat);
        let mut total = 0.0;
        for &atk_profile in candidates {
            let params = RangeParams { atk: atk_profile, def: def_profile, hp_max_evs };
            let (min, max) = self.estimator.calculate_range(
                mv,
                &attacker,
                &defender,
                &params,
                &self.catalogs.type_chart,
            );
            total += f64::from(min + max) / 2.0;
        }
        total / candidates.len() as f64
    }

    /// The opponent's projected effective speed: belief midpoint with
    /// visible boost and paralysis applied.
    fn opponent_speed(&self, view: &BattleView<'_>) -> f64 {
        let belief = self.beliefs.belief(view.opponent.species).expect("belief seeded");
        let mut speed = belief.speed_midpoint() * boost_factor(view.opponent.boosts[4]);
        if view.opponent.status == Some(Status::Paralysis) {
            speed *= 0.5;
        }
        speed
    }

    /// Expected position score of taking `action` while the opponent
    /// takes `opp_action`.
    fn evaluate(&self, view: &BattleView<'_>, action: Action, opp_action: OppAction) -> f64 {
        // The monster that ends the turn in front takes the hit.
        let (receiver_index, receiver) = match action {
            Action::Switch(index) => (index, &view.team[index]),
            Action::Attack(_) => (view.active_index, view.active),
        };
        let own_mv = match action {
            Action::Attack(index) => {
                Some(self.catalogs.moves.get_unchecked(view.active.moves[index]))
            }
            Action::Switch(_) => None,
        };
        let opp_mv = match opp_action {
            OppAction::Move(id) => Some(self.catalogs.moves.get_unchecked(id)),
            OppAction::Switch => None,
        };

        let we_first = match (own_mv, opp_mv) {
            // A switch always eats the opponent's attack.
            (None, _) => false,
            (Some(_), None) => true,
            (Some(own), Some(opp)) => {
                if own.priority != opp.priority {
                    own.priority > opp.priority
                } else {
                    f64::from(view.active.effective_stat(StatKey::Spe)) >= self.opponent_speed(view)
                }
            }
        };

        let damage_out = own_mv.map_or(0.0, |mv| self.expected_damage_to_opponent(mv, view.active, view));
        let heal_pct = own_mv.and_then(|mv| mv.heal).map_or(0.0, |f| f * 100.0);
        let damage_in = opp_mv.map_or(0.0, |mv| self.expected_damage_from_opponent(mv, receiver, view));

        let own_hit_p = own_mv.map_or(1.0, |mv| mv.accuracy.hit_probability());
        let opp_hit_p = opp_mv.map_or(1.0, |mv| mv.accuracy.hit_probability());

        let opp_start = view.opponent.fraction_hp * 100.0;
        let own_start = receiver.fraction_hp() * 100.0;
        let own_rest: f64 = view
            .team
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != receiver_index)
            .map(|(_, m)| m.fraction_hp() * 100.0)
            .sum();
        let opp_rest: f64 = view
            .opponent
            .members
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != view.opponent.active_member)
            .map(|(_, m)| m.fraction_hp * 100.0)
            .sum();

        let mut expected = 0.0;
        for (own_hits, weight_own) in [(true, own_hit_p), (false, 1.0 - own_hit_p)] {
            if weight_own == 0.0 {
                continue;
            }
            for (opp_hits, weight_opp) in [(true, opp_hit_p), (false, 1.0 - opp_hit_p)] {
                if weight_opp == 0.0 {
                    continue;
                }

                let mut own_pct = own_start;
                let mut opp_pct = opp_start;
                if we_first {
                    if own_hits {
                        opp_pct -= damage_out;
                        own_pct = (own_pct + heal_pct).min(100.0);
                    }
                    // A downed opponent never gets its attack off.
                    if opp_pct > 0.0 && opp_hits {
                        own_pct -= damage_in;
                    }
                } else {
                    if opp_hits {
                        own_pct -= damage_in;
                    }
                    if own_pct > 0.0 && own_hits {
                        opp_pct -= damage_out;
                        own_pct = (own_pct + heal_pct).min(100.0);
                    }
                }

                let score = position_score(
                    own_rest + own_pct.max(0.0),
                    opp_rest + opp_pct.max(0.0),
                );
                expected += weight_own * weight_opp * score;
            }
        }
        expected
    }

    /// Update beliefs from one turn's events.
    fn infer_from_events(&mut self, view: &BattleView<'_>, events: &[TurnEvent]) {
        let me = view.side;
        let opp = me.opponent();

        for event in events {
            let EventKind::Attack { mv, target, damage, pct_damage, hit } = &event.kind else {
                continue;
            };
            if !hit {
                continue;
            }
            if event.side == opp {
                self.beliefs.record_move(event.species, *mv);
                if *damage > 0 {
                    if let Some(victim) = view.team.iter().find(|m| m.species == *target) {
                        if let Err(err) =
                            self.beliefs.narrow_offense(event.species, *mv, victim, *pct_damage)
                        {
                            warn!(%err, "offense inference contradiction");
                        }
                    }
                }
            } else if *damage > 0 {
                if let Some(attacker) = view.team.iter().find(|m| m.species == event.species) {
                    if let Err(err) =
                        self.beliefs.narrow_defense(*target, *mv, attacker, *pct_damage)
                    {
                        warn!(%err, "defense inference contradiction");
                    }
                }
            }
        }

        self.infer_speed(view, events, me, opp);
    }

    /// When both sides attacked at equal priority, the event order
    /// reveals who was faster.
    fn infer_speed(&mut self, view: &BattleView<'_>, events: &[TurnEvent], me: SideId, opp: SideId) {
        let own_pos = events
            .iter()
            .position(|e| e.side == me && matches!(e.kind, EventKind::Attack { .. }));
        let opp_pos = events
            .iter()
            .position(|e| e.side == opp && matches!(e.kind, EventKind::Attack { .. }));
        let (Some(own_pos), Some(opp_pos)) = (own_pos, opp_pos) else {
            return;
        };

        let priority_of = |event: &TurnEvent| match &event.kind {
            EventKind::Attack { mv, .. } => self.catalogs.moves.get_unchecked(*mv).priority,
            _ => unreachable!(),
        };
        if priority_of(&events[own_pos]) != priority_of(&events[opp_pos]) {
            return;
        }

        let own_species = events[own_pos].species;
        let Some(own_monster) = view.team.iter().find(|m| m.species == own_species) else {
            return;
        };
        let own_speed = own_monster.effective_stat(StatKey::Spe);
        self.beliefs
            .narrow_speed(events[opp_pos].species, own_speed, own_pos < opp_pos);
    }
}

impl Agent for PlanningAgent<'_> {
    fn choose_action(&mut self, view: &BattleView<'_>) -> Action {
        self.beliefs.observe_species(view.opponent.species);
        let opp_actions = self.opponent_actions(view);

        let mut best: Option<(Action, f64)> = None;
        for action in Self::own_actions(view) {
            let total: f64 = opp_actions
                .iter()
                .map(|&opp| self.evaluate(view, action, opp))
                .sum();
            let score = total / opp_actions.len() as f64;
            if best.is_none() || score > best.expect("just checked").1 {
                best = Some((action, score));
            }
        }

        let (action, score) = best.expect("a side always has at least one move");
        debug!(?action, score, turn = view.turn, "planned action");
        action
    }

    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize {
        self.beliefs.observe_species(view.opponent.species);

        // Send out whoever projects the most damage into the current
        // opponent with its best move.
        let mut best: Option<(usize, f64)> = None;
        for index in view.living_bench() {
            let member = &view.team[index];
            let score = member
                .moves
                .iter()
                .map(|&mv| {
                    self.expected_damage_to_opponent(
                        self.catalogs.moves.get_unchecked(mv),
                        member,
                        view,
                    )
                })
                .fold(0.0, f64::max);
            if best.is_none() || score > best.expect("just checked").1 {
                best = Some((index, score));
            }
        }
        best.expect("replacement requested with an empty bench").0
    }

    fn observe_turn(&mut self, view: &BattleView<'_>, events: &[TurnEvent]) {
        self.beliefs.observe_species(view.opponent.species);
        self.infer_from_events(view, events);
    }
}

/// Position metric: own total percent HP against the opponent's, each
/// padded so an empty side still scores finitely.
fn position_score(own_total_pct: f64, opp_total_pct: f64) -> f64 {
    (own_total_pct + 0.01) / (opp_total_pct + 0.01)
}

/// Investment profile of a monster whose build is fully known.
fn known_profile(monster: &Monster, stat: StatKey) -> StatProfile {
    StatProfile::new(
        monster.evs.get(stat) > 124,
        monster.nature.increased() == Some(stat),
    )
}
