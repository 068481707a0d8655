//! The battle engine: action collection, turn resolution, win checks.

use tracing::{debug, trace};

use crate::agent::{Action, Agent};
use crate::core::{BattleRng, SideId, TeamError};
use crate::damage::{calculate_damage, DamageMode};
use crate::data::{Accuracy, BoostSpec, BoostTarget, Catalogs, ElemType, MoveDef, MoveId};
use crate::monster::{Monster, StatKey, Status, VolatileData};

use super::events::{EventKind, Outcome, TurnEvent};
use super::state::BattleState;
use super::view::BattleView;

/// Turn ceiling after which an unresolved battle is scored a draw.
pub const DEFAULT_TURN_LIMIT: u32 = 500;

/// Number of extra turns a committing move locks its user in for.
const LOCKED_MOVE_TURNS: u32 = 2;

/// A single battle between two teams.
///
/// The engine owns all mutation: agents submit actions and observe
/// events, but never touch state. All randomness flows through one
/// seeded [`BattleRng`], so a battle replays identically given the same
/// seed and agent decisions.
pub struct BattleEngine<'c> {
    catalogs: &'c Catalogs,
    rng: BattleRng,
    state: BattleState,
    turn_limit: u32,
}

impl<'c> BattleEngine<'c> {
    /// Seat two teams and send out each side's first member.
    pub fn new(
        catalogs: &'c Catalogs,
        team_a: Vec<Monster>,
        team_b: Vec<Monster>,
        seed: u64,
    ) -> Result<Self, TeamError> {
        Ok(Self {
            catalogs,
            rng: BattleRng::new(seed),
            state: BattleState::new(team_a, team_b)?,
            turn_limit: DEFAULT_TURN_LIMIT,
        })
    }

    #[must_use]
    pub fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// The anonymized view one side decides from.
    #[must_use]
    pub fn view(&self, side: SideId) -> BattleView<'_> {
        BattleView::of(&self.state, side)
    }

    /// Terminal check. A side with no living members loses; both sides
    /// empty, or the turn ceiling, is a draw.
    #[must_use]
    pub fn win_condition(&self) -> Option<Outcome> {
        let a = self.state.side(SideId::A).has_living();
        let b = self.state.side(SideId::B).has_living();
        let outcome = match (a, b) {
            (true, true) => {
                if self.state.turn > self.turn_limit {
                    Outcome { winner: None, turns: self.state.turn }
                } else {
                    return None;
                }
            }
            (true, false) => Outcome { winner: Some(SideId::A), turns: self.state.turn },
            (false, true) => Outcome { winner: Some(SideId::B), turns: self.state.turn },
            (false, false) => Outcome { winner: None, turns: self.state.turn },
        };
        Some(outcome)
    }

    /// Run the battle to completion, returning the outcome.
    pub fn run(&mut self, agent_a: &mut dyn Agent, agent_b: &mut dyn Agent) -> Outcome {
        loop {
            if let Some(outcome) = self.win_condition() {
                debug!(winner = ?outcome.winner, turns = outcome.turns, "battle finished");
                return outcome;
            }
            self.run_single_turn(agent_a, agent_b);
        }
    }

    /// Resolve one full turn: collect actions, resolve switches then
    /// attacks, apply end-of-turn status damage, check the win
    /// condition, and only then request replacements.
    ///
    /// Returns the events of this turn; both agents observe them.
    pub fn run_single_turn(
        &mut self,
        agent_a: &mut dyn Agent,
        agent_b: &mut dyn Agent,
    ) -> Vec<TurnEvent> {
        if self.win_condition().is_some() {
            return Vec::new();
        }

        self.state.turn += 1;
        let start = self.state.events.len();
        trace!(turn = self.state.turn, "turn start");

        let action_a = self.decide(SideId::A, agent_a);
        let action_b = self.decide(SideId::B, agent_b);

        // Switches always resolve before any attack.
        for (side, action) in [(SideId::A, action_a), (SideId::B, action_b)] {
            if let Action::Switch(index) = action {
                self.resolve_switch(side, index);
            }
        }

        let mv_a = self.attack_choice(SideId::A, action_a);
        let mv_b = self.attack_choice(SideId::B, action_b);
        let order: Vec<(SideId, MoveId)> = match (mv_a, mv_b) {
            (Some(a), Some(b)) => {
                let [first, second] = self.attack_order(a, b);
                let pick = |s: SideId| if s == SideId::A { a } else { b };
                vec![(first, pick(first)), (second, pick(second))]
            }
            (Some(a), None) => vec![(SideId::A, a)],
            (None, Some(b)) => vec![(SideId::B, b)],
            (None, None) => Vec::new(),
        };

        for (side, mv) in order {
            let attacker_standing = !self.state.side(side).active().is_fainted();
            let defender_standing = !self.state.side(side.opponent()).active().is_fainted();
            if attacker_standing && defender_standing {
                self.resolve_attack(side, mv);
            }
        }

        self.end_of_turn();

        // The win check precedes replacement: a side with nothing left
        // to send out is never asked for one.
        if self.win_condition().is_none() {
            self.replace_if_fainted(SideId::A, agent_a);
            self.replace_if_fainted(SideId::B, agent_b);
        }

        let events = self.state.events[start..].to_vec();
        agent_a.observe_turn(&BattleView::of(&self.state, SideId::A), &events);
        agent_b.observe_turn(&BattleView::of(&self.state, SideId::B), &events);
        events
    }

    fn replace_if_fainted(&mut self, side: SideId, agent: &mut dyn Agent) {
        if !self.state.side(side).active().is_fainted() {
            return;
        }
        let view = BattleView::of(&self.state, side);
        let index = agent.choose_replacement(&view);
        self.state.side_mut(side).switch_to(index);
        let member = self.state.side(side).active().species;
        self.push_event(side, EventKind::Replacement { member });
    }

    /// Ask the agent for an action, enforcing move locks and validating
    /// the result.
    fn decide(&mut self, side: SideId, agent: &mut dyn Agent) -> Action {
        // A lock that has run its course releases before the choice.
        let locked = match self.state.side(side).active().volatile("lockedmove") {
            Some(&VolatileData::LockedMove { mv, turns }) => {
                if turns >= LOCKED_MOVE_TURNS {
                    self.state.side_mut(side).active_mut().remove_volatile("lockedmove");
                    None
                } else {
                    Some(mv)
                }
            }
            _ => None,
        };
        if let Some(mv) = locked {
            let active = self.state.side(side).active();
            let index = active
                .moves
                .iter()
                .position(|&m| m == mv)
                .expect("locked move missing from move list");
            return Action::Attack(index);
        }

        let action = agent.choose_action(&BattleView::of(&self.state, side));
        match action {
            Action::Attack(index) => {
                assert!(
                    index < self.state.side(side).active().moves.len(),
                    "attack index out of range"
                );
            }
            Action::Switch(_) => {
                // switch_to asserts the target itself.
            }
        }
        action
    }

    /// The move id an attack action resolves to, if the action attacks.
    fn attack_choice(&self, side: SideId, action: Action) -> Option<MoveId> {
        match action {
            Action::Attack(index) => Some(self.state.side(side).active().moves[index]),
            Action::Switch(_) => None,
        }
    }

    fn resolve_switch(&mut self, side: SideId, index: usize) {
        self.state.side_mut(side).switch_to(index);
        let member = self.state.side(side).active().species;
        trace!(%side, ?member, "switch");
        self.push_event(side, EventKind::Switch { member });
    }

    /// Order two simultaneous attacks: higher priority first, then
    /// higher effective speed, then a coin flip.
    fn attack_order(&mut self, mv_a: MoveId, mv_b: MoveId) -> [SideId; 2] {
        let pri_a = self.catalogs.moves.get_unchecked(mv_a).priority;
        let pri_b = self.catalogs.moves.get_unchecked(mv_b).priority;
        if pri_a != pri_b {
            return if pri_a > pri_b {
                [SideId::A, SideId::B]
            } else {
                [SideId::B, SideId::A]
            };
        }

        let spe_a = self.state.side(SideId::A).active().effective_stat(StatKey::Spe);
        let spe_b = self.state.side(SideId::B).active().effective_stat(StatKey::Spe);
        if spe_a != spe_b {
            return if spe_a > spe_b {
                [SideId::A, SideId::B]
            } else {
                [SideId::B, SideId::A]
            };
        }

        if self.rng.coin_flip() {
            [SideId::A, SideId::B]
        } else {
            [SideId::B, SideId::A]
        }
    }

    /// Resolve one attack end to end: status prevention, accuracy,
    /// then capability blocks in fixed order (damage, OHKO override,
    /// heal, boosts, volatile, secondary).
    fn resolve_attack(&mut self, side: SideId, mv_id: MoveId) {
        let mv = self.catalogs.moves.get_unchecked(mv_id);
        let defender_side = side.opponent();

        // Counters on the attacker advance whether or not the move
        // lands.
        self.state.side_mut(side).active_mut().tick_volatile_counters();

        if let Some(status) = Self::immobilized(
            self.state.side_mut(side).active_mut(),
            mv,
            &mut self.rng,
        ) {
            trace!(%side, ?status, "immobilized");
            self.push_event(side, EventKind::Immobilized { status });
            return;
        }

        let hit = match mv.accuracy {
            Accuracy::Always => true,
            Accuracy::Percent(percent) => self.rng.percent_roll(percent),
        };
        let target = self.state.side(defender_side).active().species;
        if !hit {
            trace!(%side, mv = %mv.name, "missed");
            self.push_event(
                side,
                EventKind::Attack { mv: mv_id, target, damage: 0, pct_damage: 0.0, hit: false },
            );
            return;
        }

        // A type-immune target blanks the whole move, riders included.
        let immune = self
            .catalogs
            .type_chart
            .multiplier(mv.elem, &self.state.side(defender_side).active().types)
            == 0.0;
        if immune {
            trace!(%side, mv = %mv.name, "no effect");
            self.push_event(
                side,
                EventKind::Attack { mv: mv_id, target, damage: 0, pct_damage: 0.0, hit: true },
            );
            return;
        }

        // A hit from fire, or a move that melts, thaws a frozen target
        // before any of the move's blocks apply.
        {
            let defender = self.state.side_mut(defender_side).active_mut();
            if defender.status == Some(Status::Freeze)
                && (mv.elem == ElemType::Fire || mv.thaws_target)
            {
                defender.clear_status();
            }
        }

        let mut damage = 0;
        if mv.is_damaging() {
            damage = calculate_damage(
                mv,
                self.state.side(side).active(),
                self.state.side(defender_side).active(),
                &self.catalogs.type_chart,
                &mut self.rng,
                DamageMode::Random,
            );
            // OHKO bypasses the formula and takes the rest of the bar.
            if mv.ohko {
                damage = self.state.side(defender_side).active().current_hp;
            }
        }
        let applied = self.apply_damage(defender_side, damage);

        if let Some(fraction) = mv.heal {
            self.state.side_mut(side).active_mut().heal_fraction(fraction);
        }
        if let Some(boosts) = &mv.boosts {
            Self::apply_boost_spec(&mut self.state, side, boosts);
        }
        if let Some(volatile) = &mv.volatile {
            self.apply_volatile(side, mv_id, volatile);
        }
        if let Some(secondary) = &mv.secondary {
            if self.rng.percent_roll(secondary.chance) {
                if let Some(status) = secondary.status {
                    self.state.side_mut(defender_side).active_mut().try_set_status(status);
                }
                if let Some(boosts) = &secondary.boosts {
                    Self::apply_boost_spec(&mut self.state, side, boosts);
                }
                if let Some(volatile) = &secondary.volatile {
                    let data = Self::volatile_data(volatile);
                    self.state
                        .side_mut(defender_side)
                        .active_mut()
                        .add_volatile(volatile.name.clone(), data);
                }
            }
        }

        let max_hp = self.state.side(defender_side).active().max_hp();
        let pct_damage = f64::from(applied) / f64::from(max_hp) * 100.0;
        trace!(%side, mv = %mv.name, damage = applied, "hit");
        self.push_event(
            side,
            EventKind::Attack { mv: mv_id, target, damage: applied, pct_damage, hit: true },
        );

        if self.state.side(defender_side).active().is_fainted() {
            self.push_event(defender_side, EventKind::Faint);
        }
    }

    /// Roll whether a persistent status stops the attacker this turn.
    ///
    /// Paralysis fails 25% of uses. Freeze thaws on a fire-type or
    /// melting move, else 20% per attempt. Sleep wakes with chance 1/3,
    /// forced after three failed attempts.
    fn immobilized(attacker: &mut Monster, mv: &MoveDef, rng: &mut BattleRng) -> Option<Status> {
        match attacker.status {
            Some(Status::Paralysis) if rng.percent_roll(25) => Some(Status::Paralysis),
            Some(Status::Freeze) => {
                if mv.elem == ElemType::Fire || mv.thaws_target || rng.percent_roll(20) {
                    attacker.clear_status();
                    None
                } else {
                    Some(Status::Freeze)
                }
            }
            Some(Status::Sleep) => {
                if attacker.status_turns >= 3 || rng.chance(1.0 / 3.0) {
                    attacker.clear_status();
                    None
                } else {
                    attacker.status_turns += 1;
                    Some(Status::Sleep)
                }
            }
            _ => None,
        }
    }

    /// Apply damage to a side's active, letting a substitute absorb it.
    /// Returns the damage the monster itself took.
    fn apply_damage(&mut self, defender_side: SideId, damage: i32) -> i32 {
        let defender = self.state.side_mut(defender_side).active_mut();
        if let Some(VolatileData::Substitute { hp }) = defender.volatile_mut("substitute") {
            *hp -= damage;
            if *hp <= 0 {
                defender.remove_volatile("substitute");
            }
            return 0;
        }
        defender.take_damage(damage);
        damage
    }

    fn apply_boost_spec(state: &mut BattleState, user: SideId, spec: &BoostSpec) {
        let target_side = match spec.target {
            BoostTarget::User => user,
            BoostTarget::Target => user.opponent(),
        };
        let target = state.side_mut(target_side).active_mut();
        for &(stat, delta) in &spec.stages {
            target.apply_boost(stat, delta);
        }
    }

    /// Apply a move's volatile block. `substitute` and `lockedmove`
    /// attach to the user; everything else lands on the target.
    fn apply_volatile(&mut self, side: SideId, mv_id: MoveId, spec: &crate::data::VolatileSpec) {
        match spec.name.as_str() {
            "substitute" => {
                let attacker = self.state.side_mut(side).active_mut();
                let cost = attacker.max_hp() / 4;
                // Raising one requires more HP than it costs.
                if attacker.current_hp > cost && !attacker.has_volatile("substitute") {
                    attacker.take_damage(cost);
                    attacker.add_volatile("substitute", VolatileData::Substitute { hp: cost });
                }
            }
            "lockedmove" => {
                self.state
                    .side_mut(side)
                    .active_mut()
                    .add_volatile("lockedmove", VolatileData::LockedMove { mv: mv_id, turns: 0 });
            }
            _ => {
                let data = Self::volatile_data(spec);
                self.state
                    .side_mut(side.opponent())
                    .active_mut()
                    .add_volatile(spec.name.clone(), data);
            }
        }
    }

    fn volatile_data(spec: &crate::data::VolatileSpec) -> VolatileData {
        match &spec.effect {
            Some(effect) => VolatileData::Effect { effect: effect.clone(), counter: 0 },
            None => VolatileData::Flag,
        }
    }

    /// End-of-turn upkeep on both actives: status damage and toxic
    /// escalation.
    fn end_of_turn(&mut self) {
        for side in SideId::BOTH {
            let (damage, status) = {
                let active = self.state.side_mut(side).active_mut();
                if active.is_fainted() {
                    continue;
                }
                let damage = match active.status {
                    Some(Status::Burn) => active.max_hp() / 16,
                    Some(Status::Poison) => active.max_hp() / 8,
                    Some(Status::Toxic) => {
                        // Damage grows every turn under toxic.
                        active.status_turns += 1;
                        active.max_hp() * active.status_turns as i32 / 16
                    }
                    _ => 0,
                };
                active.take_damage(damage);
                (damage, active.status)
            };

            if damage > 0 {
                let status = status.expect("status damage without a status");
                self.push_event(side, EventKind::StatusDamage { status, damage });
                if self.state.side(side).active().is_fainted() {
                    self.push_event(side, EventKind::Faint);
                }
            }
        }
    }

    fn push_event(&mut self, side: SideId, kind: EventKind) {
        let species = self.state.side(side).active().species;
        self.state.events.push(TurnEvent { turn: self.state.turn, side, species, kind });
    }
}
