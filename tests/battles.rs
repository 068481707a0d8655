//! End-to-end battle scenarios driving the public API.

use rust_arena::agent::{Action, Agent, PlanningAgent, RandomAgent};
use rust_arena::engine::{BattleEngine, BattleView, EventKind};
use rust_arena::monster::Monster;
use rust_arena::sample;
use rust_arena::SideId;

/// Repeats one action forever and replaces with the first living
/// bench member.
struct Scripted(Action);

impl Agent for Scripted {
    fn choose_action(&mut self, _view: &BattleView<'_>) -> Action {
        self.0
    }

    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize {
        view.living_bench()[0]
    }
}

fn trio(catalogs: &rust_arena::data::Catalogs) -> Vec<Monster> {
    vec![
        sample::monster("riptide", catalogs),
        sample::monster("cindercub", catalogs),
        sample::monster("sproutling", catalogs),
    ]
}

#[test]
fn identical_seeds_replay_identically() {
    let catalogs = sample::catalogs();

    let run = || {
        let mut engine =
            BattleEngine::new(&catalogs, trio(&catalogs), trio(&catalogs), 99).unwrap();
        let mut a = RandomAgent::new(1);
        let mut b = RandomAgent::new(2);
        let outcome = engine.run(&mut a, &mut b);
        (outcome, engine.state().events.clone())
    };

    let (outcome1, events1) = run();
    let (outcome2, events2) = run();
    assert_eq!(outcome1, outcome2);
    assert_eq!(events1, events2);
}

#[test]
fn speed_ties_break_both_ways() {
    let catalogs = sample::catalogs();

    let mut a_first = 0;
    let mut b_first = 0;
    for seed in 0..200 {
        let mut engine = BattleEngine::new(
            &catalogs,
            vec![sample::monster("slugger", &catalogs)],
            vec![sample::monster("slugger", &catalogs)],
            seed,
        )
        .unwrap();
        let mut a = Scripted(Action::Attack(0));
        let mut b = Scripted(Action::Attack(0));
        let events = engine.run_single_turn(&mut a, &mut b);

        let first = events
            .iter()
            .find(|e| matches!(e.kind, EventKind::Attack { .. }))
            .unwrap();
        match first.side {
            SideId::A => a_first += 1,
            SideId::B => b_first += 1,
        }
    }

    // An unbiased coin over 200 trials should not be lopsided.
    assert!(a_first >= 60, "side A first only {a_first}/200");
    assert!(b_first >= 60, "side B first only {b_first}/200");
}

#[test]
fn passive_mirror_ends_in_a_draw_at_the_ceiling() {
    let catalogs = sample::catalogs();
    let team = || vec![sample::monster_with("sproutling", &["regrow"], &catalogs)];

    let mut engine = BattleEngine::new(&catalogs, team(), team(), 5)
        .unwrap()
        .with_turn_limit(50);
    let mut a = Scripted(Action::Attack(0));
    let mut b = Scripted(Action::Attack(0));
    let outcome = engine.run(&mut a, &mut b);

    // The draw is scored on the first turn past the ceiling.
    assert_eq!(outcome.winner, None);
    assert_eq!(outcome.turns, 51);
}

#[test]
fn type_advantage_sweeps_a_mono_team() {
    let catalogs = sample::catalogs();
    let fire = vec![
        sample::monster_with("cindercub", &["ember"], &catalogs),
        sample::monster_with("cindercub", &["ember"], &catalogs),
    ];
    let grass = vec![
        sample::monster_with("sproutling", &["seedbomb"], &catalogs),
        sample::monster_with("sproutling", &["seedbomb"], &catalogs),
    ];

    let mut wins = 0;
    for seed in 0..10 {
        let mut engine =
            BattleEngine::new(&catalogs, fire.clone(), grass.clone(), seed).unwrap();
        let mut a = Scripted(Action::Attack(0));
        let mut b = Scripted(Action::Attack(0));
        if engine.run(&mut a, &mut b).winner == Some(SideId::A) {
            wins += 1;
        }
    }
    // Double-effective STAB against resisted coverage wins every time.
    assert_eq!(wins, 10);
}

#[test]
fn planner_beats_the_random_baseline() {
    let catalogs = sample::catalogs();

    let mut planner_wins = 0;
    let mut random_wins = 0;
    for seed in 0..30 {
        let mut engine =
            BattleEngine::new(&catalogs, trio(&catalogs), trio(&catalogs), seed).unwrap();
        let mut planner = PlanningAgent::new(&catalogs);
        let mut random = RandomAgent::new(seed ^ 0x5555);
        match engine.run(&mut planner, &mut random).winner {
            Some(SideId::A) => planner_wins += 1,
            Some(SideId::B) => random_wins += 1,
            None => {}
        }
    }

    assert!(
        planner_wins > random_wins,
        "planner {planner_wins} vs random {random_wins}"
    );
}

#[test]
fn battle_events_form_a_consistent_log() {
    let catalogs = sample::catalogs();
    let mut engine = BattleEngine::new(&catalogs, trio(&catalogs), trio(&catalogs), 7).unwrap();
    let mut a = RandomAgent::new(3);
    let mut b = RandomAgent::new(4);
    let outcome = engine.run(&mut a, &mut b);

    let events = &engine.state().events;
    assert!(!events.is_empty());

    // Turns never decrease and never exceed the recorded total.
    let mut last_turn = 0;
    for event in events {
        assert!(event.turn >= last_turn);
        assert!(event.turn <= outcome.turns);
        last_turn = event.turn;
    }

    // Every faint of a side with reserves is followed by a replacement
    // or ends the battle.
    let faints = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Faint))
        .count();
    let replacements = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Replacement { .. }))
        .count();
    assert!(replacements <= faints);
}
