//! Investment inference driven through real battles.

use rust_arena::agent::{Action, Agent, PlanningAgent};
use rust_arena::damage::StatProfile;
use rust_arena::engine::{BattleEngine, BattleView};
use rust_arena::monster::{EvSpread, Monster, Nature};
use rust_arena::sample;

struct AlwaysFirstMove;

impl Agent for AlwaysFirstMove {
    fn choose_action(&mut self, _view: &BattleView<'_>) -> Action {
        Action::Attack(0)
    }

    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize {
        view.living_bench()[0]
    }
}

/// The true investment must survive every narrowing step: an
/// max-attack Adamant attacker keeps its (max EVs, positive nature)
/// candidate alive no matter how many hits are observed.
#[test]
fn narrowing_never_eliminates_the_truth() {
    let catalogs = sample::catalogs();
    let species = catalogs.species.find_by_name("slugger").unwrap().id;
    let tackle = catalogs.moves.find_by_name("tackle").unwrap().id;

    let invested = Monster::new(
        species,
        &[tackle],
        100,
        Nature::Adamant,
        EvSpread { hp: 252, atk: 252, ..EvSpread::default() },
        &catalogs,
    )
    .unwrap();

    let mut engine = BattleEngine::new(
        &catalogs,
        vec![sample::monster("slugger", &catalogs)],
        vec![invested],
        21,
    )
    .unwrap();

    let mut planner = PlanningAgent::new(&catalogs);
    let mut opponent = AlwaysFirstMove;
    engine.run(&mut planner, &mut opponent);

    let belief = planner.beliefs().belief(species).expect("opponent observed");
    assert!(
        belief.atk.contains(&StatProfile::new(true, true)),
        "true attack profile eliminated: {:?}",
        belief.atk
    );
    assert!(!belief.atk.is_empty());
    assert!(belief.atk.len() <= 4);
}

/// An uninvested attacker's observed damage rules out the heavily
/// invested hypotheses while keeping the true one.
#[test]
fn weak_hits_rule_out_heavy_investment() {
    use rust_arena::engine::{BattleState, EventKind, TurnEvent};
    use rust_arena::SideId;

    let catalogs = sample::catalogs();
    let slugger = catalogs.species.find_by_name("slugger").unwrap().id;
    let riptide = catalogs.species.find_by_name("riptide").unwrap().id;
    let tackle = catalogs.moves.find_by_name("tackle").unwrap().id;

    let state = BattleState::new(
        vec![sample::monster("slugger", &catalogs)],
        vec![sample::monster("riptide", &catalogs)],
    )
    .unwrap();

    let mut planner = PlanningAgent::new(&catalogs);
    // An uninvested neutral riptide tackle lands around 15-17% on an
    // uninvested slugger, well under any max-EV projection.
    let events = vec![TurnEvent {
        turn: 1,
        side: SideId::B,
        species: riptide,
        kind: EventKind::Attack {
            mv: tackle,
            target: slugger,
            damage: 42,
            pct_damage: 16.0,
            hit: true,
        },
    }];
    planner.observe_turn(&BattleView::of(&state, SideId::A), &events);

    let belief = planner.beliefs().belief(riptide).expect("opponent observed");
    assert!(
        !belief.atk.contains(&StatProfile::new(true, true)),
        "invested profile survived uninvested damage: {:?}",
        belief.atk
    );
    assert!(belief.atk.len() < 4);
}

/// Turn order against a known own speed tightens the speed interval.
#[test]
fn turn_order_tightens_the_speed_interval() {
    let catalogs = sample::catalogs();
    let species = catalogs.species.find_by_name("slugger").unwrap().id;

    let mut engine = BattleEngine::new(
        &catalogs,
        // zephyrix outruns any slugger build.
        vec![sample::monster_with("zephyrix", &["voltsurge"], &catalogs)],
        vec![sample::monster_with("slugger", &["tackle"], &catalogs)],
        13,
    )
    .unwrap();

    let mut planner = PlanningAgent::new(&catalogs);
    let mut opponent = AlwaysFirstMove;
    engine.run_single_turn(&mut planner, &mut opponent);

    let belief = planner.beliefs().belief(species).expect("opponent observed");
    let zephyrix_speed = f64::from(
        engine
            .state()
            .side(rust_arena::SideId::A)
            .active()
            .effective_stat(rust_arena::monster::StatKey::Spe),
    );
    assert!(belief.spe_max <= zephyrix_speed);
}
