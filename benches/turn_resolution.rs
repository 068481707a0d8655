use criterion::{criterion_group, criterion_main, Criterion};

use rust_arena::agent::{Action, Agent, PlanningAgent, RandomAgent};
use rust_arena::engine::{BattleEngine, BattleView};
use rust_arena::sample;

struct Scripted;

impl Agent for Scripted {
    fn choose_action(&mut self, _view: &BattleView<'_>) -> Action {
        Action::Attack(0)
    }

    fn choose_replacement(&mut self, view: &BattleView<'_>) -> usize {
        view.living_bench()[0]
    }
}

fn bench_single_turn(c: &mut Criterion) {
    let catalogs = sample::catalogs();

    c.bench_function("single_turn", |b| {
        b.iter(|| {
            let mut engine = BattleEngine::new(
                &catalogs,
                vec![sample::monster("slugger", &catalogs)],
                vec![sample::monster("riptide", &catalogs)],
                42,
            )
            .unwrap();
            let mut a = Scripted;
            let mut b2 = Scripted;
            engine.run_single_turn(&mut a, &mut b2)
        });
    });
}

fn bench_planner_battle(c: &mut Criterion) {
    let catalogs = sample::catalogs();
    let team = || {
        vec![
            sample::monster("riptide", &catalogs),
            sample::monster("cindercub", &catalogs),
            sample::monster("sproutling", &catalogs),
        ]
    };

    c.bench_function("planner_vs_random_battle", |b| {
        b.iter(|| {
            let mut engine = BattleEngine::new(&catalogs, team(), team(), 42).unwrap();
            let mut planner = PlanningAgent::new(&catalogs);
            let mut random = RandomAgent::new(7);
            engine.run(&mut planner, &mut random)
        });
    });
}

criterion_group!(benches, bench_single_turn, bench_planner_battle);
criterion_main!(benches);
