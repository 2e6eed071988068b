//! Round throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blast_wars::core::{GameKind, SessionConfig};
use blast_wars::games::Move;
use blast_wars::session::{Screen, SessionController};

fn config() -> SessionConfig {
    SessionConfig::default()
        .with_starting_balance(1_000_000_000)
        .with_reveal_delay(std::time::Duration::ZERO)
        .with_seed(42)
}

fn bench_casino_war(c: &mut Criterion) {
    let mut controller = SessionController::new(config()).unwrap();
    controller.select_game(GameKind::CasinoWar).unwrap();
    controller.set_bet(100).unwrap();

    c.bench_function("casino_war_round", |b| {
        b.iter(|| {
            controller.play().unwrap();
            controller.act(Move::Deal).unwrap();
            if controller.screen() == Screen::Playing {
                controller.act(Move::GoToWar).unwrap();
            }
            controller.acknowledge().unwrap();
            black_box(controller.session().balance)
        })
    });
}

fn bench_tile_hunter(c: &mut Criterion) {
    let mut controller = SessionController::new(config()).unwrap();
    controller.select_game(GameKind::TileHunter).unwrap();
    controller.set_bet(100).unwrap();

    c.bench_function("tile_hunter_round", |b| {
        b.iter(|| {
            controller.play().unwrap();
            let mut index = 0;
            while controller.screen() == Screen::Playing && index < 3 {
                controller.act(Move::Reveal(index)).unwrap();
                index += 1;
            }
            if controller.screen() == Screen::Playing {
                controller.act(Move::CashOut).unwrap();
            }
            controller.acknowledge().unwrap();
            black_box(controller.session().balance)
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut controller = SessionController::new(config()).unwrap();
    controller.select_game(GameKind::RideTheBus).unwrap();
    controller.play().unwrap();

    c.bench_function("session_snapshot_bincode", |b| {
        b.iter(|| black_box(controller.snapshot().to_bytes().unwrap()))
    });
}

criterion_group!(benches, bench_casino_war, bench_tile_hunter, bench_snapshot);
criterion_main!(benches);
