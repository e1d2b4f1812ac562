use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fpl_core::{derive_partition, Formation, Player, PositionCategory, SquadBoard};

fn squad() -> Vec<Player> {
    PositionCategory::ALL
        .iter()
        .flat_map(|&category| {
            (0..category.squad_quota()).map(move |n| {
                let id = u32::from(category.element_type()) * 100 + n as u32;
                Player::new(id, format!("P{id}"), category)
            })
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let players = squad();
    let mut board = SquadBoard::new();
    c.bench_function("reconcile_15", |b| {
        b.iter(|| board.reconcile(black_box(players.clone())))
    });
}

fn bench_partition(c: &mut Criterion) {
    let mut board = SquadBoard::new();
    board.reconcile(squad());
    let mut group = c.benchmark_group("derive_partition");
    for formation in Formation::ALL {
        group.bench_function(formation.code(), |b| {
            b.iter(|| derive_partition(black_box(board.slots()), formation))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_partition);
criterion_main!(benches);
