use criterion::{criterion_group, criterion_main, Criterion};

use gambit::board::Board;
use gambit::perft::perft;

fn perft_benchmark(c: &mut Criterion) {
    c.bench_function("perft 4 from the starting position", |b| {
        let mut board = Board::starting_position();
        b.iter(|| {
            let nodes = perft(&mut board, 4);
            assert_eq!(nodes, 197_281);
        });
    });

    c.bench_function("perft 3 from kiwipete", |b| {
        let mut board =
            Board::new("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        b.iter(|| {
            let nodes = perft(&mut board, 3);
            assert_eq!(nodes, 97_862);
        });
    });
}

criterion_group!(benches, perft_benchmark);
criterion_main!(benches);
