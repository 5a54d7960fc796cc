use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_notation::{parse_move, to_san, BitboardAttacks, GameState, LegalityCheck, Position};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    inputs: &'static [&'static str],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "start",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        inputs: &["e4", "Nf3", "g1f3", "d2d4", "c4"],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        inputs: &["O-O", "O-O-O", "Bxa6", "Nxf7", "dxe6", "Qxf6"],
    },
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let mut game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        for input in case.inputs {
            // Correctness guard before benchmarking.
            parse_move(&mut game, &BitboardAttacks, input, LegalityCheck::Enforce)
                .unwrap_or_else(|err| panic!("{} should parse in {}: {err}", input, case.name));
        }

        group.throughput(Throughput::Elements(case.inputs.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(case.name), |b| {
            b.iter(|| {
                for input in case.inputs {
                    let parsed = parse_move(
                        &mut game,
                        &BitboardAttacks,
                        black_box(input),
                        LegalityCheck::Enforce,
                    );
                    black_box(parsed.ok());
                }
            });
        });
    }

    group.finish();
}

fn bench_san(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_san");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let mut game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let moves = game.legal_moves();

        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(case.name), |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(to_san(&mut game, black_box(*mv)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(notation_benches, bench_parse, bench_san);
criterion_main!(notation_benches);
