use criterion::{criterion_group, criterion_main, Criterion};

use riposte::board::color::Color;
use riposte::board::Board;
use riposte::move_generator::MoveGenerator;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("generate moves from the starting position", |b| {
        b.iter(generate_starting_moves)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn generate_starting_moves() -> usize {
    let mut board = Board::starting_position();
    let mut move_generator = MoveGenerator::new();
    move_generator
        .generate_moves(&mut board, Color::White)
        .len()
}
