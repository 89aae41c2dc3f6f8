use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{is_colliding, merge_and_clear, Board, GameSession, Piece, Player, Position};
use blockfall::types::{Cell, CellState, Direction, ShapeKind};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if session.tick().drop_interval_ms.is_none() {
                session.start();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..11 {
                    board.set(x, y, Cell::new(ShapeKind::Z, CellState::Merged));
                }
            }
            let bar = Player::at(Piece::new(ShapeKind::I), Position::new(10, 16));
            black_box(merge_and_clear(&mut board, &bar));
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::new();
    let player = Player::spawn(Piece::new(ShapeKind::T));

    c.bench_function("is_colliding", |b| {
        b.iter(|| is_colliding(black_box(&player), &board, black_box(Position::DOWN)))
    });
}

fn bench_move(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            session.move_piece(Direction::Right);
            session.move_piece(Direction::Left);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.rotate();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
