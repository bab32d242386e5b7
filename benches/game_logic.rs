use blocktris::core::{clear_full_rows, is_valid_placement, lock, Board, Piece, Session, SimpleRng};
use blocktris::term::{GameView, Viewport};
use blocktris::types::{Color, Command, PieceKind};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_tick(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut session = Session::new().start(&mut rng).session;

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            let t = session.tick(&mut rng);
            // Keep the game alive across iterations.
            session = if t.session.status().is_playing() {
                t.session
            } else {
                t.session.start(&mut rng).session
            };
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    for row in 16..20 {
        board.fill_row(row, Color::Cyan);
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| clear_full_rows(black_box(&board)))
    });
}

fn bench_lock(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::spawn(PieceKind::T).translated(0, 18);

    c.bench_function("lock_piece", |b| b.iter(|| lock(black_box(&piece), &board)));
}

fn bench_validity(c: &mut Criterion) {
    let mut board = Board::new();
    board.fill_row(19, Color::Red);
    let piece = Piece::spawn(PieceKind::L).rotated();

    c.bench_function("is_valid_placement", |b| {
        b.iter(|| is_valid_placement(black_box(&piece), &board, 1, 10))
    });
}

fn bench_commands(c: &mut Criterion) {
    let mut rng = SimpleRng::new(99);
    let start = Session::new().start(&mut rng).session;

    c.bench_function("move_rotate_hard_drop", |b| {
        b.iter(|| {
            let mut s = start;
            for cmd in [Command::MoveLeft, Command::Rotate, Command::MoveRight, Command::HardDrop] {
                s = s.apply(black_box(cmd), &mut rng).session;
            }
            s
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut rng = SimpleRng::new(7);
    let snap = Session::new().start(&mut rng).session.snapshot();
    let view = GameView::default();
    let mut fb = view.render(&snap, Viewport::new(80, 24));

    c.bench_function("render_frame", |b| {
        b.iter(|| view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_lock,
    bench_validity,
    bench_commands,
    bench_render
);
criterion_main!(benches);
