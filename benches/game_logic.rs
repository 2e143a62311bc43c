use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrade::core::{
    draw_session, try_rotate, Board, InputSnapshot, Session, SessionSnapshot, SimpleRng, Tetromino,
};
use tetrade::term::{FrameBuffer, TermSurface};
use tetrade::types::{Button, PieceKind, PlayerId, RotateDirection};

fn versus_session() -> Session {
    let mut session = Session::default();
    session.update(&InputSnapshot::pressing(PlayerId::One, Button::Start));
    session.update(&InputSnapshot::pressing(PlayerId::One, Button::Down));
    session.update(&InputSnapshot::pressing(PlayerId::One, Button::Confirm));
    let mut both = InputSnapshot::new();
    both.press(PlayerId::One, Button::Start)
        .press(PlayerId::Two, Button::Start);
    session.update(&both);
    session
}

fn bench_session_frame(c: &mut Criterion) {
    let mut session = versus_session();
    let idle = InputSnapshot::new();

    c.bench_function("session_frame_versus", |b| {
        b.iter(|| {
            black_box(session.update(black_box(&idle)));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = versus_session();
    for _ in 0..240 {
        session.update(&InputSnapshot::new());
    }
    let snap: SessionSnapshot = session.snapshot();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("draw_session_term", |b| {
        b.iter(|| {
            draw_session(black_box(&snap), &mut TermSurface::new(&mut fb));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, PieceKind::I.id());
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_garbage(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("add_garbage_row", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for _ in 0..4 {
                black_box(board.add_garbage_row(&mut rng));
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::from_rows(&["##.#######", "#..#######"]);
    let piece = Tetromino::pick(PieceKind::T).at(0, 17);

    c.bench_function("try_rotate_kick", |b| {
        b.iter(|| {
            black_box(try_rotate(
                black_box(&piece),
                RotateDirection::Clockwise,
                &board,
            ));
        })
    });
}

criterion_group!(
    benches,
    bench_session_frame,
    bench_render,
    bench_line_clear,
    bench_garbage,
    bench_try_rotate
);
criterion_main!(benches);
