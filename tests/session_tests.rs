//! Session state machine and gameplay scenarios

use blocktris::core::{
    drop_distance, lock, Board, Outcome, Piece, PieceSource, ScriptedSource, Session, SimpleRng,
};
use blocktris::types::{Color, Command, PieceKind, Status};

fn started(source: &mut impl PieceSource) -> Session {
    let t = Session::new().start(source);
    assert_eq!(t.outcome, Outcome::Started);
    t.session
}

fn apply_all(mut session: Session, commands: &[Command], source: &mut impl PieceSource) -> Session {
    for &cmd in commands {
        session = session.apply(cmd, source).session;
    }
    session
}

#[test]
fn test_new_session_is_idle() {
    let session = Session::new();
    assert_eq!(session.status(), Status::Idle);
    assert_eq!(session.score(), 0);
    assert!(session.active().is_none());
    assert_eq!(session.board().occupied_count(), 0);
}

#[test]
fn test_commands_ignored_while_idle() {
    let mut src = ScriptedSource::repeat(PieceKind::T);
    for cmd in [
        Command::Pause,
        Command::Resume,
        Command::MoveLeft,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Rotate,
    ] {
        let t = Session::new().apply(cmd, &mut src);
        assert_eq!(t.outcome, Outcome::Ignored, "{cmd:?}");
        assert_eq!(t.session, Session::new());
    }
    assert_eq!(Session::new().tick(&mut src).outcome, Outcome::Ignored);
    assert_eq!(src.drawn(), 0);
}

#[test]
fn test_start_spawns_first_piece() {
    let mut src = ScriptedSource::repeat(PieceKind::L);
    let session = started(&mut src);
    assert_eq!(session.status(), Status::Playing);
    assert_eq!(session.active(), Some(Piece::spawn(PieceKind::L)));

    // Start while playing or paused is a no-op.
    assert_eq!(session.start(&mut src).outcome, Outcome::Ignored);
    let paused = session.pause().session;
    assert_eq!(paused.start(&mut src).outcome, Outcome::Ignored);
    assert_eq!(src.drawn(), 1);
}

#[test]
fn test_i_piece_falls_nineteen_rows_then_locks() {
    let mut src = ScriptedSource::repeat(PieceKind::I);
    let mut session = started(&mut src);

    for n in 1..=19 {
        let t = session.tick(&mut src);
        assert_eq!(t.outcome, Outcome::Moved, "tick {n}");
        session = t.session;
    }
    assert_eq!(session.active().unwrap().row, 19);
    assert_eq!(session.board().occupied_count(), 0);

    let t = session.tick(&mut src);
    assert_eq!(t.outcome, Outcome::Locked { lines_cleared: 0 });
    let session = t.session;
    for col in 3..7 {
        assert_eq!(session.board().get(col, 19), Some(Some(Color::Cyan)));
    }
    assert_eq!(session.board().occupied_count(), 4);
    assert_eq!(session.active(), Some(Piece::spawn(PieceKind::I)));
}

#[test]
fn test_completing_bottom_row_scores_one_line() {
    use Command::*;
    let mut src = ScriptedSource::repeat(PieceKind::I);
    let session = started(&mut src);

    // Horizontal I pieces cover columns 0..=7 of the bottom row.
    let session = apply_all(session, &[MoveLeft, MoveLeft, MoveLeft, HardDrop], &mut src);
    let session = apply_all(session, &[MoveRight, HardDrop], &mut src);
    // Vertical I in column 8.
    let session = apply_all(
        session,
        &[Rotate, MoveRight, MoveRight, MoveRight, MoveRight, MoveRight, HardDrop],
        &mut src,
    );
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().occupied_count(), 12);
    assert!(!session.board().is_occupied(9, 19));

    // Vertical I in column 9 completes row 19.
    let session = apply_all(
        session,
        &[Rotate, MoveRight, MoveRight, MoveRight, MoveRight, MoveRight, MoveRight],
        &mut src,
    );
    let t = session.hard_drop(&mut src);
    assert_eq!(t.outcome, Outcome::Locked { lines_cleared: 1 });
    assert_eq!(t.session.score(), 100);
    // Three cells of each vertical bar remain, shifted down one row.
    assert_eq!(t.session.board().occupied_count(), 6);
    assert!(t.session.board().is_occupied(8, 19));
    assert!(t.session.board().is_occupied(9, 17));
    assert!(!t.session.board().is_occupied(9, 16));
}

#[test]
fn test_blocked_spawn_ends_game_without_touching_board() {
    let mut board = Board::new();
    board.set(4, 1, Some(Color::Red));
    let falling = Piece::spawn(PieceKind::O).translated(-4, 18);
    let session = Session::restore(board, falling, 40);
    assert_eq!(session.status(), Status::Playing);

    let mut src = ScriptedSource::repeat(PieceKind::O);
    let t = session.hard_drop(&mut src);

    assert_eq!(t.outcome, Outcome::GameOver { lines_cleared: 0 });
    let over = t.session;
    assert_eq!(over.status(), Status::GameOver);
    assert!(over.active().is_none());
    assert_eq!(*over.board(), lock(&falling, &board));
    assert_eq!(over.score(), 40);

    // Only start does anything now.
    for cmd in [Command::MoveLeft, Command::Rotate, Command::TogglePause] {
        assert_eq!(over.apply(cmd, &mut src).outcome, Outcome::Ignored);
    }
    assert_eq!(over.tick(&mut src).outcome, Outcome::Ignored);

    let restarted = over.start(&mut src);
    assert_eq!(restarted.outcome, Outcome::Started);
    assert_eq!(restarted.session.board().occupied_count(), 0);
    assert_eq!(restarted.session.score(), 0);
}

#[test]
fn test_restore_with_overlapping_piece_is_game_over() {
    let mut board = Board::new();
    board.fill_row(0, Color::Blue);
    let session = Session::restore(board, Piece::spawn(PieceKind::T), 0);
    assert_eq!(session.status(), Status::GameOver);
    assert!(session.active().is_none());
    assert_eq!(*session.board(), board);
}

#[test]
fn test_pause_freezes_piece() {
    let mut src = ScriptedSource::repeat(PieceKind::S);
    let session = started(&mut src);

    let t = session.toggle_pause();
    assert_eq!(t.outcome, Outcome::Paused);
    let paused = t.session;
    assert_eq!(paused.status(), Status::Paused);
    assert_eq!(paused.active(), session.active());

    for cmd in [Command::MoveLeft, Command::SoftDrop, Command::HardDrop, Command::Rotate] {
        let t = paused.apply(cmd, &mut src);
        assert_eq!(t.outcome, Outcome::Ignored);
        assert_eq!(t.session, paused);
    }
    assert_eq!(paused.tick(&mut src).session, paused);
    assert_eq!(paused.pause().outcome, Outcome::Ignored);

    let resumed = paused.toggle_pause();
    assert_eq!(resumed.outcome, Outcome::Resumed);
    assert_eq!(resumed.session, session);
}

#[test]
fn test_moves_rejected_at_walls_without_change() {
    let mut src = ScriptedSource::repeat(PieceKind::O);
    let mut session = started(&mut src);
    for _ in 0..4 {
        session = session.move_left().session;
    }
    assert_eq!(session.active().unwrap().col, 0);
    let t = session.move_left();
    assert_eq!(t.outcome, Outcome::Rejected);
    assert_eq!(t.session, session);
}

#[test]
fn test_rotation_without_kicks_is_rejected_at_wall() {
    let mut src = ScriptedSource::repeat(PieceKind::I);
    let session = started(&mut src);
    let vertical = session.rotate().session;
    let mut at_wall = vertical;
    for _ in 0..6 {
        at_wall = at_wall.move_right().session;
    }
    assert_eq!(at_wall.active().unwrap().col, 9);

    // Turning back to horizontal would reach column 12.
    let t = at_wall.rotate();
    assert_eq!(t.outcome, Outcome::Rejected);
    assert_eq!(t.session, at_wall);
}

#[test]
fn test_hard_drop_matches_repeated_soft_drop() {
    let mut board = Board::new();
    for (col, row) in [(0, 19), (3, 17), (4, 12), (6, 18), (8, 15), (9, 19)] {
        board.set(col, row, Some(Color::Green));
    }

    for kind in PieceKind::ALL {
        for col_shift in -3..=3 {
            let piece = Piece::spawn(kind).translated(col_shift, 0);
            if drop_distance(&piece, &board).is_none() {
                continue;
            }
            let session = Session::restore(board, piece, 0);

            let mut hard_src = ScriptedSource::repeat(PieceKind::T);
            let hard = session.hard_drop(&mut hard_src);

            let mut soft_src = ScriptedSource::repeat(PieceKind::T);
            let mut soft = session.soft_drop(&mut soft_src);
            while soft.outcome == Outcome::Moved {
                soft = soft.session.soft_drop(&mut soft_src);
            }

            assert_eq!(hard, soft, "{kind:?} shifted {col_shift}");
        }
    }
}

#[test]
fn test_hard_drop_from_far_above_lands_on_floor() {
    let high = Piece {
        row: -120,
        ..Piece::spawn(PieceKind::I)
    };
    let session = Session::restore(Board::new(), high, 0);
    assert_eq!(session.status(), Status::Playing);

    let t = session.hard_drop(&mut ScriptedSource::repeat(PieceKind::O));
    assert_eq!(t.outcome, Outcome::Locked { lines_cleared: 0 });
    let board = t.session.board();
    for col in 3..7 {
        assert_eq!(board.get(col, 19), Some(Some(Color::Cyan)));
    }
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_score_never_decreases() {
    let mut rng = SimpleRng::new(2024);
    let mut picker = SimpleRng::new(7);
    let commands = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Start,
    ];

    let mut session = started(&mut rng);
    let mut games = 0;
    for _ in 0..5_000 {
        let cmd = commands[picker.next_range(commands.len() as u32) as usize];
        let before = session.score();
        let t = session.apply(cmd, &mut rng);
        if t.outcome == Outcome::Started {
            games += 1;
        } else {
            assert!(t.session.score() >= before);
            assert_eq!(
                t.session.score() - before,
                t.outcome.lines_cleared() as u32 * 100
            );
        }
        session = t.session;
    }
    assert!(games > 0, "random play should top out at least once");
}

#[test]
fn test_snapshot_overlays_active_piece() {
    let mut src = ScriptedSource::repeat(PieceKind::Z);
    let session = started(&mut src);
    let snap = session.snapshot();

    assert_eq!(snap.status, Status::Playing);
    assert_eq!(snap.score, 0);
    assert!(snap.board.iter().flatten().all(|c| c.is_none()));
    let painted = snap.overlay.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(painted, 4);
    assert_eq!(snap.overlay[0][4], Some(Color::Red));
    assert_eq!(snap.active.as_ref().map(|a| a.kind), Some(PieceKind::Z));
}
