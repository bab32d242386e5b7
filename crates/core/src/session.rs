//! Session module - the game state machine
//!
//! A [`Session`] is a small `Copy` value: board, active piece, score and
//! status. Every command consumes a session and returns a [`Transition`]
//! holding the next session plus an [`Outcome`] describing what happened.
//! Rejected or out-of-state commands hand back the input unchanged.
//!
//! ```text
//! Idle --start--> Playing --pause--> Paused --resume--> Playing
//!                    |
//!                    +--landing with blocked spawn--> GameOver --start--> Playing
//! ```

use crate::board::Board;
use crate::collision::{drop_distance, is_valid_placement};
use crate::landing::{clear_full_rows, lock};
use crate::pieces::{spawn, Piece};
use crate::rng::PieceSource;
use crate::scoring::add_score;
use crate::snapshot::Snapshot;
use crate::types::{Command, Status};

/// What a command did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Command not accepted in the current status
    Ignored,
    /// Placement check failed; nothing changed
    Rejected,
    /// Active piece translated or rotated
    Moved,
    /// Piece landed and the next piece spawned
    Locked { lines_cleared: usize },
    /// Piece landed and the next spawn was blocked
    GameOver { lines_cleared: usize },
    Started,
    Paused,
    Resumed,
}

impl Outcome {
    /// Whether the session value changed
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Ignored | Outcome::Rejected)
    }

    /// Rows cleared by this command, if it landed a piece
    pub fn lines_cleared(&self) -> usize {
        match self {
            Outcome::Locked { lines_cleared } | Outcome::GameOver { lines_cleared } => {
                *lines_cleared
            }
            _ => 0,
        }
    }
}

/// Result of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub outcome: Outcome,
}

impl Transition {
    fn new(session: Session, outcome: Outcome) -> Self {
        Self { session, outcome }
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

/// Complete game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    board: Board,
    active: Option<Piece>,
    score: u32,
    status: Status,
}

impl Session {
    /// Idle session with an empty board
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: None,
            score: 0,
            status: Status::Idle,
        }
    }

    /// Rebuild a playing session from parts (replays, scenario setup).
    ///
    /// If `active` does not fit on `board` the session is GameOver with no
    /// active piece, exactly as a blocked spawn would leave it.
    pub fn restore(board: Board, active: Piece, score: u32) -> Self {
        if is_valid_placement(&active, &board, 0, 0) {
            Self {
                board,
                active: Some(active),
                score,
                status: Status::Playing,
            }
        } else {
            Self {
                board,
                active: None,
                score,
                status: Status::GameOver,
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.board, self.active.as_ref(), self.score, self.status)
    }

    /// Dispatch a player command
    pub fn apply(self, command: Command, source: &mut impl PieceSource) -> Transition {
        match command {
            Command::Start => self.start(source),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(source),
            Command::HardDrop => self.hard_drop(source),
            Command::Rotate => self.rotate(),
        }
    }

    /// Fresh board, zero score, first piece (from Idle or GameOver)
    pub fn start(self, source: &mut impl PieceSource) -> Transition {
        if !matches!(self.status, Status::Idle | Status::GameOver) {
            return Transition::new(self, Outcome::Ignored);
        }

        let next = Self::restore(Board::new(), spawn(source), 0);
        let outcome = match next.status {
            Status::GameOver => Outcome::GameOver { lines_cleared: 0 },
            _ => Outcome::Started,
        };
        Transition::new(next, outcome)
    }

    pub fn pause(self) -> Transition {
        if self.status != Status::Playing {
            return Transition::new(self, Outcome::Ignored);
        }
        Transition::new(
            Self {
                status: Status::Paused,
                ..self
            },
            Outcome::Paused,
        )
    }

    pub fn resume(self) -> Transition {
        if self.status != Status::Paused {
            return Transition::new(self, Outcome::Ignored);
        }
        Transition::new(
            Self {
                status: Status::Playing,
                ..self
            },
            Outcome::Resumed,
        )
    }

    /// Pause when playing, resume when paused
    pub fn toggle_pause(self) -> Transition {
        match self.status {
            Status::Playing => self.pause(),
            Status::Paused => self.resume(),
            _ => Transition::new(self, Outcome::Ignored),
        }
    }

    pub fn move_left(self) -> Transition {
        self.shift(-1)
    }

    pub fn move_right(self) -> Transition {
        self.shift(1)
    }

    /// Player-triggered single step down
    pub fn soft_drop(self, source: &mut impl PieceSource) -> Transition {
        self.step_down(source)
    }

    /// Scheduler-triggered gravity step; same rules as a soft drop
    pub fn tick(self, source: &mut impl PieceSource) -> Transition {
        self.step_down(source)
    }

    /// Fall as far as possible, then land
    pub fn hard_drop(self, source: &mut impl PieceSource) -> Transition {
        let Some(active) = self.playing_piece() else {
            return Transition::new(self, Outcome::Ignored);
        };
        let dy = drop_distance(&active, &self.board).unwrap_or(0);
        self.land(active.dropped(dy), source)
    }

    /// Clockwise rotation in place; rejected without kicks when blocked
    pub fn rotate(self) -> Transition {
        let Some(active) = self.playing_piece() else {
            return Transition::new(self, Outcome::Ignored);
        };
        let rotated = active.rotated();
        if !is_valid_placement(&rotated, &self.board, 0, 0) {
            return Transition::new(self, Outcome::Rejected);
        }
        Transition::new(
            Self {
                active: Some(rotated),
                ..self
            },
            Outcome::Moved,
        )
    }

    fn playing_piece(&self) -> Option<Piece> {
        if self.status.is_playing() {
            self.active
        } else {
            None
        }
    }

    fn shift(self, dx: i8) -> Transition {
        let Some(active) = self.playing_piece() else {
            return Transition::new(self, Outcome::Ignored);
        };
        if !is_valid_placement(&active, &self.board, dx, 0) {
            return Transition::new(self, Outcome::Rejected);
        }
        Transition::new(
            Self {
                active: Some(active.translated(dx, 0)),
                ..self
            },
            Outcome::Moved,
        )
    }

    fn step_down(self, source: &mut impl PieceSource) -> Transition {
        let Some(active) = self.playing_piece() else {
            return Transition::new(self, Outcome::Ignored);
        };
        if is_valid_placement(&active, &self.board, 0, 1) {
            return Transition::new(
                Self {
                    active: Some(active.translated(0, 1)),
                    ..self
                },
                Outcome::Moved,
            );
        }
        self.land(active, source)
    }

    /// Lock, clear, score, then spawn or end the game
    fn land(self, piece: Piece, source: &mut impl PieceSource) -> Transition {
        let (board, lines_cleared) = clear_full_rows(&lock(&piece, &self.board));
        let score = add_score(self.score, lines_cleared);

        let next = spawn(source);
        if is_valid_placement(&next, &board, 0, 0) {
            Transition::new(
                Self {
                    board,
                    active: Some(next),
                    score,
                    status: Status::Playing,
                },
                Outcome::Locked { lines_cleared },
            )
        } else {
            Transition::new(
                Self {
                    board,
                    active: None,
                    score,
                    status: Status::GameOver,
                },
                Outcome::GameOver { lines_cleared },
            )
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
