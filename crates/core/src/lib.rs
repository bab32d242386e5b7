//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules and nothing else. It has no
//! dependencies on timers, terminals, or I/O, making it:
//!
//! - **Deterministic**: piece selection is injected through [`PieceSource`]
//! - **Value-based**: [`Board`], [`Piece`] and [`Session`] are `Copy`; every
//!   command returns a new session instead of mutating in place
//! - **Portable**: any host event loop can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of color cells
//! - [`pieces`]: tetromino catalog, matrix rotation, spawn
//! - [`collision`]: the placement validity check
//! - [`landing`]: lock a piece into the board, clear full rows
//! - [`scoring`]: flat 100 points per cleared row
//! - [`rng`]: injectable piece sources (seeded LCG, scripted sequence)
//! - [`session`]: the Idle/Playing/Paused/GameOver state machine
//! - [`snapshot`]: read-only render view
//!
//! # Example
//!
//! ```
//! use blocktris_core::{Session, SimpleRng};
//! use blocktris_types::{Command, Status};
//!
//! let mut rng = SimpleRng::new(12345);
//! let session = Session::new().start(&mut rng).session;
//! assert_eq!(session.status(), Status::Playing);
//!
//! let session = session.apply(Command::MoveRight, &mut rng).session;
//! let session = session.apply(Command::HardDrop, &mut rng).session;
//! assert_eq!(session.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod landing;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blocktris_types as types;

pub use board::Board;
pub use collision::{drop_distance, is_valid_placement};
pub use landing::{clear_full_rows, lock};
pub use pieces::{base_shape, rotate_clockwise, spawn, Piece, Shape};
pub use rng::{PieceSource, ScriptedSource, SimpleRng};
pub use scoring::line_clear_score;
pub use session::{Outcome, Session, Transition};
pub use snapshot::{ActiveSnapshot, Grid, Snapshot};
