//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be used by the
//! core rules, the engine worker, the input layer and the terminal host alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Gravity period while playing |
//! | `LINE_CLEAR_POINTS` | 100 | Points per cleared row |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Command, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color().as_str(), "purple");
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert!(Status::Playing.is_playing());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity period in milliseconds while the session is playing.
///
/// Fixed; there is no level-based speed progression.
pub const TICK_MS: u32 = 500;

/// Points awarded per cleared row.
///
/// Clearing several rows at once scores linearly (no multi-line bonus).
pub const LINE_CLEAR_POINTS: u32 = 100;

/// The seven tetromino piece kinds
///
/// Each piece has a fixed color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// The color identifier written into the board when this piece locks.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Color identifier stored in occupied board cells.
///
/// There is exactly one color per piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Session lifecycle status
///
/// ```text
/// Idle --start--> Playing <--resume-- Paused
///                  |   \--pause-------^
///                  v
///               GameOver --start--> Playing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl Status {
    pub fn is_playing(&self) -> bool {
        matches!(self, Status::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::GameOver => "gameOver",
        }
    }
}

/// Player commands accepted by the session
///
/// The gravity tick is not a player command; it is delivered separately by
/// the scheduler so it can be tagged and discarded when stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Reset the board and score and spawn the first piece (from Idle or GameOver)
    Start,
    /// Suspend gravity (Playing only)
    Pause,
    /// Resume gravity (Paused only)
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Step piece one cell down, landing if blocked
    SoftDrop,
    /// Drop piece to the lowest valid position and land it
    HardDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "togglepause" => Some(Command::TogglePause),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
        }
    }
}

/// Anything that accepts player commands in arrival order.
///
/// The input layer writes into a sink without knowing what is behind it;
/// `Vec<Command>` records commands for tests.
pub trait CommandSink {
    type Error;

    fn submit(&mut self, command: Command) -> Result<(), Self::Error>;
}

impl CommandSink for Vec<Command> {
    type Error = std::convert::Infallible;

    fn submit(&mut self, command: Command) -> Result<(), Self::Error> {
        self.push(command);
        Ok(())
    }
}
