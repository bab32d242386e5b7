//! Terminal rendering for the falling-block game.
//!
//! [`GameView`] paints a [`blocktris_core::Snapshot`] into a [`FrameBuffer`]
//! without touching the terminal; [`TerminalRenderer`] flushes frame buffers
//! through crossterm, sending only the runs that changed since the last
//! frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
