//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: [`map`] turns `crossterm` key events into
//! discrete [`InputEvent`]s, and [`dispatch`] forwards each event as exactly
//! one [`crate::types::Command`] into a [`crate::types::CommandSink`].
//! There is no debouncing or auto-repeat; a repeated key enqueues a repeated
//! command.

pub mod dispatch;
pub mod map;

pub use blocktris_types as types;

pub use dispatch::Dispatcher;
pub use map::{handle_key_event, should_quit, InputEvent};
