//! Engine - async host for the game session
//!
//! Wraps a [`blocktris_core::Session`] in a single tokio worker:
//!
//! - [`runtime`]: command queue, worker loop, [`EngineHandle`]
//! - [`scheduler`]: epoch-tagged gravity ticks that never fire late
//! - [`config`]: environment-driven settings

pub mod config;
pub mod runtime;
pub mod scheduler;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use config::EngineConfig;
pub use runtime::{CommandSender, EngineError, EngineHandle, Envelope, Handled, Worker};
pub use scheduler::{Epoch, IntervalTimer, ManualTimer, Scheduler, TickTimer};
