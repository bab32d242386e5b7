//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and
//! benches can write `blocktris::{core,engine,input,term,types}`.

pub use blocktris_core as core;
pub use blocktris_engine as engine;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;
