//! Blocktris terminal runner.
//!
//! The engine worker runs on a tokio runtime; this thread owns the terminal,
//! forwards key presses into the engine queue and redraws whenever a new
//! snapshot is published. Logs go to a file because the terminal belongs to
//! the renderer.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use blocktris::engine::{EngineConfig, EngineHandle};
use blocktris::input::{should_quit, Dispatcher};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Input poll timeout; bounds how stale a drawn frame can get.
const FRAME: Duration = Duration::from_millis(16);

const DEFAULT_LOG_PATH: &str = "blocktris.log";

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env();
    let rt = Runtime::new().context("creating tokio runtime")?;
    let engine = {
        let _guard = rt.enter();
        EngineHandle::spawn(&config)
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &engine);

    // Always try to restore terminal state.
    let _ = term.exit();

    let last = rt.block_on(engine.shutdown())?;
    info!(score = last.score(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, engine: &EngineHandle) -> Result<()> {
    let view = GameView::default();
    let mut snapshots = engine.subscribe();
    let mut dispatcher = Dispatcher::new(engine.sender());

    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = terminal_viewport();
    let mut dirty = true;

    loop {
        if dirty || snapshots.has_changed()? {
            let snap = snapshots.borrow_and_update().clone();
            view.render_into(&snap, viewport, &mut fb);
            term.present(&mut fb)?;
            dirty = false;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if should_quit(key) => {
                info!("quit requested");
                return Ok(());
            }
            Event::Key(key) => {
                dispatcher.dispatch_key(key)?;
            }
            Event::Resize(width, height) => {
                viewport = Viewport::new(width, height);
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// File-backed `tracing` subscriber; `RUST_LOG` overrides the `info` default.
fn init_logging() -> Result<()> {
    let path = env::var_os("BLOCKTRIS_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();

    info!(log = %path.display(), "logging initialized");
    Ok(())
}
