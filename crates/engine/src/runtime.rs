//! Engine runtime.
//!
//! One tokio task owns the [`Session`] and drains a bounded mpsc queue of
//! [`Envelope`]s in arrival order. Player commands and gravity ticks share
//! that queue, so no two transitions ever interleave. After every change
//! the worker publishes a fresh [`Snapshot`] on a watch channel.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::core::{Outcome, PieceSource, Session, SimpleRng, Snapshot};
use crate::scheduler::{Epoch, IntervalTimer, Scheduler, TickTimer};
use crate::types::{Command, CommandSink, Status};

/// Item on the engine queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Command(Command),
    /// Gravity tick armed under the given epoch
    Tick(Epoch),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine worker has stopped")]
    Closed,
    #[error("engine worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result of handling one envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Applied(Outcome),
    /// Tick from a retired epoch
    Stale,
    Shutdown,
}

/// Owns the session, the piece source and the tick scheduler.
///
/// Fully synchronous; the async loop behind [`EngineHandle`] only moves
/// envelopes into [`Worker::handle`].
#[derive(Debug)]
pub struct Worker<S, T> {
    session: Session,
    source: S,
    scheduler: Scheduler<T>,
}

impl<S: PieceSource, T: TickTimer> Worker<S, T> {
    pub fn new(source: S, scheduler: Scheduler<T>) -> Self {
        Self {
            session: Session::new(),
            source,
            scheduler,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn scheduler(&self) -> &Scheduler<T> {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn handle(&mut self, envelope: Envelope) -> Handled {
        let before = self.session.status();
        let transition = match envelope {
            Envelope::Command(command) => self.session.apply(command, &mut self.source),
            Envelope::Tick(epoch) => {
                if !self.scheduler.accepts(epoch) {
                    return Handled::Stale;
                }
                self.session.tick(&mut self.source)
            }
            Envelope::Shutdown => return Handled::Shutdown,
        };

        self.session = transition.session;
        self.scheduler.on_status(before, self.session.status());
        Handled::Applied(transition.outcome)
    }

    /// Stop the timer and return the final session.
    pub fn finish(mut self) -> Session {
        self.scheduler.disarm();
        self.session
    }
}

async fn run_worker<S, T>(
    mut worker: Worker<S, T>,
    mut queue: mpsc::Receiver<Envelope>,
    snapshots: watch::Sender<Snapshot>,
) -> Session
where
    S: PieceSource,
    T: TickTimer,
{
    while let Some(envelope) = queue.recv().await {
        match worker.handle(envelope) {
            Handled::Applied(outcome) => {
                if !outcome.changed() {
                    trace!(?envelope, ?outcome, "no change");
                    continue;
                }
                let session = worker.session();
                match outcome {
                    Outcome::Started => info!("game started"),
                    Outcome::GameOver { .. } => info!(score = session.score(), "game over"),
                    Outcome::Locked { lines_cleared } if lines_cleared > 0 => {
                        debug!(lines_cleared, score = session.score(), "rows cleared")
                    }
                    Outcome::Paused => info!("game paused"),
                    Outcome::Resumed => info!("game resumed"),
                    _ => debug!(?envelope, ?outcome, "applied"),
                }
                snapshots.send_replace(worker.snapshot());
            }
            Handled::Stale => debug!(?envelope, "dropping stale tick"),
            Handled::Shutdown => break,
        }
    }
    info!("engine stopped");
    worker.finish()
}

/// Cloneable producer side of the engine queue.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Envelope>,
}

impl CommandSender {
    pub async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .send(Envelope::Command(command))
            .await
            .map_err(|_| EngineError::Closed)
    }

    /// Enqueue from a thread outside the runtime, waiting for queue space.
    pub fn blocking_send(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .blocking_send(Envelope::Command(command))
            .map_err(|_| EngineError::Closed)
    }
}

impl CommandSink for CommandSender {
    type Error = EngineError;

    fn submit(&mut self, command: Command) -> Result<(), Self::Error> {
        self.blocking_send(command)
    }
}

/// Handle to a running engine worker.
#[derive(Debug)]
pub struct EngineHandle {
    sender: CommandSender,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<Session>,
}

impl EngineHandle {
    /// Start an engine from configuration. Must be called inside a tokio
    /// runtime context.
    pub fn spawn(config: &EngineConfig) -> Self {
        let seed = config.resolved_seed();
        info!(
            seed,
            tick_ms = config.tick_period.as_millis() as u64,
            queue = config.queue_capacity,
            "starting engine"
        );
        Self::spawn_with(
            SimpleRng::new(seed),
            config.tick_period,
            config.queue_capacity,
        )
    }

    /// Start an engine with an explicit piece source.
    pub fn spawn_with<S>(source: S, tick_period: Duration, queue_capacity: usize) -> Self
    where
        S: PieceSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let (snap_tx, snap_rx) = watch::channel(Snapshot::default());

        let timer = IntervalTimer::new(tx.downgrade());
        let worker = Worker::new(source, Scheduler::new(timer, tick_period));
        let task = tokio::spawn(run_worker(worker, rx, snap_tx));

        Self {
            sender: CommandSender { tx },
            snapshots: snap_rx,
            task,
        }
    }

    pub async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.sender.send(command).await
    }

    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.snapshots.borrow().status
    }

    /// Stop the worker after everything already queued, returning the final
    /// session.
    pub async fn shutdown(self) -> Result<Session, EngineError> {
        // A closed queue means the worker already exited; still join it.
        let _ = self.sender.tx.send(Envelope::Shutdown).await;
        drop(self.sender);
        Ok(self.task.await?)
    }
}
