//! Gravity tick scheduling.
//!
//! Every time the session enters Playing the scheduler arms its timer with a
//! fresh epoch; leaving Playing cancels the timer and retires the epoch. Ticks
//! carry the epoch they were armed with, and [`Scheduler::accepts`] rejects
//! any tick from a retired epoch. A tick that was already queued when a pause
//! or game over committed is therefore dropped, never applied late.

use std::time::Duration;

use tokio::sync::mpsc::WeakSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::runtime::Envelope;
use crate::types::Status;

/// Generation counter for armed timers
pub type Epoch = u64;

/// Host-provided cancelable periodic timer.
pub trait TickTimer {
    /// Start emitting ticks tagged with `epoch`, the first one full `period`
    /// from now. Replaces any previous arming.
    fn arm(&mut self, epoch: Epoch, period: Duration);

    /// Stop emitting ticks.
    fn cancel(&mut self);
}

/// Tracks which epoch is live and drives the timer from status changes.
#[derive(Debug)]
pub struct Scheduler<T> {
    timer: T,
    period: Duration,
    epoch: Epoch,
    armed: bool,
}

impl<T: TickTimer> Scheduler<T> {
    pub fn new(timer: T, period: Duration) -> Self {
        Self {
            timer,
            period,
            epoch: 0,
            armed: false,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// React to a committed status change.
    pub fn on_status(&mut self, before: Status, after: Status) {
        match (before.is_playing(), after.is_playing()) {
            (false, true) => self.arm(),
            (true, false) => self.disarm(),
            _ => {}
        }
    }

    /// Whether a tick from `epoch` may be applied now.
    pub fn accepts(&self, epoch: Epoch) -> bool {
        self.armed && epoch == self.epoch
    }

    fn arm(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.armed = true;
        self.timer.arm(self.epoch, self.period);
    }

    /// Cancel and retire the current epoch.
    pub fn disarm(&mut self) {
        if self.armed {
            self.epoch = self.epoch.wrapping_add(1);
            self.armed = false;
        }
        self.timer.cancel();
    }
}

/// Timer backed by a tokio interval task that feeds the engine queue.
///
/// Holds only a weak handle to the queue so an armed timer never keeps the
/// engine alive on its own.
#[derive(Debug)]
pub struct IntervalTimer {
    queue: WeakSender<Envelope>,
    task: Option<JoinHandle<()>>,
}

impl IntervalTimer {
    pub fn new(queue: WeakSender<Envelope>) -> Self {
        Self { queue, task: None }
    }
}

impl TickTimer for IntervalTimer {
    fn arm(&mut self, epoch: Epoch, period: Duration) {
        self.cancel();
        let queue = self.queue.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(tx) = queue.upgrade() else {
                    break;
                };
                if tx.send(Envelope::Tick(epoch)).await.is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Timer that only records calls; ticks are injected by hand.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualTimer {
    /// Epochs passed to `arm`, in order
    pub armed: Vec<Epoch>,
    pub cancels: usize,
    /// Epoch currently emitting, if any
    pub live: Option<Epoch>,
}

impl TickTimer for ManualTimer {
    fn arm(&mut self, epoch: Epoch, _period: Duration) {
        self.armed.push(epoch);
        self.live = Some(epoch);
    }

    fn cancel(&mut self) {
        self.cancels += 1;
        self.live = None;
    }
}
