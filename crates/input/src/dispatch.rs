//! Forward input events into a command sink.

use crossterm::event::KeyEvent;

use crate::map::{handle_key_event, InputEvent};
use crate::types::CommandSink;

/// Counts what it forwarded; the sink decides where commands go.
#[derive(Debug)]
pub struct Dispatcher<S> {
    sink: S,
    sent: u64,
}

impl<S: CommandSink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, sent: 0 }
    }

    /// Enqueue the command for `event`.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<(), S::Error> {
        self.sink.submit(event.command())?;
        self.sent += 1;
        Ok(())
    }

    /// Map and enqueue a key; returns the event if the key was bound.
    pub fn dispatch_key(&mut self, key: KeyEvent) -> Result<Option<InputEvent>, S::Error> {
        match handle_key_event(key) {
            Some(event) => {
                self.dispatch(event)?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
