use crate::dispatcher::EventHandler;
use crate::error::HandlerError;
use crate::event::Event;
use std::io::{Stdout, Write};

/// A handler that writes every event as one JSON line.
pub struct EventLogger<W: Write> {
    out: W,
}

impl EventLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> EventLogger<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventHandler for EventLogger<W> {
    fn on_event(&mut self, event: &Event) -> Result<(), HandlerError> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        Ok(())
    }
}
