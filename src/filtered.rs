use crate::dispatcher::EventHandler;
use crate::error::HandlerError;
use crate::event::{Event, EventKind};

/// Wraps a handler and forwards only events accepted by a predicate.
pub struct Filtered {
    predicate: Box<dyn Fn(&Event) -> bool>,
    inner: Box<dyn EventHandler>,
}

impl Filtered {
    pub fn new(
        predicate: impl Fn(&Event) -> bool + 'static,
        inner: impl EventHandler + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Forwards button presses only.
    pub fn presses(inner: impl EventHandler + 'static) -> Self {
        Self::new(Event::is_pressed, inner)
    }

    /// Forwards button releases only.
    pub fn releases(inner: impl EventHandler + 'static) -> Self {
        Self::new(|e: &Event| e.kind == EventKind::Button && e.value == 0, inner)
    }
}

impl EventHandler for Filtered {
    fn on_event(&mut self, event: &Event) -> Result<(), HandlerError> {
        if (self.predicate)(event) {
            self.inner.on_event(event)
        } else {
            Ok(())
        }
    }
}
