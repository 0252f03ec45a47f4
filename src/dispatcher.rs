//! Handler registry and the blocking dispatch loop.
//!
//! A [`Dispatcher`] is bound to one device path. Handlers are registered per
//! [`EventIdentity`] (one per identity, the last registration wins), then
//! [`Dispatcher::start_listening`] reads events in device order and calls the
//! matching handler synchronously. Events nobody registered for are dropped.
//!
//! # Lifecycle
//! `Idle` → `Listening` → `Failed`. A dispatcher listens once; to recover from a
//! failure, build a new one. [`StopHandle`] adds an optional `Stopped` exit.
//!
//! # Example
//! ```no_run
//! use dualshock::{codes, Dispatcher};
//!
//! let mut pad = Dispatcher::new("/dev/input/event4");
//! pad.register(codes::CROSS, |event| {
//!     if event.is_pressed() {
//!         println!("Cross pressed!");
//!     } else {
//!         println!("Cross released!");
//!     }
//!     Ok(())
//! });
//! pad.start_listening()?;
//! # Ok::<(), dualshock::Error>(())
//! ```

use crate::binding::ActionProfile;
use crate::error::{Error, HandlerError, Result};
use crate::event::{Event, EventIdentity};
use crate::stream::EventStream;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Logic invoked with each event whose identity it is registered under.
///
/// Closures `FnMut(&Event) -> Result<(), HandlerError>` implement this trait.
pub trait EventHandler {
    fn on_event(&mut self, event: &Event) -> std::result::Result<(), HandlerError>;
}

impl<F> EventHandler for F
where
    F: FnMut(&Event) -> std::result::Result<(), HandlerError>,
{
    fn on_event(&mut self, event: &Event) -> std::result::Result<(), HandlerError> {
        self(event)
    }
}

/// One handler registered under several identities.
struct SharedHandler(Rc<RefCell<dyn EventHandler>>);

impl EventHandler for SharedHandler {
    fn on_event(&mut self, event: &Event) -> std::result::Result<(), HandlerError> {
        self.0.borrow_mut().on_event(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenState {
    /// Constructed, no stream open.
    Idle,
    Listening,
    /// Left the loop after a [`StopHandle::stop`] request.
    Stopped,
    /// The stream or a handler failed.
    Failed,
}

/// Requests that a listening dispatcher return.
///
/// This is an extension to the plain blocking loop: the flag is checked
/// before each read, so a dispatcher blocked on an idle device only notices it
/// once the next record arrives.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Dispatcher {
    device_path: PathBuf,
    handlers: HashMap<EventIdentity, Box<dyn EventHandler>>,
    state: ListenState,
    stop: StopHandle,
}

impl Dispatcher {
    pub fn new(device_path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: device_path.into(),
            handlers: HashMap::new(),
            state: ListenState::Idle,
            stop: StopHandle::default(),
        }
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    pub fn state(&self) -> ListenState {
        self.state
    }

    /// Registers a closure for `identity`, replacing any previous handler.
    pub fn register<F>(&mut self, identity: EventIdentity, handler: F) -> &mut Self
    where
        F: FnMut(&Event) -> std::result::Result<(), HandlerError> + 'static,
    {
        self.register_handler(identity, handler)
    }

    /// Registers any [`EventHandler`] for `identity`, replacing any previous handler.
    pub fn register_handler(
        &mut self,
        identity: EventIdentity,
        handler: impl EventHandler + 'static,
    ) -> &mut Self {
        if self.handlers.insert(identity, Box::new(handler)).is_some() {
            debug!("Replaced handler for {identity}");
        }
        self
    }

    /// Builder form of [`Dispatcher::register`].
    pub fn with_handler<F>(mut self, identity: EventIdentity, handler: F) -> Self
    where
        F: FnMut(&Event) -> std::result::Result<(), HandlerError> + 'static,
    {
        self.register(identity, handler);
        self
    }

    /// Registers `handler` on every control the profile binds to `action`.
    ///
    /// All those identities share the one handler instance.
    pub fn bind_action<F>(
        &mut self,
        profile: &ActionProfile,
        action: &str,
        handler: F,
    ) -> Result<&mut Self>
    where
        F: FnMut(&Event) -> std::result::Result<(), HandlerError> + 'static,
    {
        let identities = profile.resolve(action)?;
        let shared: Rc<RefCell<dyn EventHandler>> = Rc::new(RefCell::new(handler));
        for identity in identities {
            self.register_handler(identity, SharedHandler(Rc::clone(&shared)));
        }
        Ok(self)
    }

    /// Removes the handler for `identity`. Returns whether one was registered.
    pub fn unregister(&mut self, identity: EventIdentity) -> bool {
        self.handlers.remove(&identity).is_some()
    }

    pub fn is_registered(&self, identity: EventIdentity) -> bool {
        self.handlers.contains_key(&identity)
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handle for ending the loop from a handler or another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Invokes the handler registered for `event.identity`, if any.
    pub fn dispatch(&mut self, event: &Event) -> Result<()> {
        let identity = event.identity;
        match self.handlers.get_mut(&identity) {
            Some(handler) => {
                trace!(%identity, value = event.value, "dispatching event");
                handler
                    .on_event(event)
                    .map_err(|source| Error::Handler { identity, source })
            }
            None => {
                trace!(%identity, "no handler registered");
                Ok(())
            }
        }
    }

    /// Opens the device and dispatches its events until something fails.
    ///
    /// Blocks the calling thread. Returns `Err` on device, decode or handler
    /// failure, and `Ok(())` only after a [`StopHandle::stop`] request.
    pub fn start_listening(&mut self) -> Result<()> {
        self.begin()?;
        match EventStream::open(&self.device_path) {
            Ok(stream) => self.run(stream),
            Err(e) => {
                self.state = ListenState::Failed;
                Err(e)
            }
        }
    }

    /// Same as [`Dispatcher::start_listening`] over an already built stream.
    pub fn listen_on<R: Read>(&mut self, stream: EventStream<R>) -> Result<()> {
        self.begin()?;
        self.run(stream)
    }

    fn begin(&mut self) -> Result<()> {
        if self.state != ListenState::Idle {
            return Err(Error::AlreadyStarted);
        }
        self.state = ListenState::Listening;
        Ok(())
    }

    fn run(&mut self, mut events: impl Iterator<Item = Result<Event>>) -> Result<()> {
        loop {
            if self.stop.is_stopped() {
                info!("Stop requested, leaving dispatch loop");
                self.state = ListenState::Stopped;
                return Ok(());
            }
            let Some(item) = events.next() else {
                // an EventStream reports its failure before ending
                self.state = ListenState::Stopped;
                return Ok(());
            };
            if let Err(e) = item.and_then(|event| self.dispatch(&event)) {
                self.state = ListenState::Failed;
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use crate::event::EventKind;
    use crate::virtual_device::VirtualDevice;

    fn button(code: EventIdentity, value: i32) -> Event {
        Event {
            timestamp: 0.0,
            identity: code,
            kind: EventKind::Button,
            value,
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new("/dev/null");

        let h1 = Rc::clone(&hits);
        d.register(codes::CROSS, move |_| {
            h1.borrow_mut().push("first");
            Ok(())
        });
        let h2 = Rc::clone(&hits);
        d.register(codes::CROSS, move |_| {
            h2.borrow_mut().push("second");
            Ok(())
        });

        d.dispatch(&button(codes::CROSS, 1)).unwrap();
        d.dispatch(&button(codes::CROSS, 0)).unwrap();
        assert_eq!(*hits.borrow(), vec!["second", "second"]);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_unregistered_identity_is_noop() {
        let mut d = Dispatcher::new("/dev/null");
        assert!(d.is_empty());
        d.dispatch(&button(codes::SQUARE, 1)).unwrap();
    }

    #[test]
    fn test_unregister() {
        let mut d = Dispatcher::new("/dev/null").with_handler(codes::PS, |_| Ok(()));
        assert!(d.is_registered(codes::PS));
        assert!(d.unregister(codes::PS));
        assert!(!d.unregister(codes::PS));
    }

    #[test]
    fn test_handler_error_carries_identity() {
        let mut d = Dispatcher::new("/dev/null");
        d.register(codes::R1, |_| Err("bad".into()));
        match d.dispatch(&button(codes::R1, 1)) {
            Err(Error::Handler { identity, source }) => {
                assert_eq!(identity, codes::R1);
                assert_eq!(source.to_string(), "bad");
            }
            other => panic!("expected handler error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_use() {
        let mut d = Dispatcher::new("/dev/null");
        let err = d
            .listen_on(EventStream::from_reader(std::io::empty()))
            .unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(d.state(), ListenState::Failed);
        assert!(matches!(
            d.listen_on(EventStream::from_reader(std::io::empty())),
            Err(Error::AlreadyStarted)
        ));
    }

    #[test]
    fn test_stop_from_handler() {
        let mut dev = VirtualDevice::new();
        dev.press(codes::OPTIONS).press(codes::CROSS);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new("/dev/null");
        let stop = d.stop_handle();
        let s = Rc::clone(&seen);
        d.register(codes::OPTIONS, move |e| {
            s.borrow_mut().push(e.identity);
            stop.stop();
            Ok(())
        });
        let s = Rc::clone(&seen);
        d.register(codes::CROSS, move |e| {
            s.borrow_mut().push(e.identity);
            Ok(())
        });

        d.listen_on(EventStream::from_reader(dev.into_reader()))
            .unwrap();
        assert_eq!(d.state(), ListenState::Stopped);
        assert_eq!(*seen.borrow(), vec![codes::OPTIONS]);
    }
}
