//! DualShock: controller events from a Linux evdev device file.
//!
//! Reads the fixed-size `input_event` records a device such as
//! `/dev/input/event4` produces, keeps the button and axis records as typed
//! [`Event`]s, and calls the handler registered for each event's identity.
//!
//! - [`EventStream`]: pull-based iterator of events over a device file or any reader.
//! - [`Dispatcher`]: identity → handler registry plus a blocking listen loop.
//! - [`codes`]: DualShock 4 button/axis codes.
//!
//! Everything runs on the calling thread; reads block until the device has data.

#[cfg(not(target_os = "linux"))]
compile_error!("dualshock reads Linux evdev devices and only builds on Linux");

pub mod binding;
pub mod codes;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod filtered;
pub mod logger;
pub mod record;
pub mod stream;
pub mod virtual_device;

pub use binding::{ActionProfile, Binding};
pub use dispatcher::{Dispatcher, EventHandler, ListenState, StopHandle};
pub use error::{Error, HandlerError, Result};
pub use event::{Event, EventIdentity, EventKind};
pub use filtered::Filtered;
pub use logger::EventLogger;
pub use record::{RawRecord, RECORD_SIZE};
pub use stream::EventStream;
