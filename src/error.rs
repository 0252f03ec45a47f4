//! Error types.
//!
//! Every failure that ends a listening session surfaces as an [`Error`] to the
//! caller of [`Dispatcher::start_listening`](crate::Dispatcher::start_listening).
//! Nothing is retried internally.

use crate::event::EventIdentity;
use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by handlers.
///
/// Handlers may fail with anything that implements `std::error::Error`; the
/// dispatcher keeps the original value as the `source` of [`Error::Handler`].
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A chunk read from the device was shorter than one record.
    ///
    /// `actual == 0` means the device reached end-of-file on a record boundary.
    #[error("truncated input record: expected {expected} bytes, got {actual}")]
    Decode { expected: usize, actual: usize },

    #[error("failed to open input device {path:?}: {source}")]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read on an already open device failed (unplugged, permission revoked, ...).
    #[error("input device read failed: {0}")]
    DeviceIo(#[source] std::io::Error),

    #[error("handler for {identity} failed: {source}")]
    Handler {
        identity: EventIdentity,
        #[source]
        source: HandlerError,
    },

    /// `start_listening` was called on a dispatcher that already left `Idle`.
    #[error("dispatcher has already been started")]
    AlreadyStarted,

    #[error("invalid action profile: {0}")]
    Config(String),

    #[error("failed to parse action profile: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// True when the session ended because the device stream stopped producing
    /// whole records (EOF or a partial record).
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Consumes a handler error and returns the value the handler produced.
    pub fn into_handler_source(self) -> Option<HandlerError> {
        match self {
            Error::Handler { source, .. } => Some(source),
            _ => None,
        }
    }
}
