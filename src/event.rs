//! Events and their identities.
//!
//! The kernel reports every input change as a record carrying a *category*
//! (key, absolute axis, sync, ...) and a *code* naming the button or axis that
//! changed. Only key and absolute-axis records become [`Event`]s; the code is
//! wrapped in an [`EventIdentity`] so it can key a handler registry.
//!
//! ## Value conventions
//! - **Buttons:** `0` = released, `1` = pressed (`2` = autorepeat on some devices).
//! - **Axes:** the raw reading reported by the driver, in the device's own range.
//!   Nothing is normalized here.

use crate::codes;
use crate::record::RawRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies *what* changed: a specific button or axis code.
///
/// Two identities are equal iff their codes are equal. The range is defined by
/// the kernel and is not validated here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventIdentity(u16);

impl EventIdentity {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Raw kernel code.
    pub const fn code(self) -> u16 {
        self.0
    }
}

impl From<u16> for EventIdentity {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match codes::name_of(*self) {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "code {}", self.0),
        }
    }
}

/// Category of the record an [`Event`] was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// `EV_KEY`
    Button,
    /// `EV_ABS`
    Axis,
}

impl EventKind {
    /// Maps a raw record category to a kind; `None` for categories that never
    /// surface as events (sync, misc, relative, ...).
    pub fn from_category(category: u16) -> Option<Self> {
        match category {
            codes::EV_KEY => Some(EventKind::Button),
            codes::EV_ABS => Some(EventKind::Axis),
            _ => None,
        }
    }
}

/// A normalized controller event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Kernel timestamp in seconds.
    pub timestamp: f64,
    pub identity: EventIdentity,
    pub kind: EventKind,
    /// Raw value from the record, unmodified.
    pub value: i32,
}

impl Event {
    /// Builds an event from a raw record, or `None` if the record's category is
    /// neither key nor absolute axis.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let kind = EventKind::from_category(record.category)?;
        Some(Self {
            timestamp: compose_timestamp(record.seconds, record.fraction),
            identity: EventIdentity::new(record.identity_code),
            kind,
            value: record.value,
        })
    }

    /// True for a button event whose value is non-zero.
    pub fn is_pressed(&self) -> bool {
        self.kind == EventKind::Button && self.value != 0
    }
}

/// Joins the seconds and microseconds parts of a kernel timestamp.
///
/// The sum is formed in whole microseconds and converted to `f64` once, so the
/// fraction is never rounded on its own (`0 s + 1 µs` stays `0.000001`).
pub fn compose_timestamp(seconds: i64, micros: i64) -> f64 {
    let total = i128::from(seconds) * 1_000_000 + i128::from(micros);
    total as f64 / 1_000_000.0
}
