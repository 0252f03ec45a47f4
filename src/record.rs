//! Fixed-size kernel input records.
//!
//! Each read from an evdev device returns whole `struct input_event` values:
//!
//! ```text
//! struct input_event {
//!     struct timeval time;   // c_long seconds, c_long microseconds
//!     __u16 type;            // category
//!     __u16 code;            // button/axis
//!     __s32 value;
//! };
//! ```
//!
//! The layout is the host's native one (native widths, byte order and
//! alignment), so [`RECORD_SIZE`] is 24 bytes on 64-bit Linux and 16 on
//! 32-bit. It is not a portable wire format.

use crate::error::{Error, Result};
use std::ffi::c_long;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Native `struct input_event`.
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct InputRecord {
    tv_sec: c_long,
    tv_usec: c_long,
    type_: u16,
    code: u16,
    value: i32,
}

/// Size of one record on this platform. Every device read is exactly this long.
pub const RECORD_SIZE: usize = std::mem::size_of::<InputRecord>();

/// One decoded record, before category filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// Whole seconds of the kernel timestamp.
    pub seconds: i64,
    /// Microseconds past `seconds` (0..=999_999).
    pub fraction: i64,
    pub category: u16,
    pub identity_code: u16,
    /// Stored by the kernel as a 32-bit word; signed for axes, 0/1 for buttons.
    pub value: i32,
}

impl RawRecord {
    /// Decodes the first [`RECORD_SIZE`] bytes of `buf`.
    ///
    /// Fails with [`Error::Decode`] if `buf` is shorter than one record. Category
    /// and code are not validated.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let (raw, _rest) = InputRecord::read_from_prefix(buf).map_err(|_| Error::Decode {
            expected: RECORD_SIZE,
            actual: buf.len(),
        })?;
        Ok(Self {
            seconds: i64::from(raw.tv_sec),
            fraction: i64::from(raw.tv_usec),
            category: raw.type_,
            identity_code: raw.code,
            value: raw.value,
        })
    }

    /// Encodes the record in the native layout (inverse of [`RawRecord::decode`]).
    ///
    /// Timestamps wider than `c_long` are truncated on 32-bit hosts.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let raw = InputRecord {
            tv_sec: self.seconds as c_long,
            tv_usec: self.fraction as c_long,
            type_: self.category,
            code: self.identity_code,
            value: self.value,
        };
        let mut out = [0u8; RECORD_SIZE];
        out.copy_from_slice(raw.as_bytes());
        out
    }
}
