//! Blocking, pull-based event stream over a device file.
//!
//! [`EventStream`] is an `Iterator<Item = Result<Event>>`. Each `next()` reads
//! whole records until one of them is a key or absolute-axis record, then
//! yields it as an [`Event`]. Sync and other categories are skipped without a
//! trace in the output.
//!
//! The stream never ends on its own. It yields exactly one `Err` when the
//! device fails or stops producing whole records, and `None` afterwards.
//!
//! # Example
//! ```no_run
//! use dualshock::{codes, EventStream};
//!
//! for event in EventStream::open("/dev/input/event4")? {
//!     let event = event?;
//!     if event.identity == codes::CROSS && event.is_pressed() {
//!         println!("Cross pressed!");
//!     }
//! }
//! # Ok::<(), dualshock::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::event::Event;
use crate::record::{RawRecord, RECORD_SIZE};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{info, trace, warn};

pub struct EventStream<R = File> {
    reader: R,
    buf: [u8; RECORD_SIZE],
    done: bool,
}

impl EventStream<File> {
    /// Opens `path` read-only. The file is closed when the stream is dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Opened input device {}", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> EventStream<R> {
    /// Wraps an already open byte source (pipe, socket, in-memory stream).
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            buf: [0u8; RECORD_SIZE],
            done: false,
        }
    }

    /// Reads and decodes the next record of any category.
    pub fn next_record(&mut self) -> Result<RawRecord> {
        let filled = read_full(&mut self.reader, &mut self.buf).map_err(Error::DeviceIo)?;
        RawRecord::decode(&self.buf[..filled])
    }

    /// Releases the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_event(&mut self) -> Result<Event> {
        loop {
            let record = self.next_record()?;
            match Event::from_record(&record) {
                Some(event) => return Ok(event),
                None => trace!(
                    category = record.category,
                    code = record.identity_code,
                    "skipping record"
                ),
            }
        }
    }
}

impl<R: Read> Iterator for EventStream<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_event();
        if let Err(e) = &item {
            warn!("Input stream ended: {e}");
            self.done = true;
        }
        Some(item)
    }
}

impl<R: Read> std::iter::FusedIterator for EventStream<R> {}

/// Fills `buf` from `reader`, stopping early only at end-of-file.
///
/// Returns the number of bytes read; anything below `buf.len()` is a short read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use crate::virtual_device::VirtualDevice;
    use std::io::Cursor;

    /// Reader that hands out one byte per call.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(1);
            self.0.read(&mut buf[..n])
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "unplugged"))
        }
    }

    #[test]
    fn test_skips_sync_and_unknown_categories() {
        let mut dev = VirtualDevice::new();
        dev.press(codes::CROSS)
            .sync()
            .raw(0x04, 0x04, 90001)
            .axis(codes::LEFTJOY_X, 200)
            .sync();
        let mut stream = EventStream::from_reader(dev.into_reader());

        let first = stream.next().unwrap().unwrap();
        assert_eq!(first.identity, codes::CROSS);
        assert_eq!(first.value, 1);

        let second = stream.next().unwrap().unwrap();
        assert_eq!(second.identity, codes::LEFTJOY_X);
        assert_eq!(second.value, 200);

        // trailing sync is skipped, then EOF on a record boundary
        assert!(matches!(
            stream.next(),
            Some(Err(Error::Decode { actual: 0, .. }))
        ));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_reassembles_partial_reads() {
        let mut dev = VirtualDevice::new();
        dev.press(codes::CIRCLE).release(codes::CIRCLE);
        let mut stream = EventStream::from_reader(Trickle(dev.into_reader()));

        let values: Vec<i32> = stream
            .by_ref()
            .take(2)
            .map(|e| e.unwrap().value)
            .collect();
        assert_eq!(values, vec![1, 0]);
    }

    #[test]
    fn test_truncated_record_is_a_decode_error() {
        let mut dev = VirtualDevice::new();
        dev.press(codes::CROSS);
        let mut bytes = dev.into_bytes();
        bytes.extend_from_slice(&[0u8; 5]);
        let mut stream = EventStream::from_reader(Cursor::new(bytes));

        assert!(stream.next().unwrap().is_ok());
        match stream.next() {
            Some(Err(Error::Decode { expected, actual })) => {
                assert_eq!(expected, RECORD_SIZE);
                assert_eq!(actual, 5);
            }
            other => panic!("expected truncated record, got {other:?}"),
        }
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_read_failure_is_device_io() {
        let mut stream = EventStream::from_reader(Broken);
        assert!(matches!(stream.next(), Some(Err(Error::DeviceIo(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_open_missing_device() {
        match EventStream::open("/nonexistent/dualshock/event99") {
            Err(Error::DeviceOpen { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/dualshock/event99"));
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("opening a missing device succeeded"),
        }
    }
}
