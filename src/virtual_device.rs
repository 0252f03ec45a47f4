//! In-memory device that produces native input records.
//!
//! Useful for driving an [`EventStream`](crate::EventStream) or a
//! [`Dispatcher`](crate::Dispatcher) without hardware. Records are stamped
//! with a clock that advances 1 ms per record.

use crate::codes;
use crate::event::EventIdentity;
use crate::record::RawRecord;
use std::io::Cursor;

#[derive(Default)]
pub struct VirtualDevice {
    records: Vec<RawRecord>,
    clock_us: i64,
}

impl VirtualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock at `seconds` (whole seconds since the epoch).
    pub fn starting_at(seconds: i64) -> Self {
        Self {
            records: Vec::new(),
            clock_us: seconds * 1_000_000,
        }
    }

    /// Inject a record with an arbitrary category.
    pub fn raw(&mut self, category: u16, code: u16, value: i32) -> &mut Self {
        self.records.push(RawRecord {
            seconds: self.clock_us / 1_000_000,
            fraction: self.clock_us % 1_000_000,
            category,
            identity_code: code,
            value,
        });
        self.clock_us += 1_000;
        self
    }

    pub fn press(&mut self, button: EventIdentity) -> &mut Self {
        self.raw(codes::EV_KEY, button.code(), 1)
    }

    pub fn release(&mut self, button: EventIdentity) -> &mut Self {
        self.raw(codes::EV_KEY, button.code(), 0)
    }

    pub fn axis(&mut self, axis: EventIdentity, value: i32) -> &mut Self {
        self.raw(codes::EV_ABS, axis.code(), value)
    }

    /// `SYN_REPORT` marker, as the kernel emits after each batch.
    pub fn sync(&mut self) -> &mut Self {
        self.raw(codes::EV_SYN, 0, 0)
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Concatenated native bytes of every injected record.
    pub fn into_bytes(self) -> Vec<u8> {
        self.records.iter().flat_map(|r| r.to_bytes()).collect()
    }

    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RECORD_SIZE;

    #[test]
    fn test_clock_advances_per_record() {
        let mut dev = VirtualDevice::starting_at(10);
        dev.press(codes::CROSS).sync();
        let recs = dev.records();
        assert_eq!((recs[0].seconds, recs[0].fraction), (10, 0));
        assert_eq!((recs[1].seconds, recs[1].fraction), (10, 1_000));
    }

    #[test]
    fn test_bytes_are_whole_records() {
        let mut dev = VirtualDevice::new();
        dev.press(codes::CROSS).release(codes::CROSS).sync();
        let bytes = dev.into_bytes();
        assert_eq!(bytes.len(), 3 * RECORD_SIZE);
        let second = RawRecord::decode(&bytes[RECORD_SIZE..]).unwrap();
        assert_eq!(second.identity_code, 304);
        assert_eq!(second.value, 0);
    }
}
