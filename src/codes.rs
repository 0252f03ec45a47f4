//! DualShock 4 button/axis codes and the record categories used for filtering.
//!
//! Codes follow the Linux `hid-sony` driver mapping as exposed through
//! `/dev/input/eventN`.

use crate::event::EventIdentity;

// Record categories

/// Synchronization marker separating batches of changes. Never dispatched.
pub const EV_SYN: u16 = 0x00;
/// Key/button state change.
pub const EV_KEY: u16 = 0x01;
/// Absolute axis change.
pub const EV_ABS: u16 = 0x03;

// Buttons

/// Cross button
pub const CROSS: EventIdentity = EventIdentity::new(304);
/// Circle button
pub const CIRCLE: EventIdentity = EventIdentity::new(305);
/// Triangle button
pub const TRIANGLE: EventIdentity = EventIdentity::new(307);
/// Square button
pub const SQUARE: EventIdentity = EventIdentity::new(308);
pub const L1: EventIdentity = EventIdentity::new(310);
pub const R1: EventIdentity = EventIdentity::new(311);
/// L2 digital click (the analog travel is [`L2_AXIS`])
pub const L2: EventIdentity = EventIdentity::new(312);
/// R2 digital click (the analog travel is [`R2_AXIS`])
pub const R2: EventIdentity = EventIdentity::new(313);
pub const SHARE: EventIdentity = EventIdentity::new(314);
pub const OPTIONS: EventIdentity = EventIdentity::new(315);
pub const PS: EventIdentity = EventIdentity::new(316);
/// Left stick click
pub const L3: EventIdentity = EventIdentity::new(317);
/// Right stick click
pub const R3: EventIdentity = EventIdentity::new(318);

// Axes

pub const LEFTJOY_X: EventIdentity = EventIdentity::new(0x00);
pub const LEFTJOY_Y: EventIdentity = EventIdentity::new(0x01);
pub const L2_AXIS: EventIdentity = EventIdentity::new(0x02);
pub const RIGHTJOY_X: EventIdentity = EventIdentity::new(0x03);
pub const RIGHTJOY_Y: EventIdentity = EventIdentity::new(0x04);
pub const R2_AXIS: EventIdentity = EventIdentity::new(0x05);
/// D-pad horizontal hat: `-1` left, `0` centered, `1` right.
pub const DPAD_X: EventIdentity = EventIdentity::new(0x10);
/// D-pad vertical hat: `-1` up, `0` centered, `1` down.
pub const DPAD_Y: EventIdentity = EventIdentity::new(0x11);

/// Name → identity table. Names are lowercase snake case.
///
/// Button and axis codes live in separate kernel namespaces, but the
/// DualShock's codes never collide, so one table serves both.
pub const CONTROLS: &[(&str, EventIdentity)] = &[
    ("cross", CROSS),
    ("circle", CIRCLE),
    ("triangle", TRIANGLE),
    ("square", SQUARE),
    ("l1", L1),
    ("r1", R1),
    ("l2", L2),
    ("r2", R2),
    ("share", SHARE),
    ("options", OPTIONS),
    ("ps", PS),
    ("l3", L3),
    ("r3", R3),
    ("leftjoy_x", LEFTJOY_X),
    ("leftjoy_y", LEFTJOY_Y),
    ("l2_axis", L2_AXIS),
    ("rightjoy_x", RIGHTJOY_X),
    ("rightjoy_y", RIGHTJOY_Y),
    ("r2_axis", R2_AXIS),
    ("dpad_x", DPAD_X),
    ("dpad_y", DPAD_Y),
];

/// Looks up a control by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<EventIdentity> {
    CONTROLS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, id)| id)
}

/// Reverse lookup of [`lookup`].
pub fn name_of(identity: EventIdentity) -> Option<&'static str> {
    CONTROLS
        .iter()
        .find(|&&(_, id)| id == identity)
        .map(|&(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(lookup("Cross"), Some(CROSS));
        assert_eq!(lookup("DPAD_X"), Some(DPAD_X));
        assert_eq!(lookup("select"), None);
    }

    #[test]
    fn test_name_of_round_trips_every_entry() {
        for &(name, id) in CONTROLS {
            assert_eq!(name_of(id), Some(name));
        }
        assert_eq!(name_of(EventIdentity::new(1000)), None);
    }
}
