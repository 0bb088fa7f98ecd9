//! Device event codes, the fixed capability set, and the button lookup table.
//!
//! Everything here is plain data: which low-level event codes the virtual
//! device understands, how they map onto the kernel's code space, and which
//! peer-side button identifier translates to which code. The actual kernel
//! I/O lives behind the device trait in the server crate.

// ── Event codes ───────────────────────────────────────────────────────────────

/// Broad kernel event class an [`EventCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Relative-motion events (pointer deltas, wheel notches).
    Relative,
    /// Key and button state changes.
    Key,
}

/// Every low-level event code the service can emit.
///
/// This is the complete closed set: the virtual device is created with
/// exactly these capabilities ([`DEVICE_CAPABILITIES`]) and the translator
/// never produces a code outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    /// Horizontal pointer motion (REL_X).
    RelX,
    /// Vertical pointer motion (REL_Y).
    RelY,
    /// Vertical wheel notches (REL_WHEEL).
    RelWheel,
    /// Horizontal wheel notches (REL_HWHEEL).
    RelHwheel,
    /// Primary mouse button (BTN_LEFT).
    BtnLeft,
    /// Secondary mouse button (BTN_RIGHT).
    BtnRight,
    /// Middle mouse button (BTN_MIDDLE).
    BtnMiddle,
    /// Volume-up media key (KEY_VOLUMEUP).
    KeyVolumeUp,
    /// Volume-down media key (KEY_VOLUMEDOWN).
    KeyVolumeDown,
}

impl EventCode {
    /// Returns which kernel event class this code belongs to.
    pub fn kind(self) -> EventKind {
        match self {
            EventCode::RelX | EventCode::RelY | EventCode::RelWheel | EventCode::RelHwheel => {
                EventKind::Relative
            }
            EventCode::BtnLeft
            | EventCode::BtnRight
            | EventCode::BtnMiddle
            | EventCode::KeyVolumeUp
            | EventCode::KeyVolumeDown => EventKind::Key,
        }
    }

    /// Returns the raw code within the kernel event class, as defined by the
    /// Linux input-event-codes header.
    pub fn raw(self) -> u16 {
        match self {
            EventCode::RelX => 0x00,
            EventCode::RelY => 0x01,
            EventCode::RelHwheel => 0x06,
            EventCode::RelWheel => 0x08,
            EventCode::BtnLeft => 0x110,
            EventCode::BtnRight => 0x111,
            EventCode::BtnMiddle => 0x112,
            EventCode::KeyVolumeDown => 114,
            EventCode::KeyVolumeUp => 115,
        }
    }
}

/// The fixed capability set the virtual device is created with, in
/// registration order.
///
/// Must remain a superset of every code the translator emits; emitting an
/// unregistered code is a programming error, not a runtime condition.
pub const DEVICE_CAPABILITIES: [EventCode; 9] = [
    EventCode::RelWheel,
    EventCode::RelHwheel,
    EventCode::RelX,
    EventCode::RelY,
    EventCode::BtnLeft,
    EventCode::BtnMiddle,
    EventCode::BtnRight,
    EventCode::KeyVolumeUp,
    EventCode::KeyVolumeDown,
];

// ── Button identifier table ───────────────────────────────────────────────────

/// Maps a peer-side button identifier to the device code it drives.
///
/// The table is fixed: 1–3 are the mouse buttons, 201–202 the volume keys.
/// Every other identifier returns `None`, which callers treat as "no action"
/// rather than an error – unknown identifiers from newer remotes are
/// deliberately tolerated.
pub fn button_code(button: u16) -> Option<EventCode> {
    match button {
        1 => Some(EventCode::BtnLeft),
        2 => Some(EventCode::BtnRight),
        3 => Some(EventCode::BtnMiddle),
        201 => Some(EventCode::KeyVolumeUp),
        202 => Some(EventCode::KeyVolumeDown),
        _ => None,
    }
}

// ── Emissions ─────────────────────────────────────────────────────────────────

/// One low-level device write: a code, its value, and whether the write is
/// followed by a synchronization flush.
///
/// When `synchronize` is false the event is buffered into the current input
/// frame; the next synchronized emission closes the frame and makes
/// everything in it visible to consumers atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub code: EventCode,
    pub value: i32,
    pub synchronize: bool,
}
