//! Structured mouse event types.
//!
//! A [`MouseEvent`] is the fully decoded, semantically typed result of one
//! hook callback invocation.  Events are plain values: they are copied
//! across the pump/consumer thread boundary, never shared.

use serde::{Deserialize, Serialize};

use crate::record::layout::{FLAG_INJECTED, FLAG_LOWER_IL_INJECTED};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// The decoded event kind, carrying per-kind payload.
///
/// Button kinds keep their button identity inline, so consumers that want
/// per-button granularity never re-derive it; consumers that want the
/// coarser surface use [`EventKind::class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The cursor moved to an absolute screen position.
    Move,
    /// A button was pressed.
    ButtonDown(MouseButton),
    /// A button was released.
    ButtonUp(MouseButton),
    /// The vertical wheel was rotated.  Positive = away from the user,
    /// negative = toward the user, conventionally in multiples of 120.
    Wheel {
        delta: i32,
    },
}

/// Coarse event classification used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventClass {
    Move,
    ButtonDown,
    ButtonUp,
    Wheel,
}

impl EventKind {
    /// Collapses the kind to its subscription class.
    pub fn class(&self) -> EventClass {
        match self {
            EventKind::Move => EventClass::Move,
            EventKind::ButtonDown(_) => EventClass::ButtonDown,
            EventKind::ButtonUp(_) => EventClass::ButtonUp,
            EventKind::Wheel { .. } => EventClass::Wheel,
        }
    }
}

/// Injection flags decoded from the raw record's flag bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlags {
    /// The event was synthetically injected (bit 0).
    pub injected: bool,
    /// The event was injected by a lower-integrity process (bit 1).
    pub lower_integrity_injected: bool,
}

impl EventFlags {
    /// Decodes the raw flag word.  Reserved bits are ignored.
    pub fn from_bits(raw: u32) -> Self {
        Self {
            injected: raw & FLAG_INJECTED != 0,
            lower_integrity_injected: raw & FLAG_LOWER_IL_INJECTED != 0,
        }
    }
}

/// A fully decoded, system-wide mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// What happened.
    pub kind: EventKind,
    /// Absolute X in virtual screen coordinates.
    pub x: i32,
    /// Absolute Y in virtual screen coordinates.
    pub y: i32,
    /// Injection flags.
    pub flags: EventFlags,
    /// Milliseconds since system start, from the raw record.
    pub time_ms: u32,
}

impl MouseEvent {
    /// Returns the subscription class of this event.
    pub fn class(&self) -> EventClass {
        self.kind.class()
    }

    /// Returns the button for button events, `None` otherwise.
    pub fn button(&self) -> Option<MouseButton> {
        match self.kind {
            EventKind::ButtonDown(b) | EventKind::ButtonUp(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the signed wheel delta for wheel events, `None` otherwise.
    pub fn wheel_delta(&self) -> Option<i32> {
        match self.kind {
            EventKind::Wheel { delta } => Some(delta),
            _ => None,
        }
    }
}
