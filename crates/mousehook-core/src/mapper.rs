//! Native message-code mapper and the decode pipeline entry point.
//!
//! A low-level mouse hook delivers exactly ten message codes.  This module
//! owns the closed table mapping each code to a [`MessageClass`], and the
//! [`decode_event`] function that combines a classification with a decoded
//! [`RawMouseRecord`] into a [`MouseEvent`].
//!
//! Codes outside the table map to nothing: the hook subscription can never
//! legitimately deliver them, so they are dropped rather than reported as
//! errors.

use tracing::trace;

use crate::domain::event::{EventFlags, EventKind, MouseButton, MouseEvent};
use crate::record::layout::RawMouseRecord;

// ── Native message codes ──────────────────────────────────────────────────────

pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;

/// Every message code the hook subscription can deliver.
pub const ALL_MESSAGE_CODES: [u32; 10] = [
    WM_MOUSEMOVE,
    WM_LBUTTONDOWN,
    WM_LBUTTONUP,
    WM_RBUTTONDOWN,
    WM_RBUTTONUP,
    WM_MBUTTONDOWN,
    WM_MBUTTONUP,
    WM_MOUSEWHEEL,
    WM_XBUTTONDOWN,
    WM_XBUTTONUP,
];

/// X-button identifiers carried in the high word of `mouse_data`.
const XBUTTON1: u16 = 0x0001;

// ── Classification ────────────────────────────────────────────────────────────

/// Button transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Down,
    Up,
}

/// Semantic class of a native message code.
///
/// For left/right/middle buttons the identity is part of the code itself
/// and is resolved here; for X buttons it lives in the record's
/// `mouse_data` high word, so classification leaves it `None` and
/// [`decode_event`] fills it in.  Either way, button identity is derived
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Move,
    Button {
        action: ButtonAction,
        button: Option<MouseButton>,
    },
    Wheel,
}

/// Maps a native message code to its semantic class.
///
/// Returns `None` for any code outside the ten-entry table.
pub fn classify_message(code: u32) -> Option<MessageClass> {
    use ButtonAction::{Down, Up};

    let class = match code {
        WM_MOUSEMOVE => MessageClass::Move,
        WM_LBUTTONDOWN => MessageClass::Button { action: Down, button: Some(MouseButton::Left) },
        WM_LBUTTONUP => MessageClass::Button { action: Up, button: Some(MouseButton::Left) },
        WM_RBUTTONDOWN => MessageClass::Button { action: Down, button: Some(MouseButton::Right) },
        WM_RBUTTONUP => MessageClass::Button { action: Up, button: Some(MouseButton::Right) },
        WM_MBUTTONDOWN => MessageClass::Button { action: Down, button: Some(MouseButton::Middle) },
        WM_MBUTTONUP => MessageClass::Button { action: Up, button: Some(MouseButton::Middle) },
        WM_MOUSEWHEEL => MessageClass::Wheel,
        WM_XBUTTONDOWN => MessageClass::Button { action: Down, button: None },
        WM_XBUTTONUP => MessageClass::Button { action: Up, button: None },
        _ => return None,
    };
    Some(class)
}

// ── Decode pipeline ───────────────────────────────────────────────────────────

/// Extracts the high word of `mouse_data` as an unsigned 16-bit quantity.
fn mouse_data_high_word(record: &RawMouseRecord) -> u16 {
    ((record.mouse_data >> 16) & 0xFFFF) as u16
}

/// Sign-extends the wheel delta from the `mouse_data` high word.
///
/// The high word is a signed 16-bit value; a naive unsigned read would
/// invert downward (negative) wheel motion.
fn wheel_delta(record: &RawMouseRecord) -> i32 {
    let mut delta = i32::from(mouse_data_high_word(record));
    if delta >= 0x8000 {
        delta -= 0x10000;
    }
    delta
}

/// Resolves the X-button identity from the `mouse_data` high word.
fn x_button(record: &RawMouseRecord) -> MouseButton {
    if mouse_data_high_word(record) == XBUTTON1 {
        MouseButton::X1
    } else {
        MouseButton::X2
    }
}

/// Decodes one hook callback invocation into a [`MouseEvent`].
///
/// Returns `None` when `code` is not in the message table; the caller
/// forwards nothing in that case.
pub fn decode_event(code: u32, record: &RawMouseRecord) -> Option<MouseEvent> {
    let kind = match classify_message(code)? {
        MessageClass::Move => EventKind::Move,
        MessageClass::Wheel => EventKind::Wheel { delta: wheel_delta(record) },
        MessageClass::Button { action, button } => {
            let button = button.unwrap_or_else(|| x_button(record));
            match action {
                ButtonAction::Down => EventKind::ButtonDown(button),
                ButtonAction::Up => EventKind::ButtonUp(button),
            }
        }
    };

    Some(MouseEvent {
        kind,
        x: record.x,
        y: record.y,
        flags: EventFlags::from_bits(record.flags),
        time_ms: record.time_ms,
    })
}

/// [`decode_event`] with trace logging for the dropped-code path.
///
/// The hook callback uses this variant so closed-table gaps show up under
/// `RUST_LOG=trace` without ever being surfaced as errors.
pub fn decode_event_logged(code: u32, record: &RawMouseRecord) -> Option<MouseEvent> {
    let event = decode_event(code, record);
    if event.is_none() {
        trace!("dropping unmapped mouse message 0x{code:04X}");
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventClass;

    fn record_with_data(mouse_data: i32) -> RawMouseRecord {
        RawMouseRecord {
            x: 640,
            y: 480,
            mouse_data,
            flags: 0,
            time_ms: 1000,
        }
    }

    #[test]
    fn test_every_known_code_maps_to_exactly_one_class() {
        for code in ALL_MESSAGE_CODES {
            assert!(
                classify_message(code).is_some(),
                "code 0x{code:04X} must be in the table"
            );
        }
    }

    #[test]
    fn test_unknown_codes_map_to_nothing() {
        // 0x0203 (double-click) and 0x0206 sit between table entries but
        // are never delivered by the hook subscription.
        for code in [0x0000, 0x0203, 0x0206, 0x0209, 0x020D, 0x0299, u32::MAX] {
            assert_eq!(classify_message(code), None);
            assert_eq!(decode_event(code, &record_with_data(0)), None);
        }
    }

    #[test]
    fn test_button_codes_resolve_identity_in_classification() {
        let class = classify_message(WM_RBUTTONDOWN).unwrap();
        assert_eq!(
            class,
            MessageClass::Button {
                action: ButtonAction::Down,
                button: Some(MouseButton::Right),
            }
        );
    }

    #[test]
    fn test_move_decodes_position_and_timestamp() {
        let event = decode_event(WM_MOUSEMOVE, &record_with_data(0)).unwrap();
        assert_eq!(event.kind, EventKind::Move);
        assert_eq!((event.x, event.y), (640, 480));
        assert_eq!(event.time_ms, 1000);
    }

    #[test]
    fn test_wheel_positive_delta() {
        // High word 0x0078 = +120 (one detent away from the user).
        let event = decode_event(WM_MOUSEWHEEL, &record_with_data(0x0078_0000)).unwrap();
        assert_eq!(event.kind, EventKind::Wheel { delta: 120 });
    }

    #[test]
    fn test_wheel_negative_delta_is_sign_extended() {
        // High word 0x8000 is signed -32768; an unsigned read would
        // report +32768 and invert the scroll direction.
        let event = decode_event(WM_MOUSEWHEEL, &record_with_data(0x8000_0000u32 as i32)).unwrap();
        assert_eq!(event.kind, EventKind::Wheel { delta: -32768 });

        // High word 0xFF88 = -120 (one detent toward the user).
        let event = decode_event(WM_MOUSEWHEEL, &record_with_data(0xFF88_0000u32 as i32)).unwrap();
        assert_eq!(event.kind, EventKind::Wheel { delta: -120 });
    }

    #[test]
    fn test_x_button_identity_from_mouse_data() {
        let down = decode_event(WM_XBUTTONDOWN, &record_with_data(0x0001_0000)).unwrap();
        assert_eq!(down.kind, EventKind::ButtonDown(MouseButton::X1));

        let up = decode_event(WM_XBUTTONUP, &record_with_data(0x0002_0000)).unwrap();
        assert_eq!(up.kind, EventKind::ButtonUp(MouseButton::X2));
    }

    #[test]
    fn test_all_codes_decode_to_their_class() {
        let expected = [
            (WM_MOUSEMOVE, EventClass::Move),
            (WM_LBUTTONDOWN, EventClass::ButtonDown),
            (WM_LBUTTONUP, EventClass::ButtonUp),
            (WM_RBUTTONDOWN, EventClass::ButtonDown),
            (WM_RBUTTONUP, EventClass::ButtonUp),
            (WM_MBUTTONDOWN, EventClass::ButtonDown),
            (WM_MBUTTONUP, EventClass::ButtonUp),
            (WM_MOUSEWHEEL, EventClass::Wheel),
            (WM_XBUTTONDOWN, EventClass::ButtonDown),
            (WM_XBUTTONUP, EventClass::ButtonUp),
        ];
        for (code, class) in expected {
            let event = decode_event(code, &record_with_data(0x0001_0000)).unwrap();
            assert_eq!(event.class(), class, "code 0x{code:04X}");
        }
    }

    #[test]
    fn test_flags_propagate_into_event() {
        let mut record = record_with_data(0);
        record.flags = 0x03;
        let event = decode_event(WM_MOUSEMOVE, &record).unwrap();
        assert!(event.flags.injected);
        assert!(event.flags.lower_integrity_injected);
    }
}
