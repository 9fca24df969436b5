//! Integration tests for the mousehook-core decode pipeline.
//!
//! These tests drive the full byte path through the public API: raw
//! little-endian bytes → [`RawMouseRecord`] → [`decode_event`] →
//! [`MouseEvent`], the exact path the hook callback takes.

use mousehook_core::{
    decode_event,
    mapper::{
        WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONUP, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_RBUTTONDOWN,
        WM_XBUTTONDOWN,
    },
    EventFlags, EventKind, MouseButton, MouseEvent, RawMouseRecord, MOUSE_RECORD_SIZE,
};

/// Builds wire-exact record bytes and decodes them through the public API.
fn decode_bytes(code: u32, x: i32, y: i32, mouse_data: i32, flags: u32, time_ms: u32) -> Option<MouseEvent> {
    let record = RawMouseRecord {
        x,
        y,
        mouse_data,
        flags,
        time_ms,
    };
    let bytes = record.to_bytes();
    assert_eq!(bytes.len(), MOUSE_RECORD_SIZE);

    let reread = RawMouseRecord::from_bytes(&bytes);
    assert_eq!(reread, record, "record must survive the byte round trip");
    decode_event(code, &reread)
}

#[test]
fn test_move_event_full_byte_path() {
    let event = decode_bytes(WM_MOUSEMOVE, 1920, -480, 0, 0, 42).unwrap();
    assert_eq!(event.kind, EventKind::Move);
    assert_eq!((event.x, event.y), (1920, -480));
    assert_eq!(event.flags, EventFlags::default());
    assert_eq!(event.time_ms, 42);
}

#[test]
fn test_left_button_press_and_release_full_byte_path() {
    let down = decode_bytes(WM_LBUTTONDOWN, 5, 6, 0, 0, 1).unwrap();
    assert_eq!(down.kind, EventKind::ButtonDown(MouseButton::Left));

    let up = decode_bytes(WM_LBUTTONUP, 5, 6, 0, 0, 2).unwrap();
    assert_eq!(up.kind, EventKind::ButtonUp(MouseButton::Left));
}

#[test]
fn test_wheel_sign_extension_full_byte_path() {
    // One detent toward the user: high word 0xFF88 must read as -120.
    let down_scroll = decode_bytes(WM_MOUSEWHEEL, 0, 0, 0xFF88_0000u32 as i32, 0, 3).unwrap();
    assert_eq!(down_scroll.kind, EventKind::Wheel { delta: -120 });

    let up_scroll = decode_bytes(WM_MOUSEWHEEL, 0, 0, 0x0078_0000, 0, 4).unwrap();
    assert_eq!(up_scroll.kind, EventKind::Wheel { delta: 120 });
}

#[test]
fn test_x_button_identity_full_byte_path() {
    let event = decode_bytes(WM_XBUTTONDOWN, 0, 0, 0x0002_0000, 0, 5).unwrap();
    assert_eq!(event.kind, EventKind::ButtonDown(MouseButton::X2));
}

#[test]
fn test_injected_flags_full_byte_path() {
    let event = decode_bytes(WM_RBUTTONDOWN, 0, 0, 0, 0x03, 6).unwrap();
    assert!(event.flags.injected);
    assert!(event.flags.lower_integrity_injected);

    let physical = decode_bytes(WM_MBUTTONUP, 0, 0, 0, 0x00, 7).unwrap();
    assert_eq!(physical.flags, EventFlags::default());
}

#[test]
fn test_unknown_code_yields_no_event() {
    assert_eq!(decode_bytes(0x0299, 0, 0, 0, 0, 8), None);
}
