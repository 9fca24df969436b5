//! Fixed binary layout of the low-level mouse hook record.
//!
//! The OS hands the hook callback a pointer to a fixed-layout structure
//! (the `MSLLHOOKSTRUCT` prefix).  Its first five fields are 32-bit values
//! at fixed offsets, in native (little-endian) byte order:
//!
//! ```text
//! [x:i32 @0][y:i32 @4][mouse_data:i32 @8][flags:u32 @12][time:u32 @16]
//! ```
//!
//! Total record size: 20 bytes.  The decoder reads exactly these byte
//! ranges and no others.  Rather than scattering magic offsets through the
//! decode code, the layout is pinned by the [`RECORD_FIELDS`] table and verified
//! against it in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size in bytes of the raw mouse record read by the decoder.
///
/// The OS structure carries trailing fields past this prefix
/// (`dwExtraInfo`); they are deliberately never read.
pub const MOUSE_RECORD_SIZE: usize = 20;

/// One field of the raw record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, for diagnostics and layout tests.
    pub name: &'static str,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Field width in bytes.
    pub width: usize,
    /// Whether the field is interpreted as a signed integer.
    pub signed: bool,
}

/// The complete layout table for the raw mouse record.
///
/// This is the single source of truth for the record's shape; the decode
/// and encode functions below must agree with it (enforced by unit tests).
pub const RECORD_FIELDS: [FieldSpec; 5] = [
    FieldSpec { name: "x", offset: 0, width: 4, signed: true },
    FieldSpec { name: "y", offset: 4, width: 4, signed: true },
    FieldSpec { name: "mouse_data", offset: 8, width: 4, signed: true },
    FieldSpec { name: "flags", offset: 12, width: 4, signed: false },
    FieldSpec { name: "time", offset: 16, width: 4, signed: false },
];

/// Bit 0 of `flags`: the event was synthetically injected.
pub const FLAG_INJECTED: u32 = 0x0000_0001;

/// Bit 1 of `flags`: the event was injected by a lower-integrity process.
pub const FLAG_LOWER_IL_INJECTED: u32 = 0x0000_0002;

/// Errors produced when constructing a record from an untrusted slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The slice is shorter than [`MOUSE_RECORD_SIZE`].
    #[error("raw mouse record too short: need {MOUSE_RECORD_SIZE} bytes, got {0}")]
    TooShort(usize),
}

/// The decoded raw hook record, field for field.
///
/// Materializes transiently for one callback invocation; it is always
/// copied out of the OS-owned buffer, never borrowed past the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMouseRecord {
    /// Absolute X in virtual screen coordinates (multi-monitor aware).
    pub x: i32,
    /// Absolute Y in virtual screen coordinates.
    pub y: i32,
    /// Packed auxiliary data: the high word carries the wheel delta or the
    /// X-button identifier depending on the message; the low word is zero.
    pub mouse_data: i32,
    /// Event flag bits; see [`FLAG_INJECTED`] and [`FLAG_LOWER_IL_INJECTED`].
    pub flags: u32,
    /// Milliseconds since system start.
    pub time_ms: u32,
}

impl RawMouseRecord {
    /// Decodes a record from exactly [`MOUSE_RECORD_SIZE`] bytes.
    ///
    /// The fixed-size parameter type makes the hook contract's length
    /// guarantee a compile-time fact: there is no short-buffer path here.
    /// All offsets come from the [`RECORD_FIELDS`] table.
    pub fn from_bytes(bytes: &[u8; MOUSE_RECORD_SIZE]) -> Self {
        let [x, y, mouse_data, flags, time] = RECORD_FIELDS;
        Self {
            x: read_field(bytes, &x) as i32,
            y: read_field(bytes, &y) as i32,
            mouse_data: read_field(bytes, &mouse_data) as i32,
            flags: read_field(bytes, &flags),
            time_ms: read_field(bytes, &time),
        }
    }

    /// Decodes a record from the first [`MOUSE_RECORD_SIZE`] bytes of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::TooShort`] if the slice cannot hold a full
    /// record.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecordError> {
        let fixed: &[u8; MOUSE_RECORD_SIZE] = bytes
            .get(..MOUSE_RECORD_SIZE)
            .and_then(|prefix| prefix.try_into().ok())
            .ok_or(RecordError::TooShort(bytes.len()))?;
        Ok(Self::from_bytes(fixed))
    }

    /// Encodes the record back to its wire layout.
    ///
    /// Used by tests and the mock backend to build byte-exact records.
    pub fn to_bytes(&self) -> [u8; MOUSE_RECORD_SIZE] {
        let mut buf = [0u8; MOUSE_RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.x.to_le_bytes());
        buf[4..8].copy_from_slice(&self.y.to_le_bytes());
        buf[8..12].copy_from_slice(&self.mouse_data.to_le_bytes());
        buf[12..16].copy_from_slice(&self.flags.to_le_bytes());
        buf[16..20].copy_from_slice(&self.time_ms.to_le_bytes());
        buf
    }
}

/// Reads one 32-bit little-endian field at its tabled offset.
///
/// Every field in [`RECORD_FIELDS`] is four bytes wide and ends within the
/// record, so the indexing below cannot go out of bounds. Signedness is
/// applied by the caller per the table.
fn read_field(bytes: &[u8; MOUSE_RECORD_SIZE], field: &FieldSpec) -> u32 {
    debug_assert_eq!(field.width, 4);
    u32::from_le_bytes([
        bytes[field.offset],
        bytes[field.offset + 1],
        bytes[field.offset + 2],
        bytes[field.offset + 3],
    ])
}
