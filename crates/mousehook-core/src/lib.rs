//! # mousehook-core
//!
//! Pure decode layer for the mousehook global mouse listener: the raw hook
//! record layout, the byte-exact decoder, and the native message-code mapper.
//!
//! This crate is used by the `mousehook` bridge crate and by its tests.
//! It has zero dependencies on OS APIs, threads, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! A Windows low-level mouse hook hands every system-wide mouse event to a
//! callback as a pair of values: a *message code* (which kind of event) and a
//! pointer to a fixed-layout binary *record* (where the cursor was, wheel
//! rotation, flags, timestamp).  This crate turns that pair into one typed
//! value:
//!
//! - **`record`** – The binary layout.  A field table pins every offset and
//!   width, and [`RawMouseRecord`] reads exactly those byte ranges
//!   (little-endian) and nothing else.
//!
//! - **`mapper`** – The message-code table.  Ten codes are defined for this
//!   hook class; [`classify_message`] maps each to a message class, and
//!   [`decode_event`] combines class + record into a [`MouseEvent`].  Codes
//!   outside the table produce no event at all.
//!
//! - **`domain`** – The decoded event types consumers see: [`MouseEvent`],
//!   [`EventKind`], [`EventClass`], [`MouseButton`], [`EventFlags`].

pub mod domain;
pub mod mapper;
pub mod record;

// Re-export the most-used types at the crate root so callers can write
// `mousehook_core::MouseEvent` instead of the full module path.
pub use domain::event::{EventClass, EventFlags, EventKind, MouseButton, MouseEvent};
pub use mapper::{classify_message, decode_event, decode_event_logged, ButtonAction, MessageClass};
pub use record::layout::{RawMouseRecord, RecordError, RECORD_FIELDS, MOUSE_RECORD_SIZE};
