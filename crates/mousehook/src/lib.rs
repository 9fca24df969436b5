//! mousehook library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::dispatch::{MouseHook, SubscriptionId};
pub use infrastructure::hook::{HookBackend, HookError};

// Event types come from the core crate; re-export them so most consumers
// only depend on `mousehook` itself.
pub use mousehook_core::{EventClass, EventFlags, EventKind, MouseButton, MouseEvent};
