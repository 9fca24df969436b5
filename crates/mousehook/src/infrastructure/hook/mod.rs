//! Hook backend abstraction.
//!
//! On Windows, the production backend installs a `WH_MOUSE_LL` hook on a
//! dedicated Win32 message-pump thread. Decoded events are placed into a
//! channel whose receive side is handed to the dispatcher.
//!
//! # Real-time constraint
//!
//! The hook callback runs synchronously on the pump thread for every
//! qualifying event system-wide and must complete within the OS hook
//! timeout (~300ms budget, microseconds in practice). All processing past
//! decode-and-enqueue is deferred out of the callback via the channel.
//!
//! # Testability
//!
//! The [`HookBackend`] trait allows unit tests to inject synthetic events
//! without requiring Windows hooks; see [`mock::MockHookSource`].

use std::sync::mpsc;

use mousehook_core::MouseEvent;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Error type for hook backend operations.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The OS rejected the hook registration, or the pump thread could not
    /// be brought up. Fatal to construction; no session exists afterwards.
    #[error("failed to install mouse hook: {0}")]
    InstallFailed(String),
    /// A hook session is already live in this process.
    #[error("a mouse hook session is already active in this process")]
    AlreadyStarted,
    /// This build has no hook backend for the current OS.
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting mouse event production.
///
/// The production implementation installs the Windows hook; tests use
/// [`mock::MockHookSource`]. `Send + Sync` so the façade holding the
/// backend can itself be shared across consumer threads (subscribe and
/// close from anywhere); implementations keep their mutable state behind
/// atomics and mutexes.
#[cfg_attr(test, mockall::automock)]
pub trait HookBackend: Send + Sync {
    /// Installs the hook and returns the receive side of the event bridge.
    ///
    /// Events arrive in OS delivery order. The send side never blocks the
    /// pump thread.
    ///
    /// # Errors
    ///
    /// Fails atomically: on error no hook, thread, or channel remains.
    fn start(&self) -> Result<mpsc::Receiver<MouseEvent>, HookError>;

    /// Uninstalls the hook and releases all OS resources.
    ///
    /// Stops event forwarding first, then tears down the pump. Idempotent:
    /// repeated calls (or a call on a never-started backend) are no-ops.
    fn stop(&self);
}
