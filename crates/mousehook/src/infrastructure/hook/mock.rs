//! Mock hook source for unit and integration testing.
//!
//! Allows tests to push synthetic events through the same decode pipeline
//! the real hook callback uses, without a Windows message pump or OS hooks.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use mousehook_core::{decode_event, MouseEvent, RawMouseRecord};

use super::{HookBackend, HookError};

/// A mock implementation of [`HookBackend`] that lets tests inject events.
pub struct MockHookSource {
    sender: Arc<Mutex<Option<Sender<MouseEvent>>>>,
}

impl MockHookSource {
    /// Creates a new mock hook source.
    pub fn new() -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
        }
    }

    /// Injects one raw callback invocation: a message code plus record bytes.
    ///
    /// Runs the real decode pipeline, so unmapped codes are dropped exactly
    /// as the hook callback drops them. Returns `true` if an event was
    /// forwarded.
    ///
    /// Injection after `stop()` is silently discarded — this models the OS
    /// hook chain still delivering to a hook whose session has been closed.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than a full record; the hook contract
    /// guarantees full-size records, so a short buffer is a test bug.
    pub fn inject_raw(&self, code: u32, bytes: &[u8]) -> bool {
        let record = RawMouseRecord::from_slice(bytes).expect("full-size record required");
        self.inject_record(code, &record)
    }

    /// Injects a typed record through the decode pipeline.
    pub fn inject_record(&self, code: u32, record: &RawMouseRecord) -> bool {
        match decode_event(code, record) {
            Some(event) => self.inject_event(event),
            None => false,
        }
    }

    /// Injects an already-decoded event, as if produced by the callback.
    pub fn inject_event(&self, event: MouseEvent) -> bool {
        let guard = self.sender.lock().expect("lock poisoned");
        match guard.as_ref() {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }
}

impl Default for MockHookSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HookBackend for MockHookSource {
    fn start(&self) -> Result<mpsc::Receiver<MouseEvent>, HookError> {
        let mut guard = self.sender.lock().expect("lock poisoned");
        if guard.is_some() {
            return Err(HookError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel; the dispatcher drains what
        // is already queued and then observes the disconnect.
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

/// A backend whose installation always fails, for construction-failure tests.
pub struct FailingHookSource;

impl HookBackend for FailingHookSource {
    fn start(&self) -> Result<mpsc::Receiver<MouseEvent>, HookError> {
        Err(HookError::InstallFailed("simulated OS rejection".to_string()))
    }

    fn stop(&self) {}
}
