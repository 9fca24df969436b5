//! MouseHook: the public listener façade and consumer-side dispatcher.
//!
//! Construction installs the hook through a [`HookBackend`] and spawns a
//! dedicated dispatch thread. The dispatch thread drains the backend's
//! channel in arrival order and fans each event out to the listeners
//! registered for its [`EventClass`]. Consumer callbacks therefore run on
//! the dispatch thread, never on the hook's message pump: a slow listener
//! delays other listeners, but can never stall system-wide input delivery.
//!
//! Async consumers use [`MouseHook::stream`], which bridges a subscription
//! into a tokio unbounded channel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, info};
use uuid::Uuid;

use mousehook_core::{EventClass, MouseEvent};

use crate::infrastructure::hook::{HookBackend, HookError};
#[cfg(target_os = "windows")]
use crate::infrastructure::hook::windows::WindowsHookBackend;

/// Opaque handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// One registered listener.
struct ListenerEntry {
    id: SubscriptionId,
    callback: Arc<dyn Fn(&MouseEvent) + Send + Sync>,
}

/// Listener registry keyed by event class.
///
/// Shared between the dispatch thread and the subscribing threads.
#[derive(Default)]
struct ListenerRegistry {
    entries: Mutex<HashMap<EventClass, Vec<ListenerEntry>>>,
}

impl ListenerRegistry {
    fn subscribe(
        &self,
        class: EventClass,
        callback: Arc<dyn Fn(&MouseEvent) + Send + Sync>,
    ) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        let mut entries = self.entries.lock().expect("listener registry poisoned");
        entries
            .entry(class)
            .or_default()
            .push(ListenerEntry { id, callback });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut entries = self.entries.lock().expect("listener registry poisoned");
        for listeners in entries.values_mut() {
            listeners.retain(|entry| entry.id != id);
        }
    }

    /// Fans one event out to every listener of its class.
    ///
    /// Callbacks are cloned out of the registry first, so a listener may
    /// subscribe or unsubscribe from inside its own callback.
    fn dispatch(&self, event: &MouseEvent) {
        let targets: Vec<Arc<dyn Fn(&MouseEvent) + Send + Sync>> = {
            let entries = self.entries.lock().expect("listener registry poisoned");
            match entries.get(&event.class()) {
                Some(listeners) => listeners.iter().map(|e| Arc::clone(&e.callback)).collect(),
                None => return,
            }
        };
        for callback in targets {
            callback(event);
        }
    }
}

/// Global system-wide mouse event listener.
///
/// Owns the hook session for its whole lifetime: a successfully
/// constructed `MouseHook` has a live hook and a running pump; a failed
/// construction leaves nothing behind. [`close`] tears everything down
/// deterministically and is safe to call any number of times; dropping the
/// hook closes it as well.
///
/// [`close`]: MouseHook::close
pub struct MouseHook {
    backend: Box<dyn HookBackend>,
    registry: Arc<ListenerRegistry>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl std::fmt::Debug for MouseHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseHook")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl MouseHook {
    /// Installs the platform hook and starts dispatching.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InstallFailed`] if the OS rejects the hook
    /// registration (construction fails atomically), or
    /// [`HookError::UnsupportedPlatform`] on non-Windows builds.
    pub fn new() -> Result<Self, HookError> {
        #[cfg(target_os = "windows")]
        {
            Self::with_backend(Box::new(WindowsHookBackend::new()))
        }
        #[cfg(not(target_os = "windows"))]
        {
            Err(HookError::UnsupportedPlatform(format!(
                "no mouse hook backend for {}",
                std::env::consts::OS
            )))
        }
    }

    /// Installs the hook through an explicit backend.
    ///
    /// Used by `new()` in production and by tests with mock backends.
    pub fn with_backend(backend: Box<dyn HookBackend>) -> Result<Self, HookError> {
        let receiver = backend.start()?;
        let registry = Arc::new(ListenerRegistry::default());

        let dispatch_registry = Arc::clone(&registry);
        let dispatcher = thread::Builder::new()
            .name("mouse-dispatch".to_string())
            .spawn(move || {
                // Ends when the backend drops its sender during stop(),
                // after draining everything already queued.
                while let Ok(event) = receiver.recv() {
                    dispatch_registry.dispatch(&event);
                }
                debug!("mouse dispatch thread exiting");
            })
            .map_err(|e| {
                backend.stop();
                HookError::InstallFailed(format!("failed to spawn dispatch thread: {e}"))
            })?;

        info!("mouse hook session open");
        Ok(Self {
            backend,
            registry,
            dispatcher: Mutex::new(Some(dispatcher)),
            closed: AtomicBool::new(false),
        })
    }

    /// Registers a listener for one event class.
    ///
    /// The callback runs on the dispatch thread for every matching event,
    /// in arrival order.
    pub fn subscribe<F>(&self, class: EventClass, callback: F) -> SubscriptionId
    where
        F: Fn(&MouseEvent) + Send + Sync + 'static,
    {
        self.registry.subscribe(class, Arc::new(callback))
    }

    /// Removes a previously registered listener.
    ///
    /// Removing an id that was already removed is a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.registry.unsubscribe(id);
    }

    /// Bridges one event class into a tokio unbounded channel.
    ///
    /// Returns the subscription id (for [`unsubscribe`]) and the receive
    /// side. The dispatch thread's send never blocks; if the receiver is
    /// dropped, subsequent events for it are discarded.
    ///
    /// [`unsubscribe`]: MouseHook::unsubscribe
    pub fn stream(&self, class: EventClass) -> (SubscriptionId, UnboundedReceiver<MouseEvent>) {
        let (tx, rx) = unbounded_channel();
        let id = self.subscribe(class, move |event| {
            let _ = tx.send(*event);
        });
        (id, rx)
    }

    /// Closes the hook session and releases all native resources.
    ///
    /// Sequencing: the backend stops forwarding and tears down its pump,
    /// closing the event channel; the dispatch thread then drains whatever
    /// was already queued and exits; finally the thread is joined, so every
    /// event delivered before `close` was called has been dispatched by the
    /// time it returns. Idempotent.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.backend.stop();
        if let Some(dispatcher) = self.dispatcher.lock().expect("lock poisoned").take() {
            let _ = dispatcher.join();
        }
        info!("mouse hook session closed");
    }
}

impl Drop for MouseHook {
    fn drop(&mut self) {
        self.close();
    }
}
