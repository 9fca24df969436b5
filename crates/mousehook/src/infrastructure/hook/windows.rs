//! Windows low-level mouse hook backend.
//!
//! Installs a `WH_MOUSE_LL` hook on a dedicated Win32 message-pump thread.
//! The pump thread exists solely to keep `GetMessageW` occupied: the OS
//! delivers hook callbacks on the thread that installed the hook, but only
//! while that thread is servicing its message queue.
//!
//! Shutdown never posts `WM_QUIT` from the pump thread itself — that call
//! could not run while the pump is blocked inside `GetMessageW`. The quit
//! message is always posted from the caller's thread via
//! `PostThreadMessageW`, after which the pump unblocks, unhooks, and exits.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, HC_ACTION, HHOOK, MSG, WH_MOUSE_LL, WM_QUIT,
};

use mousehook_core::{decode_event_logged, MouseEvent, RawMouseRecord, MOUSE_RECORD_SIZE};

use super::{HookBackend, HookError};

/// Send side of the event bridge, read by the hook callback.
///
/// `WH_MOUSE_LL` hook procs receive no user-data pointer, so the sender
/// lives in a process-global. It is `Some` exactly while a session is
/// live; [`WindowsHookBackend::stop`] clears it before tearing down the
/// pump, which both stops forwarding and closes the consumer's channel.
/// The lock is only ever held for the duration of one `send`, so the
/// callback never waits on a slow consumer.
static EVENT_SENDER: Mutex<Option<Sender<MouseEvent>>> = Mutex::new(None);

/// Windows low-level mouse hook backend.
///
/// At most one may be live per process at a time; a clean [`stop`] makes
/// room for a new session.
///
/// [`stop`]: WindowsHookBackend::stop
pub struct WindowsHookBackend {
    /// `false` exactly while this instance owns the live session. Starts
    /// `true` so that `stop()` (or `Drop`) on a backend that never
    /// installed anything is a no-op — in particular it must never clear
    /// [`EVENT_SENDER`] out from under a session owned by another
    /// instance. Also makes `stop` idempotent.
    stopped: AtomicBool,
    /// Thread id of the pump thread, target for the `WM_QUIT` post.
    pump_thread_id: Mutex<Option<u32>>,
    /// Join handle of the pump thread.
    pump_thread: Mutex<Option<JoinHandle<()>>>,
}

impl WindowsHookBackend {
    /// Creates a new (unstarted) backend instance.
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(true),
            pump_thread_id: Mutex::new(None),
            pump_thread: Mutex::new(None),
        }
    }
}

impl Default for WindowsHookBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HookBackend for WindowsHookBackend {
    fn start(&self) -> Result<mpsc::Receiver<MouseEvent>, HookError> {
        let (tx, rx) = mpsc::channel::<MouseEvent>();

        // Register the global sender before the hook can fire.
        {
            let mut guard = EVENT_SENDER.lock().expect("EVENT_SENDER lock poisoned");
            if guard.is_some() {
                return Err(HookError::AlreadyStarted);
            }
            *guard = Some(tx);
        }

        // The pump thread reports hook-installation success or failure back
        // over this channel before entering its blocking loop.
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

        let pump = thread::Builder::new()
            .name("mouse-hook-pump".to_string())
            .spawn(move || run_hook_message_pump(ready_tx))
            .map_err(|e| {
                clear_event_sender();
                HookError::InstallFailed(format!("failed to spawn pump thread: {e}"))
            })?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                *self.pump_thread_id.lock().expect("lock poisoned") = Some(thread_id);
                *self.pump_thread.lock().expect("lock poisoned") = Some(pump);
                // This instance now owns the live session; arm stop().
                self.stopped.store(false, Ordering::SeqCst);
                info!("WH_MOUSE_LL hook installed (pump thread {thread_id})");
                Ok(rx)
            }
            Ok(Err(os_error)) => {
                // The OS rejected the registration; the pump thread is
                // already on its way out. Release everything acquired so
                // far before surfacing the failure.
                clear_event_sender();
                let _ = pump.join();
                Err(HookError::InstallFailed(os_error))
            }
            Err(_) => {
                clear_event_sender();
                let _ = pump.join();
                Err(HookError::InstallFailed(
                    "pump thread exited before reporting hook status".to_string(),
                ))
            }
        }
    }

    fn stop(&self) {
        // No-op unless this instance owns the live session: a backend
        // whose start() never succeeded (or already stopped) must not
        // touch another session's state.
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }

        // Release order: stop forwarding first, then unblock the pump. The
        // hook itself is unregistered on the pump thread once its loop
        // exits, before the thread terminates.
        clear_event_sender();

        if let Some(thread_id) = self.pump_thread_id.lock().expect("lock poisoned").take() {
            // SAFETY: Posting to another thread's queue; the id was obtained
            // from the live pump thread during start().
            unsafe {
                let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
            }
        }

        if let Some(pump) = self.pump_thread.lock().expect("lock poisoned").take() {
            let _ = pump.join();
        }
        debug!("mouse hook session closed");
    }
}

impl Drop for WindowsHookBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clear_event_sender() {
    *EVENT_SENDER.lock().expect("EVENT_SENDER lock poisoned") = None;
}

/// Entry point for the dedicated Win32 message-pump thread.
///
/// Installs the hook, reports the outcome over `ready_tx`, then blocks in
/// the message loop until `WM_QUIT` arrives from [`WindowsHookBackend::stop`].
fn run_hook_message_pump(ready_tx: Sender<Result<u32, String>>) {
    // SAFETY: SetWindowsHookExW requires the calling thread to run a message
    // loop, which this thread does below. A low-level hook needs no module
    // handle: the callback is called in-process, never injected.
    let mouse_hook: HHOOK = match unsafe {
        SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0)
    } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("SetWindowsHookExW failed: {e}")));
            return;
        }
    };

    // SAFETY: No pointer arguments; returns the calling thread's id.
    let thread_id = unsafe { GetCurrentThreadId() };
    if ready_tx.send(Ok(thread_id)).is_err() {
        // start() gave up on us; unhook and bail out.
        // SAFETY: `mouse_hook` is the live handle installed above.
        unsafe {
            let _ = UnhookWindowsHookEx(mouse_hook);
        }
        return;
    }

    // Win32 message loop – blocks until WM_QUIT is posted. No message from
    // this queue is ever forwarded; the loop exists to keep the hook alive.
    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        // Unhook strictly after the loop: the OS must never invoke a
        // callback whose session is being torn down beneath it.
        let _ = UnhookWindowsHookEx(mouse_hook);
    }
    debug!("mouse hook pump thread exiting");
}

/// Low-level mouse hook callback.
///
/// # Safety
///
/// Called by Windows on the pump thread for every system-wide mouse event;
/// must return quickly (< ~300ms) to avoid hook removal by the OS. The
/// only work done here is a 20-byte copy, a table lookup, and a
/// non-blocking channel send.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // The hook contract guarantees a non-null record pointer for
    // n_code == HC_ACTION; a null here is unreachable, so do not decode.
    if l_param.0 != 0 {
        // SAFETY: l_param points to an MSLLHOOKSTRUCT whose first 20 bytes
        // are the five 32-bit fields the decoder reads (pt.x, pt.y,
        // mouseData, flags, time); the record is copied, never retained.
        let bytes = &*(l_param.0 as *const [u8; MOUSE_RECORD_SIZE]);
        let record = RawMouseRecord::from_bytes(bytes);

        if let Some(event) = decode_event_logged(w_param.0 as u32, &record) {
            if let Ok(guard) = EVENT_SENDER.lock() {
                if let Some(sender) = guard.as_ref() {
                    // Ignore send errors (channel closed during shutdown).
                    let _ = sender.send(event);
                }
            }
        }
    }

    // SAFETY: Always forward to the next hook in the chain; this bridge
    // observes events, it never suppresses or modifies them.
    CallNextHookEx(None, n_code, w_param, l_param)
}
