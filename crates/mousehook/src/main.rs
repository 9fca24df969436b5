//! mousehook-watch: log every system-wide mouse event until Ctrl-C.
//!
//! Installs the global mouse hook and prints each decoded event through
//! `tracing`. Useful for checking what the hook actually sees, including
//! injected-event flags from synthetic input tools.

use tracing::info;
use tracing_subscriber::EnvFilter;

use mousehook::{EventClass, MouseHook};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let hook = MouseHook::new()?;

    hook.subscribe(EventClass::Move, |event| {
        info!("move      ({}, {}) t={}ms", event.x, event.y, event.time_ms);
    });
    hook.subscribe(EventClass::ButtonDown, |event| {
        info!(
            "down      {:?} at ({}, {}) injected={}",
            event.button(),
            event.x,
            event.y,
            event.flags.injected
        );
    });
    hook.subscribe(EventClass::ButtonUp, |event| {
        info!("up        {:?} at ({}, {})", event.button(), event.x, event.y);
    });

    // Wheel events through the async stream, to keep scroll logging off the
    // dispatch thread.
    let (_wheel_sub, mut wheel_rx) = hook.stream(EventClass::Wheel);
    tokio::spawn(async move {
        while let Some(event) = wheel_rx.recv().await {
            info!(
                "wheel     delta={:?} at ({}, {})",
                event.wheel_delta(),
                event.x,
                event.y
            );
        }
    });

    info!("mouse hook active.  Press Ctrl-C to exit.");
    tokio::signal::ctrl_c().await?;

    hook.close();
    info!("mousehook-watch stopped");
    Ok(())
}
