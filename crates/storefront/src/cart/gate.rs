//! Hydration readiness gate.
//!
//! Anything that renders cart-derived output must wait until the persisted
//! cart has been read, otherwise it would briefly show an empty cart that
//! then jumps to the stored one. [`hydration_gate`] returns a one-shot
//! [`HydrationGate`] held by the hydrating store and a cloneable
//! [`ReadySignal`] handed to every consumer.
//!
//! The gate opens exactly once. Opening consumes it, so a second flip is not
//! expressible.

use tokio::sync::watch;

/// Create a closed gate and the signal that observes it.
#[must_use]
pub fn hydration_gate() -> (HydrationGate, ReadySignal) {
    let (tx, rx) = watch::channel(false);
    (HydrationGate { tx }, ReadySignal { rx })
}

/// Write side of the readiness signal.
#[derive(Debug)]
pub struct HydrationGate {
    tx: watch::Sender<bool>,
}

impl HydrationGate {
    /// Another observer of this gate.
    #[must_use]
    pub fn signal(&self) -> ReadySignal {
        ReadySignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Mark hydration as finished.
    pub fn open(self) {
        self.tx.send_replace(true);
    }
}

/// Read side of the readiness signal.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<bool>,
}

impl ReadySignal {
    /// Whether the first hydration attempt has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until hydration has completed.
    ///
    /// Returns `false` if the gate was dropped without opening, which happens
    /// when the hydrating task is cancelled.
    pub async fn wait(&mut self) -> bool {
        self.rx.wait_for(|ready| *ready).await.is_ok()
    }

    /// Run `render` only once ready; `None` means "render nothing".
    pub fn gate<T>(&self, render: impl FnOnce() -> T) -> Option<T> {
        self.is_ready().then(render)
    }
}
