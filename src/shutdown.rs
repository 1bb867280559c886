//! Cancellation signal
//!
//! Both benchmark loops run until told to stop. The signal is a
//! crossbeam channel that never carries a message: triggering drops the
//! only sender, which disconnects every listener at once.

use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;

/// Owner side of the cancellation signal
pub struct Shutdown {
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, rx) = channel::bounded(0);
        Self {
            trigger: Mutex::new(Some(tx)),
            signal: rx,
        }
    }

    /// A listener loops can poll; may be cloned freely
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            signal: self.signal.clone(),
        }
    }

    /// Cancel every listener; idempotent
    pub fn trigger(&self) {
        if self.trigger.lock().take().is_some() {
            tracing::debug!("Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.trigger.lock().is_none()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener side of the cancellation signal
#[derive(Clone)]
pub struct ShutdownListener {
    signal: Receiver<()>,
}

impl ShutdownListener {
    /// True once the owning [`Shutdown`] has been triggered
    pub fn is_cancelled(&self) -> bool {
        !matches!(self.signal.try_recv(), Err(TryRecvError::Empty))
    }

    /// Sleep for `delay` unless cancelled first; returns true if cancelled
    pub fn wait(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            return self.is_cancelled();
        }
        !matches!(self.signal.recv_timeout(delay), Err(RecvTimeoutError::Timeout))
    }
}
