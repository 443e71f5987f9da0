//! Single-slot deferred callback

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Holds at most one scheduled auto-logout.
///
/// Arming aborts whatever was pending before spawning the new task, so
/// repeated arming never stacks callbacks.
#[derive(Default)]
pub struct AutoLogoutTimer {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl AutoLogoutTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `on_fire` after `delay`, replacing any pending callback.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(mut slot) = self.handle.lock() else {
            return;
        };
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    /// Abort the pending callback. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        let Ok(mut slot) = self.handle.lock() else {
            return false;
        };
        match slot.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for AutoLogoutTimer {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.handle.lock()
            && let Some(handle) = slot.take()
        {
            handle.abort();
        }
    }
}
