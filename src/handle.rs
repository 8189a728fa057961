//! Per-combination hotkey handle and its registration lifecycle.

use crate::error::{Error, Result};
use crate::identity::HotkeyIdentity;
use crate::os::HotkeyOs;
use crate::worker::Worker;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Next registration id handed to the OS. Ids are monotonically increasing
/// and never reused within a process run.
static NEXT_REGISTRATION_ID: AtomicI32 = AtomicI32::new(1);

pub(crate) type Callback = Box<dyn Fn() + Send + Sync + 'static>;

/// The slice of handle state the worker thread reads: the identity (which
/// carries the signal kind and key) and the callbacks. The worker holds this
/// by `Arc` for reading only; lifecycle control stays with [`Hotkey`].
pub(crate) struct HandleShared {
    pub identity: HotkeyIdentity,
    on_trigger: Callback,
    on_release: Option<Callback>,
}

impl HandleShared {
    /// Invoke the primary callback.
    pub fn trigger(&self) {
        (self.on_trigger)();
    }

    /// Invoke the release callback, or do nothing if none was supplied.
    pub fn release(&self) {
        match &self.on_release {
            Some(f) => f(),
            None => tracing::debug!(hotkey = %self.identity, "released (no release callback)"),
        }
    }
}

#[cfg(test)]
impl HandleShared {
    pub(crate) fn for_tests(identity: HotkeyIdentity) -> Self {
        Self {
            identity,
            on_trigger: Box::new(|| {}),
            on_release: None,
        }
    }
}

/// A hotkey handle: one combination, its callbacks, and exclusive ownership
/// of the worker that holds its OS-level registration.
///
/// At most one live OS registration exists per handle; re-registering while
/// already registered is rejected rather than silently replaced.
pub(crate) struct Hotkey {
    os: Arc<dyn HotkeyOs>,
    shared: Arc<HandleShared>,
    inner: Mutex<HandleState>,
}

#[derive(Default)]
struct HandleState {
    registered: bool,
    registration_id: i32,
    worker: Option<Worker>,
}

impl Hotkey {
    pub fn new(
        os: Arc<dyn HotkeyOs>,
        identity: HotkeyIdentity,
        on_trigger: Callback,
        on_release: Option<Callback>,
    ) -> Self {
        Self {
            os,
            shared: Arc::new(HandleShared {
                identity,
                on_trigger,
                on_release,
            }),
            inner: Mutex::new(HandleState::default()),
        }
    }

    /// Start the worker and perform the OS-level registration on its thread.
    ///
    /// Blocks until the attempt completes. On failure the worker is torn
    /// down before the error is returned, so the handle can be retried or
    /// dropped cleanly.
    pub fn register(&self) -> Result<()> {
        let mut state = self.inner.lock();
        if state.registered {
            return Err(Error::DuplicateRegistration(self.shared.identity));
        }

        let id = NEXT_REGISTRATION_ID.fetch_add(1, Ordering::SeqCst);
        let mut worker = Worker::spawn(self.os.clone(), self.shared.clone());

        let os = self.os.clone();
        let identity = self.shared.identity;
        let attempt = worker
            .run_on(move || os.register_hotkey(id, identity.modifiers, identity.key))
            .and_then(|outcome| outcome);

        if let Err(err) = attempt {
            worker.cancel();
            worker.join();
            return Err(err);
        }

        state.registered = true;
        state.registration_id = id;
        state.worker = Some(worker);
        tracing::info!(hotkey = %identity, id, "registered hotkey");
        Ok(())
    }

    /// Release the OS registration on the worker thread, then shut the
    /// worker down.
    ///
    /// Blocks until the worker and any in-flight release poll have exited,
    /// so no callback fires after this returns. The worker is torn down even
    /// if the OS reports the release failed.
    pub fn unregister(&self) -> Result<()> {
        let mut state = self.inner.lock();
        if !state.registered {
            return Err(Error::NotRegistered(self.shared.identity.to_string()));
        }

        let id = state.registration_id;
        let os = self.os.clone();
        let released = match state.worker.as_ref() {
            Some(worker) => worker
                .run_on(move || os.unregister_hotkey(id))
                .and_then(|outcome| outcome),
            None => Err(Error::WorkerTerminated),
        };

        if let Some(mut worker) = state.worker.take() {
            worker.cancel();
            worker.join();
        }
        state.registered = false;
        state.registration_id = 0;

        match &released {
            Ok(()) => tracing::info!(hotkey = %self.shared.identity, id, "unregistered hotkey"),
            Err(err) => {
                tracing::warn!(hotkey = %self.shared.identity, id, %err, "release reported failure")
            }
        }
        released
    }
}

impl Drop for Hotkey {
    /// Deterministic backstop: a handle that becomes unreachable without an
    /// explicit unregister still releases its OS registration.
    fn drop(&mut self) {
        let still_registered = self.inner.lock().registered;
        if still_registered {
            tracing::warn!(hotkey = %self.shared.identity, "hotkey dropped while registered; releasing");
            let _ = self.unregister();
        }
    }
}
