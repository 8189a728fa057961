//! Process-wide hotkey registry.
//!
//! The registry is the one discoverable, mutually-exclusive owner of each
//! active hotkey identity in the process. It owns the handles; each handle
//! owns its worker. The map lock only guards membership: registration and
//! release block on the per-handle lock instead, so unrelated hotkeys are
//! never serialized against each other.

use crate::error::{Error, Result};
use crate::handle::{Callback, Hotkey};
use crate::identity::HotkeyIdentity;
use crate::os::{self, HotkeyOs};
use crate::parse;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub struct Registry {
    os: Arc<dyn HotkeyOs>,
    entries: Mutex<HashMap<HotkeyIdentity, Arc<Hotkey>>>,
}

impl Registry {
    /// A registry backed by the current platform's hotkey facility.
    pub fn new() -> Self {
        Self::with_os(os::default_os())
    }

    /// A registry backed by a caller-supplied [`HotkeyOs`]. Used by tests
    /// and by embedders that bridge another input facility.
    pub fn with_os(os: Arc<dyn HotkeyOs>) -> Self {
        Self {
            os,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register `identity`, invoking `on_trigger` on its primary edge.
    ///
    /// Blocks until the OS-level registration attempt completes on the
    /// hotkey's own worker thread, so conflicts (a combination already owned
    /// by another process) surface here. On failure nothing is retained.
    pub fn register<F>(&self, identity: HotkeyIdentity, on_trigger: F) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register_inner(identity, Box::new(on_trigger), None)
    }

    /// Like [`register`](Self::register), with a second callback invoked on
    /// release. Only meaningful for the `press` signal kind; for the other
    /// kinds the release callback never fires.
    pub fn register_with_release<F, G>(
        &self,
        identity: HotkeyIdentity,
        on_trigger: F,
        on_release: G,
    ) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
        G: Fn() + Send + Sync + 'static,
    {
        self.register_inner(identity, Box::new(on_trigger), Some(Box::new(on_release)))
    }

    fn register_inner(
        &self,
        identity: HotkeyIdentity,
        on_trigger: Callback,
        on_release: Option<Callback>,
    ) -> Result<()> {
        let hotkey = Arc::new(Hotkey::new(
            self.os.clone(),
            identity,
            on_trigger,
            on_release,
        ));

        {
            let mut entries = self.entries.lock();
            if entries.contains_key(&identity) {
                return Err(Error::DuplicateRegistration(identity));
            }
            entries.insert(identity, hotkey.clone());
        }

        // The map entry is placed first so a concurrent register of the same
        // identity observes the duplicate; the OS attempt itself runs outside
        // the map lock.
        if let Err(err) = hotkey.register() {
            self.entries.lock().remove(&identity);
            return Err(err);
        }
        Ok(())
    }

    /// Release `identity` and shut its worker down.
    ///
    /// A missing entry is a success (idempotent). Otherwise this blocks
    /// until the OS release is confirmed and the worker has exited, so no
    /// callback for this hotkey fires after it returns. The entry is removed
    /// even if the OS reports the release failed; the error is surfaced.
    pub fn unregister(&self, identity: &HotkeyIdentity) -> Result<()> {
        let hotkey = match self.entries.lock().remove(identity) {
            Some(hotkey) => hotkey,
            None => return Ok(()),
        };
        hotkey.unregister()
    }

    /// Whether `identity` currently has an active entry.
    pub fn is_registered(&self, identity: &HotkeyIdentity) -> bool {
        self.entries.lock().contains_key(identity)
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry used by the free functions, constructed on
/// first use against the platform backend.
static GLOBAL: OnceLock<Registry> = OnceLock::new();

pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

/// Register a hotkey from its human-readable form, e.g.
/// `register("cs", "z down", || ...)` for ctrl+shift+z.
///
/// See [`crate::parse::parse_binding`] for the binding syntax.
pub fn register<F>(modifiers: &str, key_spec: &str, on_trigger: F) -> Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    let identity = parse::parse_binding(modifiers, key_spec)?;
    global().register(identity, on_trigger)
}

/// Unregister a hotkey previously registered from its human-readable form.
pub fn unregister(modifiers: &str, key_spec: &str) -> Result<()> {
    let identity = parse::parse_binding(modifiers, key_spec)?;
    global().unregister(&identity)
}
