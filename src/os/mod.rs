//! Host OS seam for the hotkey engine.
//!
//! Everything the engine needs from the host is behind [`HotkeyOs`]: hotkey
//! registration and release, the message-queue pump, and the physical
//! key-state query used for release detection. The Win32 facilities this
//! models are thread-affine, so the engine only ever calls the registration
//! methods from the worker thread that will also pump the messages.
//!
//! The trait is public so that embedders and tests can supply their own
//! backend; see [`crate::Registry::with_os`].

use crate::error::Result;
use crate::keys::{Key, Modifiers};
use std::sync::Arc;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use self::windows::Win32Os;

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use self::unsupported::UnsupportedOs;

/// One message retrieved from the host message queue.
///
/// The host protocol is a fixed-code binary contract (`WM_HOTKEY`,
/// `WM_QUIT`); it is decoded here and passed through unchanged otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpMessage {
    /// The registered combination was pressed.
    Interrupt,
    /// The queue was asked to shut down.
    Quit,
    /// Any other message; the pump ignores it.
    Other,
}

/// Host facilities backing one or more hotkey workers.
///
/// `register_hotkey`, `unregister_hotkey`, `message_pending`, and
/// `next_message` must all be called from the same thread for a given
/// registration id; hotkey messages are delivered to the queue of the
/// thread that registered.
pub trait HotkeyOs: Send + Sync + 'static {
    /// Register `modifiers`+`key` under `id` against the calling thread.
    fn register_hotkey(&self, id: i32, modifiers: Modifiers, key: Key) -> Result<()>;

    /// Release the registration made under `id` by the calling thread.
    fn unregister_hotkey(&self, id: i32) -> Result<()>;

    /// Non-blocking check whether a message is queued for the calling thread.
    fn message_pending(&self) -> bool;

    /// Retrieve the next message for the calling thread, blocking until one
    /// arrives. `None` means retrieval failed and the stream has ended.
    fn next_message(&self) -> Option<PumpMessage>;

    /// Whether `key` is currently physically held down.
    fn key_is_down(&self, key: Key) -> bool;
}

/// The backend for the current platform, used by the process-wide registry.
pub(crate) fn default_os() -> Arc<dyn HotkeyOs> {
    #[cfg(windows)]
    {
        Arc::new(Win32Os)
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedOs)
    }
}
