//! Edge detection: raw hotkey interrupts into down/up/press transitions.
//!
//! The host only reports "combination pressed", never "released", so release
//! is inferred by polling the physical key state on a sub-thread. Repeat
//! interrupts that arrive while a release poll is outstanding model OS
//! auto-repeat and are ignored.

use crate::handle::HandleShared;
use crate::keys::Signal;
use crate::os::HotkeyOs;
use crossbeam_channel::tick;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Cadence of the physical-key release poll.
const RELEASE_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum EdgeState {
    /// At rest; the next interrupt is a fresh press.
    Idle = 0,
    /// Combination held down, primary callback already fired (`press` kind).
    DownActive = 1,
    /// Waiting for physical release (`up` kind).
    UpWaiting = 2,
}

impl EdgeState {
    fn from_raw(raw: u8) -> EdgeState {
        match raw {
            1 => EdgeState::DownActive,
            2 => EdgeState::UpWaiting,
            _ => EdgeState::Idle,
        }
    }
}

/// Per-hotkey edge state machine. Lives on the worker thread; the release
/// poll sub-thread shares the state word and the cancellation flag.
pub(crate) struct EdgeDetector {
    os: Arc<dyn HotkeyOs>,
    shared: Arc<HandleShared>,
    cancel: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    release_poll: Option<JoinHandle<()>>,
}

impl EdgeDetector {
    pub fn new(os: Arc<dyn HotkeyOs>, shared: Arc<HandleShared>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            os,
            shared,
            cancel,
            state: Arc::new(AtomicU8::new(EdgeState::Idle as u8)),
            release_poll: None,
        }
    }

    /// Dispatch one raw "combination pressed" interrupt.
    pub fn on_interrupt(&mut self) {
        let current = EdgeState::from_raw(self.state.load(Ordering::SeqCst));
        match (self.shared.identity.signal, current) {
            // For the `down` kind every interrupt is an edge; the host does
            // not re-fire while the combination is held.
            (Signal::Down, _) => self.shared.trigger(),
            (Signal::Press, EdgeState::Idle) => {
                self.shared.trigger();
                self.state
                    .store(EdgeState::DownActive as u8, Ordering::SeqCst);
                self.spawn_release_poll();
            }
            (Signal::Up, EdgeState::Idle) => {
                self.state
                    .store(EdgeState::UpWaiting as u8, Ordering::SeqCst);
                self.spawn_release_poll();
            }
            // Auto-repeat while a release poll is outstanding.
            _ => tracing::debug!(hotkey = %self.shared.identity, "debounced repeat interrupt"),
        }
    }

    /// Watch the physical key state until release, then fire the edge
    /// callback and return to `Idle`. Exits silently on cancellation or if
    /// the key-state query stops reporting the key as held.
    fn spawn_release_poll(&mut self) {
        // The previous poll has already reset the state to Idle or we would
        // not be spawning; joining it here just reaps the finished thread.
        if let Some(poll) = self.release_poll.take() {
            let _ = poll.join();
        }

        let os = self.os.clone();
        let shared = self.shared.clone();
        let cancel = self.cancel.clone();
        let state = self.state.clone();
        let key = self.shared.identity.key;

        self.release_poll = Some(thread::spawn(move || {
            let ticker = tick(RELEASE_POLL_INTERVAL);
            while ticker.recv().is_ok() {
                if cancel.load(Ordering::SeqCst) {
                    // Torn down mid-flight: no further callback.
                    return;
                }
                if !os.key_is_down(key) {
                    match EdgeState::from_raw(state.swap(EdgeState::Idle as u8, Ordering::SeqCst))
                    {
                        EdgeState::DownActive => shared.release(),
                        EdgeState::UpWaiting => shared.trigger(),
                        EdgeState::Idle => {}
                    }
                    return;
                }
            }
        }));
    }

    /// Join any outstanding release poll. Called by the worker after its
    /// loop exits; the cancellation flag is already raised on the teardown
    /// path, so the poll cannot fire a callback past this point.
    pub fn shutdown(&mut self) {
        if let Some(poll) = self.release_poll.take() {
            let _ = poll.join();
        }
    }
}
