//! In-memory [`HotkeyOs`] double for engine tests.
//!
//! Mirrors the Win32 rule that hotkey messages are posted to the message
//! queue of the thread that registered: each worker thread gets its own
//! queue, and a simulated press routes the interrupt to the queue of the
//! worker bound to that key. Physical key state is a shared map driven by
//! `press`/`release`.

#![allow(dead_code)]

use crossbeam_channel::{unbounded, Receiver, Sender};
use hotkey::{Error, HotkeyOs, Key, Modifiers, PumpMessage, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

type Queue = (Sender<PumpMessage>, Receiver<PumpMessage>);

#[derive(Default)]
struct MockState {
    queues: HashMap<ThreadId, Queue>,
    /// registration id -> (owning thread, key code)
    bindings: HashMap<i32, (ThreadId, u32)>,
    keys_down: HashSet<u32>,
    reject_next: Option<String>,
}

pub struct MockOs {
    state: Mutex<MockState>,
}

impl MockOs {
    pub fn new() -> Arc<MockOs> {
        init_tracing();
        Arc::new(MockOs {
            state: Mutex::new(MockState::default()),
        })
    }

    /// Simulate the combination going physically down: the key state flips
    /// and an interrupt is posted to the owning worker's queue.
    pub fn press(&self, key: Key) {
        let mut state = self.state.lock();
        // Key state flips before the interrupt is visible, so a release poll
        // started by this interrupt sees the key as held.
        state.keys_down.insert(key.0);
        self.post_interrupt(&state, key);
    }

    /// Post a repeat interrupt (OS auto-repeat) without changing the
    /// physical key state.
    pub fn repeat(&self, key: Key) {
        let state = self.state.lock();
        self.post_interrupt(&state, key);
    }

    /// Simulate the physical release of `key`.
    pub fn release(&self, key: Key) {
        self.state.lock().keys_down.remove(&key.0);
    }

    /// Make the next `register_hotkey` call fail with the given reason.
    pub fn reject_next(&self, reason: &str) {
        self.state.lock().reject_next = Some(reason.to_string());
    }

    /// Number of currently live OS-level registrations.
    pub fn active_registrations(&self) -> usize {
        self.state.lock().bindings.len()
    }

    fn post_interrupt(&self, state: &MockState, key: Key) {
        for (thread, bound_key) in state.bindings.values() {
            if *bound_key == key.0 {
                if let Some((tx, _)) = state.queues.get(thread) {
                    let _ = tx.send(PumpMessage::Interrupt);
                }
            }
        }
    }

    /// The calling thread's queue, created on first use (a thread's queue
    /// exists as soon as the thread touches the message APIs, as on Win32).
    fn queue_for_current(&self) -> Queue {
        let mut state = self.state.lock();
        state
            .queues
            .entry(thread::current().id())
            .or_insert_with(unbounded)
            .clone()
    }
}

impl HotkeyOs for MockOs {
    fn register_hotkey(&self, id: i32, _modifiers: Modifiers, key: Key) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(reason) = state.reject_next.take() {
            return Err(Error::RegistrationRejected(reason));
        }
        state
            .queues
            .entry(thread::current().id())
            .or_insert_with(unbounded);
        state.bindings.insert(id, (thread::current().id(), key.0));
        Ok(())
    }

    fn unregister_hotkey(&self, id: i32) -> Result<()> {
        let mut state = self.state.lock();
        if state.bindings.remove(&id).is_none() {
            return Err(Error::NotRegistered(format!("registration id {id}")));
        }
        Ok(())
    }

    fn message_pending(&self) -> bool {
        let (_, rx) = self.queue_for_current();
        !rx.is_empty()
    }

    fn next_message(&self) -> Option<PumpMessage> {
        // Blocking retrieval; the lock is not held while waiting.
        let (_, rx) = self.queue_for_current();
        rx.recv().ok()
    }

    fn key_is_down(&self, key: Key) -> bool {
        self.state.lock().keys_down.contains(&key.0)
    }
}

/// Install the tracing subscriber once for the whole test binary; honors
/// `RUST_LOG` so worker/edge logs can be inspected on failure.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

/// Long enough for several pump ticks; used to assert that nothing happens.
pub fn settle() {
    thread::sleep(Duration::from_millis(80));
}
