//! Per-hotkey event-loop worker.
//!
//! Each registered hotkey owns one dedicated OS thread. The wrapped host
//! facilities are thread-affine: registration, message retrieval, and
//! unregistration must all happen on the thread that registered. Other
//! threads never touch the OS handle directly; they inject closures into
//! the worker's command queue and wait on a one-shot completion channel.
//!
//! The pump loop runs at a fixed cadence rather than blocking on retrieval
//! outright: the command queue has to be serviced even while no input
//! message has arrived, and a short tick bounds command-injection latency
//! without starving the message pump.

use crate::edge::EdgeDetector;
use crate::error::{Error, Result};
use crate::handle::HandleShared;
use crate::os::{HotkeyOs, PumpMessage};
use crossbeam_channel::{bounded, tick, unbounded, Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Pump cadence (100 Hz).
const PUMP_INTERVAL: Duration = Duration::from_millis(10);

type Command = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct Worker {
    commands: Sender<Command>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn the dedicated pump thread for one hotkey.
    pub fn spawn(os: Arc<dyn HotkeyOs>, shared: Arc<HandleShared>) -> Worker {
        let (commands, command_rx) = unbounded();
        let cancel = Arc::new(AtomicBool::new(false));
        let thread = thread::spawn({
            let cancel = cancel.clone();
            move || pump(os, shared, command_rx, cancel)
        });
        Worker {
            commands,
            cancel,
            thread: Some(thread),
        }
    }

    /// Run `f` on the worker thread and wait for its result.
    ///
    /// This is the only way other threads reach the thread-affine OS state.
    /// Outcomes travel back over the completion channel; nothing is ever
    /// thrown across the command-queue boundary.
    pub fn run_on<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (done_tx, done_rx) = bounded(1);
        let command: Command = Box::new(move || {
            let _ = done_tx.send(f());
        });
        self.commands
            .send(command)
            .map_err(|_| Error::WorkerTerminated)?;
        done_rx.recv().map_err(|_| Error::WorkerTerminated)
    }

    /// Raise the cancellation signal. The pump loop and any in-flight
    /// release poll observe it and exit.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Block until the pump thread (and with it the release poll) has exited.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.cancel();
        self.join();
    }
}

/// The pump loop. Each tick: check the queue without blocking; if idle,
/// service at most one queued command or observe cancellation; otherwise
/// retrieve the message (blocking) and dispatch it.
fn pump(
    os: Arc<dyn HotkeyOs>,
    shared: Arc<HandleShared>,
    commands: Receiver<Command>,
    cancel: Arc<AtomicBool>,
) {
    let mut edge = EdgeDetector::new(os.clone(), shared.clone(), cancel.clone());
    let ticker = tick(PUMP_INTERVAL);

    loop {
        if ticker.recv().is_err() {
            break;
        }

        if !os.message_pending() {
            match commands.try_recv() {
                Ok(command) => command(),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }
            if cancel.load(Ordering::SeqCst) {
                break;
            }
            continue;
        }

        match os.next_message() {
            Some(PumpMessage::Interrupt) => edge.on_interrupt(),
            Some(PumpMessage::Other) => {}
            Some(PumpMessage::Quit) => break,
            None => {
                // Retrieval failure is fatal to this worker only.
                tracing::warn!(hotkey = %shared.identity, "message retrieval failed; worker exiting");
                break;
            }
        }
    }

    // The loop may also exit on a quit message or retrieval failure; raise
    // the cancellation signal so the release poll stops either way.
    cancel.store(true, Ordering::SeqCst);
    edge.shutdown();
    tracing::debug!(hotkey = %shared.identity, "worker exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::HotkeyIdentity;
    use crate::keys::{Key, Modifiers, Signal};

    /// A backend whose queue is permanently idle.
    struct IdleOs;

    impl HotkeyOs for IdleOs {
        fn register_hotkey(&self, _id: i32, _modifiers: Modifiers, _key: Key) -> Result<()> {
            Ok(())
        }
        fn unregister_hotkey(&self, _id: i32) -> Result<()> {
            Ok(())
        }
        fn message_pending(&self) -> bool {
            false
        }
        fn next_message(&self) -> Option<PumpMessage> {
            None
        }
        fn key_is_down(&self, _key: Key) -> bool {
            false
        }
    }

    fn idle_worker() -> Worker {
        let shared = Arc::new(HandleShared::for_tests(HotkeyIdentity::new(
            Modifiers::EMPTY,
            Key::ESCAPE,
            Signal::Down,
        )));
        Worker::spawn(Arc::new(IdleOs), shared)
    }

    #[test]
    fn test_run_on_executes_on_worker_thread() {
        let worker = idle_worker();
        let caller = thread::current().id();
        let ran_on = worker.run_on(|| thread::current().id()).unwrap();
        assert_ne!(caller, ran_on);
    }

    #[test]
    fn test_run_on_returns_closure_result() {
        let worker = idle_worker();
        assert_eq!(worker.run_on(|| 41 + 1).unwrap(), 42);
    }

    #[test]
    fn test_run_on_after_cancel_reports_termination() {
        let mut worker = idle_worker();
        worker.cancel();
        worker.join();
        assert!(matches!(
            worker.run_on(|| ()),
            Err(Error::WorkerTerminated)
        ));
    }
}
