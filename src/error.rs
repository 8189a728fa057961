//! Error taxonomy for hotkey registration and delivery.

use crate::identity::HotkeyIdentity;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The identity is already actively held by this process.
    #[error("hotkey {0} is already registered")]
    DuplicateRegistration(HotkeyIdentity),

    /// The OS refused the registration, commonly because the combination is
    /// already owned by another process. Carries the OS-reported reason.
    #[error("hotkey registration rejected by the OS: {0}")]
    RegistrationRejected(String),

    /// The OS reported that the hotkey was not currently held at release
    /// time, or an unregister raced with another release of the same handle.
    #[error("hotkey is not registered: {0}")]
    NotRegistered(String),

    /// The worker's message pump exited unexpectedly; surfaced as the
    /// failure of any subsequent operation addressed to that worker.
    #[error("hotkey worker terminated")]
    WorkerTerminated,

    /// A key spec named a key that is not in the vocabulary.
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),

    /// The current platform has no global hotkey facility.
    #[error("global hotkeys are not supported on this platform")]
    Unsupported,
}
