//! Fallback backend for hosts without a global hotkey facility.
//!
//! Registration fails with [`Error::Unsupported`], so a worker spun up
//! against this backend is torn down before `register` returns. The pump
//! methods report an idle, ended queue.

use super::{HotkeyOs, PumpMessage};
use crate::error::{Error, Result};
use crate::keys::{Key, Modifiers};

pub struct UnsupportedOs;

impl HotkeyOs for UnsupportedOs {
    fn register_hotkey(&self, _id: i32, _modifiers: Modifiers, _key: Key) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn unregister_hotkey(&self, _id: i32) -> Result<()> {
        Err(Error::Unsupported)
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
