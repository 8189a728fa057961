//! Win32 backend: `RegisterHotKey` plus the per-thread message queue.

use super::{HotkeyOs, PumpMessage};
use crate::error::{Error, Result};
use crate::keys::{Key, Modifiers};

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetMessageW, PeekMessageW, MSG, PM_NOREMOVE, WM_HOTKEY, WM_QUIT,
};

/// Registers with a null `HWND`, which binds the hotkey to the calling
/// thread: `WM_HOTKEY` is posted to that thread's message queue and the
/// registration can only be released from it.
pub struct Win32Os;

impl HotkeyOs for Win32Os {
    fn register_hotkey(&self, id: i32, modifiers: Modifiers, key: Key) -> Result<()> {
        // SAFETY: plain Win32 call; id and key/modifier values come from the
        // caller and NULL HWND targets the current thread.
        unsafe { RegisterHotKey(None, id, HOT_KEY_MODIFIERS(modifiers.bits()), key.0) }
            .map_err(|e| Error::RegistrationRejected(e.message()))
    }

    fn unregister_hotkey(&self, id: i32) -> Result<()> {
        // SAFETY: plain Win32 call; must run on the thread that registered.
        unsafe { UnregisterHotKey(None, id) }.map_err(|e| Error::NotRegistered(e.message()))
    }

    fn message_pending(&self) -> bool {
        let mut msg = MSG::default();
        // SAFETY: PM_NOREMOVE only inspects the queue of the calling thread.
        unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE) }.as_bool()
    }

    fn next_message(&self) -> Option<PumpMessage> {
        let mut msg = MSG::default();
        // SAFETY: blocks on the calling thread's queue until a message
        // arrives. Returns 0 for WM_QUIT and -1 on failure.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            0 => Some(PumpMessage::Quit),
            -1 => None,
            _ => Some(match msg.message {
                WM_HOTKEY => PumpMessage::Interrupt,
                WM_QUIT => PumpMessage::Quit,
                _ => PumpMessage::Other,
            }),
        }
    }

    fn key_is_down(&self, key: Key) -> bool {
        // SAFETY: GetAsyncKeyState reads global input state; no preconditions.
        unsafe { GetAsyncKeyState(key.0 as i32) != 0 }
    }
}
