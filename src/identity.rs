//! Canonical hotkey identity.

use crate::keys::{Key, Modifiers, Signal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The normalized (modifier set, key code, signal kind) tuple that uniquely
/// names a registration.
///
/// Two identities are equal iff their normalized modifier sets, key codes,
/// and signal kinds are equal; the registry keys its entries on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotkeyIdentity {
    pub modifiers: Modifiers,
    pub key: Key,
    pub signal: Signal,
}

impl HotkeyIdentity {
    pub fn new(modifiers: impl Into<Modifiers>, key: Key, signal: Signal) -> Self {
        Self {
            modifiers: modifiers.into(),
            key,
            signal,
        }
    }
}

impl fmt::Display for HotkeyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{} {}", self.key, self.signal)
        } else {
            write!(f, "{}+{} {}", self.modifiers, self.key, self.signal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Modifier;

    #[test]
    fn test_equality_ignores_modifier_order() {
        let a = HotkeyIdentity::new(Modifier::Ctrl | Modifier::Shift, Key(0x5A), Signal::Down);
        let b = HotkeyIdentity::new(Modifier::Shift | Modifier::Ctrl, Key(0x5A), Signal::Down);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signal_kind_distinguishes_identities() {
        let down = HotkeyIdentity::new(Modifiers::EMPTY, Key::ESCAPE, Signal::Down);
        let up = HotkeyIdentity::new(Modifiers::EMPTY, Key::ESCAPE, Signal::Up);
        assert_ne!(down, up);
    }

    #[test]
    fn test_display() {
        let id = HotkeyIdentity::new(Modifier::Ctrl | Modifier::Shift, Key(0x5A), Signal::Press);
        assert_eq!(id.to_string(), "ctrl+shift+z press");

        let bare = HotkeyIdentity::new(Modifiers::EMPTY, Key::ESCAPE, Signal::Down);
        assert_eq!(bare.to_string(), "escape down");
    }

    #[test]
    fn test_serde_round_trip() {
        let id = HotkeyIdentity::new(Modifier::Win | Modifier::Alt, Key::SPACE, Signal::Up);
        let json = serde_json::to_string(&id).unwrap();
        let back: HotkeyIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
