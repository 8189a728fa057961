//! Key, modifier, and signal vocabulary.
//!
//! Numeric values follow the Win32 conventions: modifiers use the
//! `RegisterHotKey` modifier bits and keys use virtual-key codes. Backends
//! for other hosts treat the same codes as an opaque vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// A single modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum Modifier {
    Alt = 0x1,
    Ctrl = 0x2,
    Shift = 0x4,
    Win = 0x8,
}

impl Modifier {
    /// The Win32 `MOD_*` bit for this modifier.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    const fn name(self) -> &'static str {
        match self {
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Win => "win",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized set of modifiers.
///
/// Stored as a bitmask, so two sets built from the same modifiers in any
/// order compare equal. Displayed in a fixed canonical order
/// (win, ctrl, shift, alt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u32);

/// Canonical display order for modifier sets.
const DISPLAY_ORDER: [Modifier; 4] = [
    Modifier::Win,
    Modifier::Ctrl,
    Modifier::Shift,
    Modifier::Alt,
];

impl Modifiers {
    /// The empty modifier set.
    pub const EMPTY: Modifiers = Modifiers(0);

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bits();
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bits() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The combined Win32 `MOD_*` bitmask.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl From<Modifier> for Modifiers {
    fn from(modifier: Modifier) -> Self {
        Modifiers(modifier.bits())
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut mods = Modifiers::EMPTY;
        for m in iter {
            mods.insert(m);
        }
        mods
    }
}

impl BitOr for Modifier {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifier) -> Modifiers {
        Modifiers(self.bits() | rhs.bits())
    }
}

impl BitOr<Modifier> for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifier) -> Modifiers {
        Modifiers(self.0 | rhs.bits())
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in DISPLAY_ORDER {
            if self.contains(m) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(m.name())?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u32);

impl Key {
    pub const SPACE: Key = Key(0x20);
    pub const RETURN: Key = Key(0x0D);
    pub const ESCAPE: Key = Key(0x1B);
    pub const DELETE: Key = Key(0x2E);
    pub const TAB: Key = Key(0x09);
    pub const LEFT: Key = Key(0x25);
    pub const UP: Key = Key(0x26);
    pub const RIGHT: Key = Key(0x27);
    pub const DOWN: Key = Key(0x28);

    /// Look up a key by its lowercase name.
    ///
    /// Accepts single letters and digits, `f1`..`f20`, and the named
    /// special keys (`space`, `return`, `escape`/`esc`, `delete`, `tab`,
    /// and the arrow keys).
    pub fn from_name(name: &str) -> Option<Key> {
        if let Some(key) = single_char_key(name) {
            return Some(key);
        }
        if let Some(key) = function_key(name) {
            return Some(key);
        }
        match name {
            "space" => Some(Key::SPACE),
            "return" => Some(Key::RETURN),
            "escape" | "esc" => Some(Key::ESCAPE),
            "delete" => Some(Key::DELETE),
            "tab" => Some(Key::TAB),
            "left" => Some(Key::LEFT),
            "up" => Some(Key::UP),
            "right" => Some(Key::RIGHT),
            "down" => Some(Key::DOWN),
            _ => None,
        }
    }
}

/// Letters and digits map directly onto their ASCII uppercase codes.
fn single_char_key(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c {
        '0'..='9' => Some(Key(c as u32)),
        'a'..='z' => Some(Key(c.to_ascii_uppercase() as u32)),
        _ => None,
    }
}

/// `f1`..`f20` map onto VK_F1 (0x70) onwards.
fn function_key(name: &str) -> Option<Key> {
    let n: u32 = name.strip_prefix('f')?.parse().ok()?;
    if (1..=20).contains(&n) {
        Some(Key(0x70 + n - 1))
    } else {
        None
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0x30..=0x39 | 0x41..=0x5A => {
                let c = char::from_u32(self.0).unwrap_or('?').to_ascii_lowercase();
                write!(f, "{c}")
            }
            0x70..=0x83 => write!(f, "f{}", self.0 - 0x70 + 1),
            0x20 => f.write_str("space"),
            0x0D => f.write_str("return"),
            0x1B => f.write_str("escape"),
            0x2E => f.write_str("delete"),
            0x09 => f.write_str("tab"),
            0x25 => f.write_str("left"),
            0x26 => f.write_str("up"),
            0x27 => f.write_str("right"),
            0x28 => f.write_str("down"),
            other => write!(f, "0x{other:02x}"),
        }
    }
}

/// Which physical transition triggers callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Fire the primary callback as soon as the combination goes down.
    Down,
    /// Fire the primary callback when the combination is released.
    Up,
    /// Fire the primary callback on press and the release callback (if any)
    /// on release.
    Press,
}

impl Signal {
    pub fn from_name(name: &str) -> Option<Signal> {
        match name {
            "down" => Some(Signal::Down),
            "up" => Some(Signal::Up),
            "press" => Some(Signal::Press),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Signal::Down => "down",
            Signal::Up => "up",
            Signal::Press => "press",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
