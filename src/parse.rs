//! Normalization of human-readable bindings into a [`HotkeyIdentity`].
//!
//! The modifier spec is a string of single-character flags: `w` (win),
//! `c` (ctrl), `s` (shift), `a` (alt). Order does not matter and duplicates
//! collapse. The key spec is whitespace-separated and contains one key name
//! plus an optional signal word (`down`, `up`, `press`); the signal defaults
//! to `down`.

use crate::error::{Error, Result};
use crate::identity::HotkeyIdentity;
use crate::keys::{Key, Modifier, Modifiers, Signal};

/// Parse a (modifier spec, key spec) pair, e.g. `("cs", "z down")`.
pub fn parse_binding(modifiers: &str, key_spec: &str) -> Result<HotkeyIdentity> {
    let mods = parse_modifiers(modifiers);
    let (key, signal) = parse_key_spec(key_spec)?;
    Ok(HotkeyIdentity::new(mods, key, signal))
}

fn parse_modifiers(spec: &str) -> Modifiers {
    let mut mods = Modifiers::EMPTY;
    for ch in spec.chars() {
        match ch {
            'w' => mods.insert(Modifier::Win),
            'c' => mods.insert(Modifier::Ctrl),
            's' => mods.insert(Modifier::Shift),
            'a' => mods.insert(Modifier::Alt),
            // unrecognized flag characters are ignored
            _ => {}
        }
    }
    mods
}

fn parse_key_spec(spec: &str) -> Result<(Key, Signal)> {
    let mut key = None;
    let mut signal = None;

    for field in spec.split_whitespace() {
        let field = field.to_ascii_lowercase();
        // Signal words take precedence over key names, so a bare "down"
        // always reads as a signal, never as the arrow key.
        if let Some(s) = Signal::from_name(&field) {
            signal.get_or_insert(s);
            continue;
        }
        if key.is_none() {
            key = Some(Key::from_name(&field).ok_or(Error::UnknownKey(field))?);
        }
    }

    let key = key.ok_or_else(|| Error::UnknownKey(spec.trim().to_string()))?;
    Ok((key, signal.unwrap_or(Signal::Down)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_binding() {
        let id = parse_binding("cs", "z down").unwrap();
        assert_eq!(id.modifiers, Modifier::Ctrl | Modifier::Shift);
        assert_eq!(id.key, Key(0x5A));
        assert_eq!(id.signal, Signal::Down);
    }

    #[test]
    fn test_signal_defaults_to_down() {
        let id = parse_binding("", "esc").unwrap();
        assert!(id.modifiers.is_empty());
        assert_eq!(id.key, Key::ESCAPE);
        assert_eq!(id.signal, Signal::Down);
    }

    #[test]
    fn test_signal_word_position_is_free() {
        let a = parse_binding("c", "press f5").unwrap();
        let b = parse_binding("c", "f5 press").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.signal, Signal::Press);
    }

    #[test]
    fn test_modifier_flags_collapse_and_reorder() {
        let a = parse_binding("ssc", "a").unwrap();
        let b = parse_binding("cs", "a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let err = parse_binding("c", "zz down").unwrap_err();
        assert!(matches!(err, Error::UnknownKey(name) if name == "zz"));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        assert!(matches!(
            parse_binding("c", "down"),
            Err(Error::UnknownKey(_))
        ));
    }
}
