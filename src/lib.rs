//! System-wide hotkey registration and event delivery.
//!
//! An application registers a combination of modifier keys plus a single key
//! and receives callbacks when the combination transitions through down, up,
//! or a down-then-up ("press") cycle. Each registered hotkey gets its own
//! dedicated worker thread that owns the OS-level registration and pumps the
//! OS message queue; other threads reach that thread-affine state only
//! through a command channel.
//!
//! # Example
//!
//! ```no_run
//! use hotkey::{HotkeyIdentity, Key, Modifier, Registry, Signal};
//!
//! fn main() -> hotkey::Result<()> {
//!     // String form, against the process-wide registry:
//!     hotkey::register("cs", "z down", || println!("ctrl+shift+z"))?;
//!
//!     // Typed form, against an explicit registry:
//!     let registry = Registry::new();
//!     let toggle = HotkeyIdentity::new(
//!         Modifier::Ctrl | Modifier::Shift,
//!         Key::from_name("t").unwrap(),
//!         Signal::Press,
//!     );
//!     registry.register_with_release(
//!         toggle,
//!         || println!("held down"),
//!         || println!("released"),
//!     )?;
//!
//!     // ... run the application ...
//!
//!     hotkey::unregister("cs", "z down")?;
//!     registry.unregister(&toggle)?;
//!     Ok(())
//! }
//! ```
//!
//! # Platform notes
//!
//! The Win32 backend wraps `RegisterHotKey`, which binds registration,
//! message retrieval, and unregistration to the registering thread; the
//! per-hotkey worker exists to honor that. On other platforms the default
//! backend reports [`Error::Unsupported`]; embedders can bridge a different
//! input facility by implementing [`HotkeyOs`] and using
//! [`Registry::with_os`].

mod edge;
pub mod error;
mod handle;
pub mod identity;
pub mod keys;
pub mod os;
pub mod parse;
pub mod registry;
mod worker;

pub use error::{Error, Result};
pub use identity::HotkeyIdentity;
pub use keys::{Key, Modifier, Modifiers, Signal};
pub use os::{HotkeyOs, PumpMessage};
pub use parse::parse_binding;
pub use registry::{global, register, unregister, Registry};
