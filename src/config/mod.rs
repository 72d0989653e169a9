//! Configuration management for portsweep.
//!
//! Settings live in an XDG-compliant config directory; command-line flags
//! override whatever the file provides.

mod settings;

pub use settings::{AppSettings, Paths};
