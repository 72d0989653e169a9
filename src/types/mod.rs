//! Core type definitions.
//!
//! These types keep invalid states unrepresentable: a `PortRange` is always
//! ordered, and a `Target` always carries the address it resolved to.

mod port;
mod target;

pub use port::{PortError, PortRange};
pub use target::Target;
