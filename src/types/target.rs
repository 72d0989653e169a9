//! A scan target: the hostname the caller asked for and the address it
//! resolved to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// A single scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// The original input (hostname or IP string).
    pub hostname: String,
    /// The resolved IP address.
    pub address: IpAddr,
}

impl Target {
    pub fn new(hostname: impl Into<String>, address: IpAddr) -> Self {
        Self {
            hostname: hostname.into(),
            address,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hostname == self.address.to_string() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} ({})", self.hostname, self.address)
        }
    }
}
