//! Port range parsing and validation.
//!
//! A `PortRange` is an inclusive `start-end` pair with `start <= end`.
//! Every value of `u16` is accepted, including 0.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for port range parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An inclusive range of TCP ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: u16, end: u16) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// First port in the range.
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last port in the range.
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in this range (1..=65536).
    pub const fn len(&self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    /// Always false; a valid range holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parses `"start-end"` or a single `"port"`.
impl FromStr for PortRange {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let parse = |part: &str| -> Result<u16, PortError> {
            part.trim()
                .parse()
                .map_err(|_| PortError::InvalidFormat(part.trim().to_string()))
        };

        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => Ok(Self::single(parse(s)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_range() {
        let range = PortRange::new(1, 100).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.iter().next(), Some(1));
        assert_eq!(range.iter().last(), Some(100));
    }

    #[test]
    fn test_full_range_len() {
        let range = PortRange::new(0, 65535).unwrap();
        assert_eq!(range.len(), 65536);
        assert_eq!(range.iter().count(), 65536);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(PortRange::new(100, 50), Err(PortError::InvalidRange(100, 50)));
        assert!("9000-80".parse::<PortRange>().is_err());
    }

    #[test]
    fn test_parse() {
        let range: PortRange = "7999-8001".parse().unwrap();
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![7999, 8000, 8001]);

        let range: PortRange = " 22 ".parse().unwrap();
        assert_eq!(range, PortRange::single(22));
        assert_eq!(range.to_string(), "22");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("".parse::<PortRange>(), Err(PortError::Empty));
        assert!("abc".parse::<PortRange>().is_err());
        assert!("1-70000".parse::<PortRange>().is_err());
        assert!("1-2-3".parse::<PortRange>().is_err());
    }
}
