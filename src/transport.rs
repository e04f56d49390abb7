//! Transport capability bitmask.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// The set of transports a scheme accepts.
///
/// ```rust
/// use dburl::Transport;
///
/// let mysql = Transport::TCP | Transport::UDP | Transport::UNIX;
/// assert!(mysql.allows("unix"));
/// assert!(!Transport::NONE.allows("tcp"));
/// assert!(Transport::ANY.allows("DB2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Transport(u8);

impl Transport {
    /// No explicit transport may be given.
    pub const NONE: Self = Self(0);
    /// TCP.
    pub const TCP: Self = Self(1);
    /// UDP.
    pub const UDP: Self = Self(2);
    /// Unix domain socket.
    pub const UNIX: Self = Self(4);
    /// Any non-empty transport token (ODBC uses it to name the ODBC driver).
    pub const ANY: Self = Self(8);

    /// Create from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if no transport is permitted.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Check if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if the transport token is permitted.
    pub fn allows(self, token: &str) -> bool {
        if self.contains(Self::ANY) && !token.is_empty() {
            return true;
        }
        match Self::from_token(token) {
            Some(flag) => !self.is_none() && self.contains(flag),
            None => false,
        }
    }

    /// Parse a single transport token (`tcp`, `udp`, `unix`, `any`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "tcp" => Some(Self::TCP),
            "udp" => Some(Self::UDP),
            "unix" => Some(Self::UNIX),
            "any" => Some(Self::ANY),
            _ => None,
        }
    }

    /// The tokens of the set flags.
    pub fn tokens(self) -> Vec<&'static str> {
        [
            (Self::TCP, "tcp"),
            (Self::UDP, "udp"),
            (Self::UNIX, "unix"),
            (Self::ANY, "any"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl BitOr for Transport {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Transport {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        write!(f, "{}", self.tokens().join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_allows_nothing() {
        assert!(!Transport::NONE.allows("tcp"));
        assert!(!Transport::NONE.allows("unix"));
        assert!(!Transport::NONE.allows(""));
    }

    #[test]
    fn test_allows() {
        let t = Transport::TCP | Transport::UNIX;
        assert!(t.allows("tcp"));
        assert!(t.allows("unix"));
        assert!(!t.allows("udp"));
        assert!(!t.allows("serial"));
    }

    #[test]
    fn test_any_accepts_arbitrary_tokens() {
        assert!(Transport::ANY.allows("postgres"));
        assert!(!Transport::ANY.allows(""));
    }

    #[test]
    fn test_display() {
        assert_eq!(Transport::NONE.to_string(), "none");
        assert_eq!(
            (Transport::TCP | Transport::UDP | Transport::UNIX).to_string(),
            "tcp|udp|unix"
        );
    }
}
