//! Tag identifiers and their canonical lookup key.
//!
//! The reader hands us a raw 4-byte UID.  Roster membership is keyed on a
//! canonical string form of that UID — each byte printed as plain decimal,
//! joined by single spaces (`"12 34 56 78"`).  The space separator makes
//! the format unambiguous without zero padding, so distinct UIDs always
//! derive distinct keys.

use core::fmt;

/// Raw 4-byte tag UID as read from the transceiver.
///
/// Equality is byte-wise; the system does not enforce uniqueness across
/// physical tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagUid(pub [u8; 4]);

impl TagUid {
    /// Derive the canonical roster key for this UID.
    ///
    /// Total and deterministic: every byte pattern is a valid input, and
    /// identical UIDs always derive identical keys.
    pub fn key(&self) -> TagKey {
        let [a, b, c, d] = self.0;
        TagKey(format!("{a} {b} {c} {d}"))
    }
}

impl fmt::Display for TagUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a} {b} {c} {d}")
    }
}

/// Canonical string key derived from a [`TagUid`].
///
/// This is the only form ever used for roster membership and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagKey(String);

impl TagKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagKey {
    /// Wrap an already-canonical key string (as stored in the roster
    /// source).  No validation: a key that matches no UID simply never
    /// matches a lookup.
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
