//! # Identity
//!
//! Unique identifier and display name carried by every domain object.
//!
//! Format: 128 bits, random (UUID v4).
//! - Allocated once at construction, never changed afterwards
//! - Collision probability is negligible process-wide
//! - Displayed as 32 lowercase hex characters
//!
//! The name is free text and may change at any time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::GeometryError;

/// Unique identifier of a domain object
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Uid(Uuid);

impl Uid {
    /// Generate a fresh random uid
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a Uid from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Parse either the simple (32 hex) or hyphenated form
    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        Uuid::parse_str(text)
            .map(Self)
            .map_err(|_| GeometryError::InvalidUid(text.to_string()))
    }

    /// Create a nil/zero Uid (useful for testing)
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Check if this is a nil Uid
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for Uid {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Uid plus mutable display name
///
/// Two identities are equal when their uids are equal, whatever their names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    uid: Uid,
    name: String,
}

impl Identity {
    /// Allocate a fresh identity with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: Uid::new(),
            name: name.into(),
        }
    }

    /// Allocate a fresh identity with an empty name
    pub fn anonymous() -> Self {
        Self::new(String::new())
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Same name, brand-new uid
    pub fn fresh_copy(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for Identity {}

/// Capability shared by every identity-bearing object
pub trait Identified {
    fn identity(&self) -> &Identity;

    fn identity_mut(&mut self) -> &mut Identity;

    fn uid(&self) -> Uid {
        self.identity().uid()
    }

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn set_name(&mut self, name: &str) {
        self.identity_mut().set_name(name);
    }

    /// Identity comparison: true when both carry the same uid
    fn is_same<O: Identified + ?Sized>(&self, other: &O) -> bool {
        self.uid() == other.uid()
    }
}

impl Identified for Identity {
    fn identity(&self) -> &Identity {
        self
    }

    fn identity_mut(&mut self) -> &mut Identity {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_creation() {
        let uid = Uid::new();
        assert!(!uid.is_nil());
    }

    #[test]
    fn test_uids_are_distinct() {
        let a = Identity::anonymous();
        let b = Identity::anonymous();
        assert_ne!(a.uid(), b.uid());
        assert_ne!(a, b);
    }

    #[test]
    fn test_uid_from_bytes() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let uid = Uid::from_bytes(bytes);
        assert_eq!(uid.as_bytes(), &bytes);
    }

    #[test]
    fn test_uid_display_and_parse() {
        let uid = Uid::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        let display = format!("{}", uid);
        assert_eq!(display, "000102030405060708090a0b0c0d0e0f");
        assert_eq!(display.parse::<Uid>().unwrap(), uid);
    }

    #[test]
    fn test_uid_parse_garbage() {
        let err = Uid::parse("this is not a uid").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidUid(_)));
    }

    #[test]
    fn test_name_defaults_and_changes() {
        let mut plain = Identity::anonymous();
        assert_eq!(plain.name(), "");
        let named = Identity::new("myname");
        assert_eq!(named.name(), "myname");

        let uid = plain.uid();
        plain.set_name("newname");
        assert_eq!(plain.name(), "newname");
        assert_eq!(plain.uid(), uid);
    }

    #[test]
    fn test_equality_is_by_uid() {
        let a = Identity::new("same");
        let mut b = a.clone();
        b.set_name("different");
        assert_eq!(a, b);
        assert!(a.is_same(&b));

        let c = a.fresh_copy();
        assert_eq!(c.name(), "same");
        assert_ne!(a, c);
    }
}
