//! Client identifiers.

use core::{borrow::Borrow, fmt, str::FromStr};

/// Problem constructing a [`ClientId`] from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("clientId is required")]
pub struct EmptyClientId;

/// An opaque, non-empty client identifier.
///
/// The identity of a client is purely this string. Nothing survives an
/// eviction, so a later poll with the same identifier starts from scratch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Create a client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyClientId`] if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyClientId> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmptyClientId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientId {
    type Err = EmptyClientId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
