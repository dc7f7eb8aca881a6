//! Events delivered to polling clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published message and the wall-clock time it was published.
///
/// Serializes as `{"message": "...", "time": "<RFC 3339>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The message payload.
    pub message: String,

    /// When the event was published.
    pub time: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with an explicit time.
    #[must_use]
    pub fn new(message: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            time,
        }
    }

    /// Create an event stamped with the current time.
    #[must_use]
    pub fn now(message: impl Into<String>) -> Self {
        Self::new(message, Utc::now())
    }
}
