use chrono::{DateTime, TimeDelta, Utc};

/// A status message that disappears after a deadline.
///
/// The controller keeps one slot: showing a new notice replaces both the
/// text and the deadline of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Notice {
            message: message.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
