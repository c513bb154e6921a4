use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live code → target mapping as seen through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    /// `None` means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
