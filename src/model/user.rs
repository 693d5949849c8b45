//! User account entity.

use super::identifiers::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account as surfaced by follower, subscriber and member timelines,
/// and as the author of a [`Tweet`](super::Tweet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform id of the account.
    pub rest_id: UserId,
    /// Handle, without the leading `@`.
    pub screen_name: String,
    /// Display name.
    pub name: String,
    /// Profile bio.
    #[serde(default)]
    pub description: String,
    /// Accounts following this user.
    #[serde(default)]
    pub followers_count: u64,
    /// Accounts this user follows.
    #[serde(default)]
    pub friends_count: u64,
    /// Posts authored, replies included.
    #[serde(default)]
    pub statuses_count: u64,
    /// Paid verification badge.
    #[serde(default)]
    pub is_blue_verified: bool,
    /// HTTPS avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Account creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
