//! Post entity.

use super::identifiers::TweetId;
use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engagement counters attached to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetCounts {
    /// Likes.
    pub favorite: u64,
    /// Reposts.
    pub retweet: u64,
    /// Direct replies.
    pub reply: u64,
    /// Quote posts.
    pub quote: u64,
    /// Bookmarks.
    pub bookmark: u64,
    /// View count; absent on older posts and some protected accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

/// A post extracted from a timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Platform id of the post.
    pub rest_id: TweetId,
    /// Full text; note text when the post is long-form.
    pub full_text: String,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Author, when the upstream record embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Root post of the thread this post belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<TweetId>,
    /// Post this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<TweetId>,
    /// Post quoted by this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_tweet_id: Option<TweetId>,
    /// BCP 47 language tag detected upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Engagement counters.
    #[serde(default)]
    pub counts: TweetCounts,
}
