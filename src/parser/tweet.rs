//! Decoding of post entries.
//!
//! A post arrives as an `itemContent` of type `TimelineTweet` whose
//! `tweet_results.result` is a union: a plain `Tweet`, a `Tweet` wrapped in
//! `TweetWithVisibilityResults`, or a placeholder for deleted/withheld posts.

use super::user::user_from_result;
use crate::model::{ExtractError, TimelineEntry, Tweet, TweetCounts, TweetId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const ITEM_TYPE_TWEET: &str = "TimelineTweet";
const TWEET_TYPENAME: &str = "Tweet";
const TWEET_WITH_VISIBILITY_TYPENAME: &str = "TweetWithVisibilityResults";
const TWEET_TOMBSTONE_TYPENAME: &str = "TweetTombstone";
const TWEET_UNAVAILABLE_TYPENAME: &str = "TweetUnavailable";

/// Timestamp format used by the upstream `created_at` fields,
/// e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const UPSTREAM_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
struct RawTweet {
    #[serde(default)]
    rest_id: Option<String>,
    #[serde(default)]
    core: Option<RawTweetCore>,
    #[serde(default)]
    legacy: Option<RawTweetLegacy>,
    #[serde(default)]
    note_tweet: Option<RawNoteTweet>,
    #[serde(default)]
    views: Option<RawViews>,
}

#[derive(Debug, Deserialize)]
struct RawTweetCore {
    #[serde(default)]
    user_results: Option<RawResults>,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawTweetLegacy {
    full_text: String,
    created_at: String,
    #[serde(default)]
    conversation_id_str: Option<String>,
    #[serde(default)]
    in_reply_to_status_id_str: Option<String>,
    #[serde(default)]
    quoted_status_id_str: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    favorite_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    reply_count: u64,
    #[serde(default)]
    quote_count: u64,
    #[serde(default)]
    bookmark_count: u64,
}

/// Long-form post body; the legacy text is truncated for these.
#[derive(Debug, Deserialize)]
struct RawNoteTweet {
    note_tweet_results: RawNoteTweetResults,
}

#[derive(Debug, Deserialize)]
struct RawNoteTweetResults {
    result: RawNoteTweetResult,
}

#[derive(Debug, Deserialize)]
struct RawNoteTweetResult {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawViews {
    #[serde(default)]
    count: Option<String>,
}

/// Map a timeline entry to a post.
///
/// Entries without `itemContent` (cursors, modules) and item contents of any
/// other kind yield `None`.
///
/// # Errors
///
/// Returns `ExtractError::EntryMappingFailure` if a post item is malformed.
pub fn timeline_tweet(entry: &TimelineEntry) -> Result<Option<Tweet>, ExtractError> {
    match entry.item_content() {
        Some(item) => tweet_from_item_content(item, entry.entry_id()),
        None => Ok(None),
    }
}

/// Decode an `itemContent` that may hold a `TimelineTweet`.
///
/// The item type comes from `__typename`, falling back to `itemType`. An
/// untagged item is treated as a post only if it carries `tweet_results`.
pub fn tweet_from_item_content(
    item: &Value,
    entry_id: Option<&str>,
) -> Result<Option<Tweet>, ExtractError> {
    let typename = item
        .get("__typename")
        .or_else(|| item.get("itemType"))
        .and_then(Value::as_str);

    match typename {
        Some(ITEM_TYPE_TWEET) => {}
        None if item.get("tweet_results").is_some() => {}
        _ => return Ok(None),
    }

    let result = item
        .get("tweet_results")
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'tweet_results'"))?
        .get("result")
        .filter(|value| !value.is_null());

    match result {
        Some(result) => tweet_from_result(result, entry_id),
        None => {
            warn!(entry_id = ?entry_id, "TimelineTweet is empty");
            Ok(None)
        }
    }
}

/// Decode a post union (`tweet_results.result`).
///
/// # Errors
///
/// Returns `ExtractError::EntryMappingFailure` for unknown union members or
/// missing required fields.
pub fn tweet_from_result(
    result: &Value,
    entry_id: Option<&str>,
) -> Result<Option<Tweet>, ExtractError> {
    match result.get("__typename").and_then(Value::as_str) {
        Some(TWEET_TYPENAME) | None => {
            let raw = RawTweet::deserialize(result)
                .map_err(|e| ExtractError::entry(entry_id, e.to_string()))?;
            build_tweet(raw, entry_id).map(Some)
        }
        Some(TWEET_WITH_VISIBILITY_TYPENAME) => {
            let inner = result
                .get("tweet")
                .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'tweet'"))?;
            tweet_from_result(inner, entry_id)
        }
        Some(TWEET_TOMBSTONE_TYPENAME) | Some(TWEET_UNAVAILABLE_TYPENAME) => {
            warn!(entry_id = ?entry_id, "Post is deleted or withheld, skipping");
            Ok(None)
        }
        Some(other) => {
            debug!(entry_id = ?entry_id, result = %result, "Unknown post union member");
            Err(ExtractError::entry(
                entry_id,
                format!("unknown tweet type '{}'", other),
            ))
        }
    }
}

/// Parse an upstream `created_at` value.
///
/// # Errors
///
/// Returns `ExtractError::EntryMappingFailure` naming the raw value.
pub fn parse_timestamp(raw: &str, entry_id: Option<&str>) -> Result<DateTime<Utc>, ExtractError> {
    DateTime::parse_from_str(raw, UPSTREAM_TIME_FORMAT)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| ExtractError::entry(entry_id, format!("invalid timestamp '{}'", raw)))
}

fn optional_id(raw: Option<String>) -> Option<TweetId> {
    raw.and_then(|id| TweetId::new(id).ok())
}

fn build_tweet(raw: RawTweet, entry_id: Option<&str>) -> Result<Tweet, ExtractError> {
    let rest_id = raw
        .rest_id
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'rest_id'"))?;
    let rest_id = TweetId::new(rest_id).map_err(|e| ExtractError::entry(entry_id, e.to_string()))?;

    let legacy = raw
        .legacy
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'legacy'"))?;

    let created_at = parse_timestamp(&legacy.created_at, entry_id)?;

    let author = match raw.core.and_then(|core| core.user_results).and_then(|r| r.result) {
        Some(result) if !result.is_null() => user_from_result(&result, entry_id)?,
        _ => None,
    };

    let full_text = match raw.note_tweet {
        Some(note) => note.note_tweet_results.result.text,
        None => legacy.full_text,
    };

    // Views arrive as a decimal string; anything else means "not shown".
    let views = raw
        .views
        .and_then(|views| views.count)
        .and_then(|count| count.parse::<u64>().ok());

    Ok(Tweet {
        rest_id,
        full_text,
        created_at,
        author,
        conversation_id: optional_id(legacy.conversation_id_str),
        in_reply_to_status_id: optional_id(legacy.in_reply_to_status_id_str),
        quoted_tweet_id: optional_id(legacy.quoted_status_id_str),
        lang: legacy.lang,
        counts: TweetCounts {
            favorite: legacy.favorite_count,
            retweet: legacy.retweet_count,
            reply: legacy.reply_count,
            quote: legacy.quote_count,
            bookmark: legacy.bookmark_count,
            views,
        },
    })
}
