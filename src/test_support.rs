//! JSON builders for upstream payloads used across unit tests.

use serde_json::{json, Value};

pub const CREATED_AT: &str = "Wed Oct 10 20:19:24 +0000 2018";

pub fn user_result(rest_id: &str, screen_name: &str) -> Value {
    json!({
        "__typename": "User",
        "rest_id": rest_id,
        "is_blue_verified": false,
        "legacy": {
            "screen_name": screen_name,
            "name": format!("{} display", screen_name),
            "description": "",
            "followers_count": 10,
            "friends_count": 5,
            "statuses_count": 100,
            "created_at": CREATED_AT,
            "profile_image_url_https": "https://pbs.example/img.jpg"
        }
    })
}

pub fn tweet_result(rest_id: &str, text: &str) -> Value {
    json!({
        "__typename": "Tweet",
        "rest_id": rest_id,
        "core": {"user_results": {"result": user_result("7", "alice")}},
        "views": {"count": "1234", "state": "EnabledWithCount"},
        "legacy": {
            "full_text": text,
            "created_at": CREATED_AT,
            "conversation_id_str": rest_id,
            "lang": "en",
            "favorite_count": 3,
            "retweet_count": 2,
            "reply_count": 1,
            "quote_count": 0,
            "bookmark_count": 4
        }
    })
}

/// `itemContent` of a post entry.
pub fn tweet_item(rest_id: &str, text: &str) -> Value {
    json!({
        "itemType": "TimelineTweet",
        "__typename": "TimelineTweet",
        "tweet_results": {"result": tweet_result(rest_id, text)},
        "tweetDisplayType": "Tweet"
    })
}

/// `itemContent` of a user entry.
pub fn user_item(rest_id: &str, screen_name: &str) -> Value {
    json!({
        "itemType": "TimelineUser",
        "__typename": "TimelineUser",
        "user_results": {"result": user_result(rest_id, screen_name)},
        "userDisplayType": "User"
    })
}

/// `itemContent` that is neither a post nor a user.
pub fn cursor_item() -> Value {
    json!({
        "itemType": "TimelineTimelineCursor",
        "__typename": "TimelineTimelineCursor",
        "value": "DAABCgABGQ",
        "cursorType": "Bottom"
    })
}

/// An entry wrapping `item_content`.
pub fn entry(entry_id: &str, item_content: Value) -> Value {
    json!({
        "entryId": entry_id,
        "sortIndex": "1",
        "content": {
            "entryType": "TimelineTimelineItem",
            "__typename": "TimelineTimelineItem",
            "itemContent": item_content
        }
    })
}

/// A real pagination cursor entry (no `itemContent`).
pub fn cursor_entry(entry_id: &str) -> Value {
    json!({
        "entryId": entry_id,
        "sortIndex": "0",
        "content": {
            "entryType": "TimelineTimelineCursor",
            "__typename": "TimelineTimelineCursor",
            "value": "HBaAgLydmc",
            "cursorType": "Bottom"
        }
    })
}

pub fn add_entries(entries: Vec<Value>) -> Value {
    json!({"type": "TimelineAddEntries", "entries": entries})
}

pub fn likes_body(instructions: Vec<Value>) -> Value {
    json!({
        "data": {"user": {"result": {
            "__typename": "User",
            "timeline_v2": {"timeline": {"instructions": instructions, "responseObjects": {}}}
        }}}
    })
}

pub fn list_subscribers_body(instructions: Vec<Value>) -> Value {
    json!({
        "data": {"list": {"subscribers_timeline": {"timeline": {"instructions": instructions}}}}
    })
}

pub const LIKES_URL: &str = "https://x.com/i/api/graphql/lVf2NuhLoYVrpN4nO7uw0Q/Likes?variables=%7B%7D";
pub const LIST_SUBSCRIBERS_URL: &str =
    "https://x.com/i/api/graphql/B9F2680qyuI6keStbcgv6w/ListSubscribers?variables=%7B%7D";
