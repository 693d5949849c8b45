//! Decoding of user entries.

use super::tweet::parse_timestamp;
use crate::model::{ExtractError, TimelineEntry, User, UserId};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

const ITEM_TYPE_USER: &str = "TimelineUser";
const USER_TYPENAME: &str = "User";
const USER_UNAVAILABLE_TYPENAME: &str = "UserUnavailable";

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    rest_id: Option<String>,
    #[serde(default)]
    is_blue_verified: bool,
    #[serde(default)]
    legacy: Option<RawUserLegacy>,
    /// Newer payloads move names and creation date here.
    #[serde(default)]
    core: Option<RawUserCore>,
    #[serde(default)]
    avatar: Option<RawAvatar>,
}

#[derive(Debug, Default, Deserialize)]
struct RawUserLegacy {
    #[serde(default)]
    screen_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    followers_count: u64,
    #[serde(default)]
    friends_count: u64,
    #[serde(default)]
    statuses_count: u64,
    #[serde(default)]
    profile_image_url_https: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUserCore {
    #[serde(default)]
    screen_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAvatar {
    #[serde(default)]
    image_url: Option<String>,
}

/// Map a timeline entry to a user.
///
/// Entries without `itemContent` (cursors, modules) and item contents of any
/// other kind yield `None`.
///
/// # Errors
///
/// Returns `ExtractError::EntryMappingFailure` if a user item is malformed.
pub fn timeline_user(entry: &TimelineEntry) -> Result<Option<User>, ExtractError> {
    match entry.item_content() {
        Some(item) => user_from_item_content(item, entry.entry_id()),
        None => Ok(None),
    }
}

/// Decode an `itemContent` that may hold a `TimelineUser`.
pub fn user_from_item_content(
    item: &Value,
    entry_id: Option<&str>,
) -> Result<Option<User>, ExtractError> {
    let typename = item
        .get("__typename")
        .or_else(|| item.get("itemType"))
        .and_then(Value::as_str);

    match typename {
        Some(ITEM_TYPE_USER) => {}
        None if item.get("user_results").is_some() => {}
        _ => return Ok(None),
    }

    let result = item
        .get("user_results")
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'user_results'"))?
        .get("result")
        .filter(|value| !value.is_null());

    match result {
        Some(result) => user_from_result(result, entry_id),
        None => {
            warn!(entry_id = ?entry_id, "TimelineUser is empty");
            Ok(None)
        }
    }
}

/// Decode a user union (`user_results.result`).
///
/// `UserUnavailable` (suspended or deactivated accounts) yields `None`.
///
/// # Errors
///
/// Returns `ExtractError::EntryMappingFailure` for unknown union members or
/// missing required fields.
pub fn user_from_result(result: &Value, entry_id: Option<&str>) -> Result<Option<User>, ExtractError> {
    match result.get("__typename").and_then(Value::as_str) {
        Some(USER_TYPENAME) | None => {}
        Some(USER_UNAVAILABLE_TYPENAME) => {
            warn!(entry_id = ?entry_id, "User is unavailable");
            return Ok(None);
        }
        Some(other) => {
            return Err(ExtractError::entry(
                entry_id,
                format!("unknown user type '{}'", other),
            ))
        }
    }

    let raw = RawUser::deserialize(result).map_err(|e| ExtractError::entry(entry_id, e.to_string()))?;
    build_user(raw, entry_id).map(Some)
}

fn build_user(raw: RawUser, entry_id: Option<&str>) -> Result<User, ExtractError> {
    let rest_id = raw
        .rest_id
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'rest_id'"))?;
    let rest_id = UserId::new(rest_id).map_err(|e| ExtractError::entry(entry_id, e.to_string()))?;

    let legacy = raw.legacy.unwrap_or_default();
    let (core_screen_name, core_name, core_created_at) = match raw.core {
        Some(core) => (core.screen_name, core.name, core.created_at),
        None => (None, None, None),
    };

    let screen_name = legacy
        .screen_name
        .or(core_screen_name)
        .ok_or_else(|| ExtractError::entry(entry_id, "missing field 'screen_name'"))?;
    let name = legacy.name.or(core_name).unwrap_or_else(|| screen_name.clone());

    let created_at = legacy
        .created_at
        .or(core_created_at)
        .map(|raw| parse_timestamp(&raw, entry_id))
        .transpose()?;

    let profile_image_url = legacy
        .profile_image_url_https
        .or_else(|| raw.avatar.and_then(|avatar| avatar.image_url));

    Ok(User {
        rest_id,
        screen_name,
        name,
        description: legacy.description.unwrap_or_default(),
        followers_count: legacy.followers_count,
        friends_count: legacy.friends_count,
        statuses_count: legacy.statuses_count,
        is_blue_verified: raw.is_blue_verified,
        profile_image_url,
        created_at,
    })
}
