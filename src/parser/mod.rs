//! Entity extraction from timeline responses.
//!
//! This module provides pure functions that walk a response envelope down to
//! its instruction list and turn each added entry into zero or one entity.
//! Per-entity decoders live in [`tweet`] and [`user`].
//!
//! Extraction is all-or-nothing: the first error (missing path, malformed
//! entry) aborts the whole response, so a partially decoded page never
//! reaches a store.

pub mod tweet;
pub mod user;

use crate::model::{ExtractError, TimelineEntry, TimelineInstruction};
use serde::Deserialize;
use serde_json::Value;

/// Parse a raw response body into JSON.
///
/// # Errors
///
/// Returns `ExtractError::InvalidJson` if the text is not valid JSON.
pub fn parse_body(response_text: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(response_text).map_err(|e| ExtractError::InvalidJson {
        message: e.to_string(),
    })
}

/// Extract entities from a response body.
///
/// * `locate` - navigates from the body to the decoded instruction list
/// * `entry_to_entity` - maps one entry to `Some(entity)`, or `None` for
///   non-entity content such as cursors
///
/// Entities come out in source order across all entry-adding instructions.
/// Nothing is deduplicated or sorted.
///
/// # Errors
///
/// Any error from `locate` or `entry_to_entity` is returned unmodified.
pub fn extract<B, T, L, M>(
    body: &B,
    locate: L,
    mut entry_to_entity: M,
) -> Result<Vec<T>, ExtractError>
where
    B: ?Sized,
    L: FnOnce(&B) -> Result<Vec<TimelineInstruction>, ExtractError>,
    M: FnMut(&TimelineEntry) -> Result<Option<T>, ExtractError>,
{
    let instructions = locate(body)?;

    let mut entities = Vec::new();
    for entry in instructions
        .iter()
        .filter(|instruction| instruction.is_entry_adding())
        .flat_map(TimelineInstruction::added_entries)
    {
        if let Some(entity) = entry_to_entity(entry)? {
            entities.push(entity);
        }
    }

    Ok(entities)
}

/// Follow a fixed field path from the envelope root to the instruction list.
///
/// A `null` value counts as absent: error payloads from the upstream API
/// often carry `"user": null` or `"result": null` instead of omitting keys.
///
/// # Errors
///
/// Returns `ExtractError::ShapeMismatch` naming the first segment that could
/// not be resolved, or the last segment if the list does not decode.
pub fn locate_at_path(
    body: &Value,
    path: &[&str],
) -> Result<Vec<TimelineInstruction>, ExtractError> {
    let mut cursor = body;
    for segment in path {
        cursor = cursor
            .get(segment)
            .filter(|value| !value.is_null())
            .ok_or_else(|| ExtractError::ShapeMismatch {
                path: path.join("."),
                missing: (*segment).to_string(),
            })?;
    }

    Vec::<TimelineInstruction>::deserialize(cursor).map_err(|e| ExtractError::ShapeMismatch {
        path: path.join("."),
        missing: format!(
            "{} as instruction list ({})",
            path.last().copied().unwrap_or("<root>"),
            e
        ),
    })
}

/// Parse a raw response body and extract entities along a static path.
///
/// This is the composition every operation uses.
///
/// # Errors
///
/// `InvalidJson` for unparseable text, otherwise as [`extract`].
pub fn extract_from_response<T, M>(
    response_text: &str,
    path: &[&str],
    entry_to_entity: M,
) -> Result<Vec<T>, ExtractError>
where
    M: FnMut(&TimelineEntry) -> Result<Option<T>, ExtractError>,
{
    let body = parse_body(response_text)?;
    extract(&body, |json| locate_at_path(json, path), entry_to_entity)
}
