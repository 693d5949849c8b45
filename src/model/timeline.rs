//! Timeline instruction model.
//!
//! The upstream API encodes every paginated feed as a list of instructions.
//! Only entry-adding instructions matter for extraction; every unknown kind
//! decodes to [`TimelineInstruction::Other`] and is ignored.

use serde::Deserialize;
use serde_json::Value;

const ENTRY_TYPE_ITEM: &str = "TimelineTimelineItem";
const ENTRY_TYPE_MODULE: &str = "TimelineTimelineModule";
const ENTRY_TYPE_CURSOR: &str = "TimelineTimelineCursor";

/// One unit of the feed-update protocol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineInstruction {
    /// Append entries to the timeline.
    #[serde(rename = "TimelineAddEntries", alias = "add_entries")]
    AddEntries {
        /// Entries in display order.
        #[serde(default)]
        entries: Vec<TimelineEntry>,
    },
    /// Pin a single entry to the top.
    #[serde(rename = "TimelinePinEntry", alias = "pin_entry")]
    PinEntry {
        /// The pinned entry.
        entry: TimelineEntry,
    },
    /// Replace an existing entry (usually a cursor) in place.
    #[serde(rename = "TimelineReplaceEntry", alias = "replace_entry")]
    ReplaceEntry {
        /// Id of the entry being replaced.
        #[serde(default)]
        entry_id_to_replace: Option<String>,
        /// The replacement.
        entry: TimelineEntry,
    },
    /// Clear-cache, terminate, show-alert and anything added later.
    #[serde(other)]
    Other,
}

impl TimelineInstruction {
    /// Whether this instruction contributes entries to extraction.
    pub fn is_entry_adding(&self) -> bool {
        matches!(self, Self::AddEntries { .. })
    }

    /// Entries this instruction adds; empty for every other kind.
    pub fn added_entries(&self) -> &[TimelineEntry] {
        match self {
            Self::AddEntries { entries } => entries,
            _ => &[],
        }
    }
}

/// Classification of an entry's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Single item carrying `itemContent`.
    Item,
    /// Grouped items (conversation threads, "who to follow" carousels).
    Module,
    /// Pagination cursor.
    Cursor,
    /// No recognisable type tag.
    Unknown,
}

/// One item within an instruction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TimelineEntry {
    /// Upstream entry id, e.g. `tweet-1001` or `cursor-bottom-0`.
    #[serde(rename = "entryId", default)]
    pub entry_id: Option<String>,
    /// Ordering key assigned upstream.
    #[serde(rename = "sortIndex", default)]
    pub sort_index: Option<String>,
    /// Entry payload.
    #[serde(default)]
    pub content: EntryContent,
}

impl TimelineEntry {
    /// `itemContent` payload, if this entry carries one.
    pub fn item_content(&self) -> Option<&Value> {
        self.content.item_content.as_ref()
    }

    /// Upstream entry id, if present.
    pub fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    /// See [`EntryContent::kind`].
    pub fn kind(&self) -> EntryKind {
        self.content.kind()
    }
}

/// Inner `content` of an entry.
///
/// `itemContent` stays raw JSON: its shape belongs to the owning operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EntryContent {
    /// `entryType` tag, e.g. `TimelineTimelineItem`.
    #[serde(rename = "entryType", default)]
    pub entry_type: Option<String>,
    /// `__typename`; newer payloads repeat the entry type here.
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    /// Payload of a single-item entry.
    #[serde(rename = "itemContent", default)]
    pub item_content: Option<Value>,
    /// Members of a module entry.
    #[serde(default)]
    pub items: Vec<ModuleItem>,
    /// `Top` or `Bottom` on cursor entries.
    #[serde(rename = "cursorType", default)]
    pub cursor_type: Option<String>,
    /// Opaque cursor token.
    #[serde(default)]
    pub value: Option<String>,
}

impl EntryContent {
    /// Classify by type tag, falling back to which fields are present.
    pub fn kind(&self) -> EntryKind {
        let tag = self.entry_type.as_deref().or(self.typename.as_deref());
        match tag {
            Some(ENTRY_TYPE_ITEM) => EntryKind::Item,
            Some(ENTRY_TYPE_MODULE) => EntryKind::Module,
            Some(ENTRY_TYPE_CURSOR) => EntryKind::Cursor,
            _ if self.item_content.is_some() => EntryKind::Item,
            _ if self.cursor_type.is_some() => EntryKind::Cursor,
            _ if !self.items.is_empty() => EntryKind::Module,
            _ => EntryKind::Unknown,
        }
    }
}

/// One member of a module entry.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ModuleItem {
    /// Id of the member within the module.
    #[serde(rename = "entryId", default)]
    pub entry_id: Option<String>,
    /// Member payload.
    #[serde(default)]
    pub item: ModuleItemBody,
}

/// Wrapper around a module member's `itemContent`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ModuleItemBody {
    /// Same shape as [`EntryContent::item_content`].
    #[serde(rename = "itemContent", default)]
    pub item_content: Option<Value>,
}
