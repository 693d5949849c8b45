//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod exchange;
pub mod identifiers;
pub mod timeline;
pub mod tweet;
pub mod user;

// Re-export for convenience
pub use error::{AppError, ExtractError, InputError};
pub use exchange::{Exchange, RequestDescriptor, ResponseDescriptor};
pub use identifiers::{InvalidTweetId, InvalidUserId, TweetId, UserId};
pub use timeline::{EntryContent, EntryKind, ModuleItem, TimelineEntry, TimelineInstruction};
pub use tweet::{Tweet, TweetCounts};
pub use user::User;
