//! The set of stores created once at startup.

use super::EntityStore;
use crate::model::{Tweet, User};
use serde_json::{Map, Value};

/// One store per supported operation, keyed by operation name.
///
/// Hosts create this once, hand clones of the individual stores to the
/// interceptors, and subscribe to whichever collections they display.
#[derive(Debug, Clone)]
pub struct Stores {
    /// `Likes` posts.
    pub likes: EntityStore<Tweet>,
    /// `Bookmarks` posts.
    pub bookmarks: EntityStore<Tweet>,
    /// `UserTweets` posts.
    pub user_tweets: EntityStore<Tweet>,
    /// `SearchTimeline` posts.
    pub search_timeline: EntityStore<Tweet>,
    /// `ListSubscribers` users.
    pub list_subscribers: EntityStore<User>,
    /// `ListMembers` users.
    pub list_members: EntityStore<User>,
    /// `Followers` users.
    pub followers: EntityStore<User>,
    /// `Following` users.
    pub following: EntityStore<User>,
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}

impl Stores {
    /// One empty store per operation.
    pub fn new() -> Self {
        Self {
            likes: EntityStore::new("Likes"),
            bookmarks: EntityStore::new("Bookmarks"),
            user_tweets: EntityStore::new("UserTweets"),
            search_timeline: EntityStore::new("SearchTimeline"),
            list_subscribers: EntityStore::new("ListSubscribers"),
            list_members: EntityStore::new("ListMembers"),
            followers: EntityStore::new("Followers"),
            following: EntityStore::new("Following"),
        }
    }

    /// Store sizes as `(name, len)` pairs, in a fixed order.
    pub fn sizes(&self) -> Vec<(&'static str, usize)> {
        let tweets = [&self.likes, &self.bookmarks, &self.user_tweets, &self.search_timeline];
        let users = [
            &self.list_subscribers,
            &self.list_members,
            &self.followers,
            &self.following,
        ];
        tweets
            .iter()
            .map(|store| (store.name(), store.len()))
            .chain(users.iter().map(|store| (store.name(), store.len())))
            .collect()
    }

    /// Serialize current snapshots as `{ "<name>": [...] }`.
    ///
    /// With `only`, just that store is included; an unknown name yields an
    /// empty map.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if an entity fails to serialize.
    pub fn export(&self, only: Option<&str>) -> Result<Map<String, Value>, serde_json::Error> {
        let mut out = Map::new();
        let wanted = |name: &str| only.is_none_or(|selected| selected == name);

        for store in [&self.likes, &self.bookmarks, &self.user_tweets, &self.search_timeline] {
            if wanted(store.name()) {
                out.insert(store.name().to_string(), serde_json::to_value(&*store.snapshot())?);
            }
        }
        for store in [
            &self.list_subscribers,
            &self.list_members,
            &self.followers,
            &self.following,
        ] {
            if wanted(store.name()) {
                out.insert(store.name().to_string(), serde_json::to_value(&*store.snapshot())?);
            }
        }

        Ok(out)
    }
}
