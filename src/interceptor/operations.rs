//! The operation table.
//!
//! Adding an operation means adding one record here (name, instruction
//! path, entry mapper), one store in [`Stores`], and one line in
//! [`bind_all`].

use super::{Interceptor, Operation, OperationInterceptor};
use crate::model::{Tweet, User};
use crate::parser::{tweet::timeline_tweet, user::timeline_user};
use crate::store::{EntityStore, Stores};

/// Posts the user liked.
// https://x.com/i/api/graphql/lVf2NuhLoYVrpN4nO7uw0Q/Likes
pub const LIKES: Operation<Tweet> = Operation {
    name: "Likes",
    instructions_path: &["data", "user", "result", "timeline_v2", "timeline", "instructions"],
    map_entry: timeline_tweet,
};

/// Accounts subscribed to a list.
// https://x.com/i/api/graphql/B9F2680qyuI6keStbcgv6w/ListSubscribers
pub const LIST_SUBSCRIBERS: Operation<User> = Operation {
    name: "ListSubscribers",
    instructions_path: &["data", "list", "subscribers_timeline", "timeline", "instructions"],
    map_entry: timeline_user,
};

/// The user's bookmarked posts.
pub const BOOKMARKS: Operation<Tweet> = Operation {
    name: "Bookmarks",
    instructions_path: &["data", "bookmark_timeline_v2", "timeline", "instructions"],
    map_entry: timeline_tweet,
};

/// Posts on a profile timeline.
// Also matches UserTweetsAndReplies, which shares the response shape.
pub const USER_TWEETS: Operation<Tweet> = Operation {
    name: "UserTweets",
    instructions_path: &["data", "user", "result", "timeline_v2", "timeline", "instructions"],
    map_entry: timeline_tweet,
};

/// Search results.
pub const SEARCH_TIMELINE: Operation<Tweet> = Operation {
    name: "SearchTimeline",
    instructions_path: &[
        "data",
        "search_by_raw_query",
        "search_timeline",
        "timeline",
        "instructions",
    ],
    map_entry: timeline_tweet,
};

/// Accounts following a user.
pub const FOLLOWERS: Operation<User> = Operation {
    name: "Followers",
    instructions_path: &["data", "user", "result", "timeline", "timeline", "instructions"],
    map_entry: timeline_user,
};

/// Accounts a user follows.
pub const FOLLOWING: Operation<User> = Operation {
    name: "Following",
    instructions_path: &["data", "user", "result", "timeline", "timeline", "instructions"],
    map_entry: timeline_user,
};

/// Members of a list.
pub const LIST_MEMBERS: Operation<User> = Operation {
    name: "ListMembers",
    instructions_path: &["data", "list", "members_timeline", "timeline", "instructions"],
    map_entry: timeline_user,
};

/// Names of every supported operation, in registration order.
pub const OPERATION_NAMES: [&str; 8] = [
    LIKES.name,
    BOOKMARKS.name,
    USER_TWEETS.name,
    SEARCH_TIMELINE.name,
    LIST_SUBSCRIBERS.name,
    LIST_MEMBERS.name,
    FOLLOWERS.name,
    FOLLOWING.name,
];

/// Whether `name` is one of [`OPERATION_NAMES`] (case-sensitive).
pub fn is_known_operation(name: &str) -> bool {
    OPERATION_NAMES.contains(&name)
}

fn bind<T: Clone + 'static>(
    operation: Operation<T>,
    store: &EntityStore<T>,
) -> Result<Box<dyn Interceptor>, regex::Error> {
    Ok(Box::new(OperationInterceptor::new(operation, store.clone())?))
}

/// Build one interceptor per operation, each writing its own store.
///
/// Operations named in `disabled` are left out.
///
/// # Errors
///
/// Returns the `regex` error if a URL pattern does not compile.
pub fn bind_all(stores: &Stores, disabled: &[String]) -> Result<Vec<Box<dyn Interceptor>>, regex::Error> {
    let all = vec![
        bind(LIKES, &stores.likes)?,
        bind(BOOKMARKS, &stores.bookmarks)?,
        bind(USER_TWEETS, &stores.user_tweets)?,
        bind(SEARCH_TIMELINE, &stores.search_timeline)?,
        bind(LIST_SUBSCRIBERS, &stores.list_subscribers)?,
        bind(LIST_MEMBERS, &stores.list_members)?,
        bind(FOLLOWERS, &stores.followers)?,
        bind(FOLLOWING, &stores.following)?,
    ];

    Ok(all
        .into_iter()
        .filter(|interceptor| !disabled.iter().any(|name| name == interceptor.name()))
        .collect())
}
