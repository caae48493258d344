//! Feed page client: result cache, procedure client and the page reducers.
//!
//! Components never call the network themselves. They return [`Effect`]s,
//! which [`runtime::FeedApp`] executes and answers with further events.

pub mod cache;
pub mod composer;
pub mod feed;
pub mod html;
pub mod identity;
pub mod page;
pub mod post_row;
pub mod relative_time;
pub mod rpc;
pub mod runtime;

/// Work requested by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load `posts.getAll`, from cache when fresh.
    FetchFeed,
    /// Mark `posts.getAll` stale and refetch it.
    InvalidateFeed,
    /// Issue `posts.create`; the completion carries `request_id` back.
    CreatePost { request_id: u64, content: String },
    /// Show an error notice to the user.
    Notify(String),
}
