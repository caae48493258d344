use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::relative_time::from_now;
use crate::models::post::PostWithAuthor;

/// Everything needed to draw one feed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRowView {
    pub key: Uuid,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub handle: String,
    pub profile_href: String,
    pub permalink_href: String,
    pub timestamp_label: String,
    pub content: String,
}

pub fn profile_href(username: &str) -> String {
    format!("/@{}", urlencoding::encode(username))
}

pub fn permalink_href(post_id: Uuid) -> String {
    format!("/post/{}", post_id)
}

impl PostRowView {
    /// The timestamp label is relative to `now`, so it changes between renders.
    pub fn new(row: &PostWithAuthor, now: DateTime<Utc>) -> Self {
        let PostWithAuthor { post, author } = row;
        Self {
            key: post.id,
            avatar_url: author.profile_image_url.clone(),
            avatar_alt: format!("@{}'s profile picture", author.username),
            handle: format!("@{}", author.username),
            profile_href: profile_href(&author.username),
            permalink_href: permalink_href(post.id),
            timestamp_label: format!("\u{00A0}· {}", from_now(post.created_at, now)),
            content: post.content.clone(),
        }
    }
}
