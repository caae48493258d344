use chrono::{DateTime, Utc};

use crate::client::post_row::PostRowView;
use crate::models::post::PostWithAuthor;

pub const FEED_ERROR_TEXT: &str = "Something went wrong";

/// What the feed currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feed {
    /// First fetch not resolved yet.
    #[default]
    Loading,
    Loaded(Vec<PostWithAuthor>),
    /// A fetch resolved without any data.
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    Loading,
    Error(&'static str),
    Rows(Vec<PostRowView>),
}

impl Feed {
    /// Applies a fetch result. A failed refetch keeps rows already shown.
    pub fn fetched(&mut self, result: Option<Vec<PostWithAuthor>>) {
        match result {
            Some(rows) => *self = Feed::Loaded(rows),
            None if matches!(self, Feed::Loaded(_)) => {}
            None => *self = Feed::NoData,
        }
    }

    pub fn rows(&self) -> &[PostWithAuthor] {
        match self {
            Feed::Loaded(rows) => rows,
            _ => &[],
        }
    }

    /// Order-preserving projection of the fetched rows.
    pub fn view(&self, now: DateTime<Utc>) -> FeedView {
        match self {
            Feed::Loading => FeedView::Loading,
            Feed::NoData => FeedView::Error(FEED_ERROR_TEXT),
            Feed::Loaded(rows) => {
                FeedView::Rows(rows.iter().map(|row| PostRowView::new(row, now)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::Author;
    use crate::models::post::Post;
    use uuid::Uuid;

    fn row(content: &str) -> PostWithAuthor {
        PostWithAuthor {
            post: Post {
                id: Uuid::new_v4(),
                author_id: Uuid::nil(),
                content: content.into(),
                created_at: Utc::now(),
            },
            author: Author {
                id: Uuid::nil(),
                username: "nil".into(),
                profile_image_url: String::new(),
            },
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(Feed::default().view(Utc::now()), FeedView::Loading);
    }

    #[test]
    fn rows_keep_fetch_order_and_keys() {
        let rows = vec![row("1️⃣"), row("2️⃣"), row("3️⃣")];
        let mut feed = Feed::default();
        feed.fetched(Some(rows.clone()));

        let FeedView::Rows(views) = feed.view(Utc::now()) else {
            panic!("expected rows");
        };
        let keys: Vec<Uuid> = views.iter().map(|v| v.key).collect();
        let expected: Vec<Uuid> = rows.iter().map(|r| r.post.id).collect();
        assert_eq!(keys, expected);
        assert_eq!(views[0].content, "1️⃣");
    }

    #[test]
    fn no_data_shows_placeholder() {
        let mut feed = Feed::default();
        feed.fetched(None);
        assert_eq!(feed.view(Utc::now()), FeedView::Error(FEED_ERROR_TEXT));
    }

    #[test]
    fn failed_refetch_keeps_previous_rows() {
        let mut feed = Feed::default();
        feed.fetched(Some(vec![row("🙂")]));
        feed.fetched(None);
        assert_eq!(feed.rows().len(), 1);
    }
}
