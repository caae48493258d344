// src/repositories/post_repository.rs - posts table access

use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::Pool;
use log::{debug, info};
use parking_lot::RwLock;
use tokio_postgres::Row;
use uuid::Uuid;

use super::RepoError;
use crate::models::post::{NewPost, Post};

/// Storage for posts. Listing methods return newest first.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError>;
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError>;
    async fn list_by_author(&self, author_id: Uuid, limit: usize) -> Result<Vec<Post>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;
}

const CREATE_POSTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS posts (
        id UUID PRIMARY KEY,
        author_id UUID NOT NULL,
        content VARCHAR(1024) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );
    CREATE INDEX IF NOT EXISTS posts_author_id_idx ON posts (author_id);
";

/// Posts kept in Postgres.
pub struct PgPostStore {
    pool: Pool,
}

impl PgPostStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates the `posts` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_POSTS_TABLE).await?;
        info!("posts schema ready");
        Ok(())
    }
}

fn post_from_row(row: &Row) -> Post {
    Post {
        id: row.get("id"),
        author_id: row.get("author_id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (id, author_id, content, created_at)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, author_id, content, created_at",
                &[&Uuid::new_v4(), &new_post.author_id, &new_post.content, &Utc::now()],
            )
            .await?;
        let post = post_from_row(&row);
        debug!("inserted post {} for author {}", post.id, post.author_id);
        Ok(post)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, author_id, content, created_at FROM posts
                 ORDER BY created_at DESC LIMIT $1",
                &[&(limit as i64)],
            )
            .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn list_by_author(&self, author_id: Uuid, limit: usize) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, author_id, content, created_at FROM posts
                 WHERE author_id = $1 ORDER BY created_at DESC LIMIT $2",
                &[&author_id, &(limit as i64)],
            )
            .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, author_id, content, created_at FROM posts WHERE id = $1",
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(post_from_row))
    }
}

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an already-built post, keeping its id and timestamp.
    pub fn seed(&self, post: Post) {
        self.posts.write().push(post);
    }

    fn newest_first<'a>(posts: impl DoubleEndedIterator<Item = &'a Post>, limit: usize) -> Vec<Post> {
        // later inserts win ties on created_at
        let mut out: Vec<Post> = posts.rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(limit);
        out
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: new_post.author_id,
            content: new_post.content,
            created_at: Utc::now(),
        };
        self.posts.write().push(post.clone());
        Ok(post)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read();
        Ok(Self::newest_first(posts.iter(), limit))
    }

    async fn list_by_author(&self, author_id: Uuid, limit: usize) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read();
        Ok(Self::newest_first(
            posts.iter().filter(|p| p.author_id == author_id),
            limit,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post_at(author_id: Uuid, content: &str, minutes_ago: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let store = InMemoryPostStore::new();
        let author = Uuid::new_v4();
        store.seed(post_at(author, "🐢", 30));
        store.seed(post_at(author, "🐇", 1));
        store.seed(post_at(author, "🐌", 10));

        let posts = store.list_recent(2).await.unwrap();
        let contents: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["🐇", "🐌"]);
    }

    #[tokio::test]
    async fn list_by_author_filters_other_authors() {
        let store = InMemoryPostStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.seed(post_at(alice, "🍎", 5));
        store.seed(post_at(bob, "🍌", 4));

        let posts = store.list_by_author(bob, 100).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "🍌");
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let store = InMemoryPostStore::new();
        let created = store
            .insert(NewPost { author_id: Uuid::new_v4(), content: "🎉".into() })
            .await
            .unwrap();

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn newer_insert_wins_timestamp_tie() {
        let store = InMemoryPostStore::new();
        let author = Uuid::new_v4();
        let at = Utc::now();
        let first = Post { created_at: at, ..post_at(author, "1️⃣", 0) };
        let second = Post { created_at: at, ..post_at(author, "2️⃣", 0) };
        store.seed(first);
        store.seed(second.clone());

        let posts = store.list_recent(10).await.unwrap();
        assert_eq!(posts[0].id, second.id);
    }
}
