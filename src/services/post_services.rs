// src/services/post_services.rs - posts.* and profile.* procedures
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use log::{info, warn};
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::rpc::FieldErrors;
use crate::models::author::Author;
use crate::models::post::{NewPost, Post, PostWithAuthor};
use crate::repositories::RepoError;
use crate::repositories::author_repository::AuthorDirectory;
use crate::repositories::post_repository::PostStore;
use crate::services::rate_limit::RateLimiter;
use crate::services::validation::validate_content;

/// Maximum number of rows any list procedure returns.
pub const FEED_LIMIT: usize = 100;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{1,64}$").expect("valid username pattern"));

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("too many requests")]
    TooManyRequests,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("author for post {0} not found")]
    AuthorMissing(Uuid),
    #[error("repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ServiceError {
    /// Procedure error code carried in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) | ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::TooManyRequests => "TOO_MANY_REQUESTS",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::AuthorMissing(_) | ServiceError::Repo(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    authors: Arc<dyn AuthorDirectory>,
    limiter: Arc<RateLimiter>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        authors: Arc<dyn AuthorDirectory>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self { posts, authors, limiter }
    }

    /// `posts.getAll`: newest posts first, each with its author.
    pub async fn get_all(&self) -> Result<Vec<PostWithAuthor>, ServiceError> {
        let posts = self.posts.list_recent(FEED_LIMIT).await?;
        self.attach_authors(posts).await
    }

    /// `posts.getById`
    pub async fn get_by_id(&self, id: Uuid) -> Result<PostWithAuthor, ServiceError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("post"))?;
        let mut rows = self.attach_authors(vec![post]).await?;
        rows.pop().ok_or(ServiceError::NotFound("post"))
    }

    /// `posts.getPostsByUserId`
    pub async fn get_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, ServiceError> {
        let posts = self.posts.list_by_author(author_id, FEED_LIMIT).await?;
        self.attach_authors(posts).await
    }

    /// `posts.create`: validates, applies the per-author rate limit, stores.
    pub async fn create(&self, author_id: Uuid, content: String) -> Result<Post, ServiceError> {
        validate_content(&content).map_err(ServiceError::Validation)?;

        if !self.limiter.check(author_id) {
            warn!("rate limit hit for author {}", author_id);
            return Err(ServiceError::TooManyRequests);
        }

        let post = self.posts.insert(NewPost { author_id, content }).await?;
        info!("post {} created by {}", post.id, author_id);
        Ok(post)
    }

    /// `profile.getUserByUsername`
    pub async fn find_author_by_username(&self, username: &str) -> Result<Author, ServiceError> {
        let username = username.trim().trim_start_matches('@');
        if !USERNAME_RE.is_match(username) {
            return Err(ServiceError::BadRequest(format!("invalid username: {:?}", username)));
        }
        self.authors
            .find_by_username(username)
            .await?
            .ok_or(ServiceError::NotFound("user"))
    }

    /// Profile of a signed-in viewer, if the directory knows it.
    pub async fn author(&self, id: Uuid) -> Result<Option<Author>, ServiceError> {
        Ok(self.authors.get_author(id).await?)
    }

    async fn attach_authors(&self, posts: Vec<Post>) -> Result<Vec<PostWithAuthor>, ServiceError> {
        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = posts
            .iter()
            .map(|p| p.author_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let authors: HashMap<Uuid, Author> = self
            .authors
            .get_authors(&ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let author = authors
                    .get(&post.author_id)
                    .cloned()
                    .ok_or(ServiceError::AuthorMissing(post.id))?;
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }
}
