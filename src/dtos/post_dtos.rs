use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input of `posts.create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostDTO {
    pub content: String,
}

/// Query of `posts.getById`.
#[derive(Debug, Deserialize)]
pub struct PostIdQuery {
    pub id: Uuid,
}

/// Query of `posts.getPostsByUserId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Query of `profile.getUserByUsername`.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}
