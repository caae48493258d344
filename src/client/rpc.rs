// Typed client for the posts procedures.
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use thiserror::Error;

use crate::dtos::post_dtos::CreatePostDTO;
use crate::dtos::rpc::{ApiResponse, FieldErrors};
use crate::models::post::{Post, PostWithAuthor};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{code}: {message}")]
    Procedure { code: String, message: String },
}

/// Result of `posts.create`, already sorted into what a caller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Post),
    ValidationError(FieldErrors),
    OtherError(String),
}

/// Procedures the page consumes. Implementations run on the UI thread,
/// so futures need not be `Send`.
#[async_trait(?Send)]
pub trait RpcClient {
    async fn get_all_posts(&self) -> Result<Vec<PostWithAuthor>, RpcError>;
    async fn create_post(&self, content: &str) -> CreateOutcome;
}

pub struct HttpRpcClient {
    client: Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpRpcClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every call.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/api/{}", self.base_url, procedure)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Sorts a `posts.create` response into a [`CreateOutcome`].
pub fn classify_create_response(status: reqwest::StatusCode, body: &str) -> CreateOutcome {
    let parsed: ApiResponse<Post> = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(_) => return CreateOutcome::OtherError(format!("{}: {}", status, body.trim())),
    };

    if parsed.is_success() {
        if let Some(post) = parsed.data {
            return CreateOutcome::Created(post);
        }
    }
    match parsed.validation_error {
        Some(v) if !v.field_errors.is_empty() => CreateOutcome::ValidationError(v.field_errors),
        _ => CreateOutcome::OtherError(parsed.message),
    }
}

#[async_trait(?Send)]
impl RpcClient for HttpRpcClient {
    async fn get_all_posts(&self) -> Result<Vec<PostWithAuthor>, RpcError> {
        let req = self.client.get(self.procedure_url("posts.getAll"));
        let resp: ApiResponse<Vec<PostWithAuthor>> = self.authorize(req).send().await?.json().await?;

        match resp.data {
            Some(rows) if resp.status == "success" => {
                debug!("posts.getAll returned {} rows", rows.len());
                Ok(rows)
            }
            _ => Err(RpcError::Procedure {
                code: resp.code.unwrap_or_else(|| "UNKNOWN".to_string()),
                message: resp.message,
            }),
        }
    }

    async fn create_post(&self, content: &str) -> CreateOutcome {
        let req = self
            .client
            .post(self.procedure_url("posts.create"))
            .json(&CreatePostDTO { content: content.to_string() });

        let resp = match self.authorize(req).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("posts.create transport error: {}", e);
                return CreateOutcome::OtherError(e.to_string());
            }
        };
        let status = resp.status();
        match resp.text().await {
            Ok(body) => classify_create_response(status, &body),
            Err(e) => CreateOutcome::OtherError(e.to_string()),
        }
    }
}
