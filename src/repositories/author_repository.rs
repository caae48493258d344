// src/repositories/author_repository.rs
use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use urlencoding::encode;
use uuid::Uuid;

use super::RepoError;
use crate::models::author::Author;

/// Read-only access to author profiles kept by the identity provider.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Looks up every id it can; unknown ids are simply absent from the result.
    async fn get_authors(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError>;

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        Ok(self.get_authors(&[id]).await?.into_iter().next())
    }
}

#[derive(Deserialize, Debug)]
struct ProfileRow {
    id: Uuid,
    username: Option<String>,
    profile_picture_url: Option<String>,
}

impl ProfileRow {
    // profiles without a username cannot be linked to, so they are not authors
    fn into_author(self) -> Option<Author> {
        let username = self.username.filter(|u| !u.trim().is_empty())?;
        Some(Author {
            id: self.id,
            username,
            profile_image_url: self.profile_picture_url.unwrap_or_default(),
        })
    }
}

/// `profiles` table read through Supabase (PostgREST).
#[derive(Clone)]
pub struct SupabaseAuthorDirectory {
    client: Client,
    base_rest_url: String,    // e.g. https://xyz.supabase.co/rest/v1
    service_role_key: String, // server-only
}

impl SupabaseAuthorDirectory {
    pub fn new(client: Client, supabase_url: &str, service_role_key: &str) -> Self {
        let trimmed = supabase_url.trim_end_matches('/');
        let base_rest_url = if trimmed.ends_with("/rest/v1") {
            trimmed.to_string()
        } else {
            format!("{}/rest/v1", trimmed)
        };

        Self {
            client,
            base_rest_url,
            service_role_key: service_role_key.to_string(),
        }
    }

    fn profiles_url(&self) -> String {
        format!("{}/profiles", self.base_rest_url)
    }

    fn headers(&self) -> Result<HeaderMap, RepoError> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| {
            RepoError::Supabase(format!("invalid service key header: {}", e))
        };
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", HeaderValue::from_str(&self.service_role_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_role_key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    async fn fetch_profiles(&self, filter: String) -> Result<Vec<ProfileRow>, RepoError> {
        let url = format!(
            "{}?{}&select=id,username,profile_picture_url",
            self.profiles_url(),
            filter
        );
        debug!("fetching author profiles: {}", url);

        let resp = self.client.get(&url).headers(self.headers()?).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(RepoError::Supabase(format!("{} -> {}", status.as_u16(), text)));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl AuthorDirectory for SupabaseAuthorDirectory {
    async fn get_authors(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let list = ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(",");
        let rows = self.fetch_profiles(format!("id=in.({})", list)).await?;
        Ok(rows.into_iter().filter_map(ProfileRow::into_author).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError> {
        let rows = self
            .fetch_profiles(format!("username=eq.{}&limit=1", encode(username)))
            .await?;
        Ok(rows.into_iter().find_map(ProfileRow::into_author))
    }
}

/// Fixed set of authors, for local runs and tests.
#[derive(Default)]
pub struct InMemoryAuthorDirectory {
    authors: RwLock<HashMap<Uuid, Author>>,
}

impl InMemoryAuthorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, author: Author) {
        self.authors.write().insert(author.id, author);
    }
}

#[async_trait]
impl AuthorDirectory for InMemoryAuthorDirectory {
    async fn get_authors(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        let authors = self.authors.read();
        Ok(ids.iter().filter_map(|id| authors.get(id).cloned()).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError> {
        Ok(self
            .authors
            .read()
            .values()
            .find(|a| a.username.eq_ignore_ascii_case(username))
            .cloned())
    }
}
