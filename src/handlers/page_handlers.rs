// src/handlers/page_handlers.rs - server-rendered home page
use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use log::{error, warn};

use crate::AppState;
use crate::client::Effect;
use crate::client::html::render_page;
use crate::client::identity::{IdentitySession, SessionUser};
use crate::client::page::{HomePage, PageEvent};
use crate::middleware::auth_extractor::AuthenticatedUser;

/// Avatar for a signed-in viewer whose profile row is missing or unreadable.
pub const DEFAULT_AVATAR_URL: &str = "/default-avatar.png";

/// GET /
/// Renders the page as the requesting viewer would first see it.
#[get("/")]
pub async fn home_page(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
) -> HttpResponse {
    let mut page = HomePage::new();

    for effect in page.mount() {
        if let Effect::FetchFeed = effect {
            let rows = match app_state.posts.get_all().await {
                Ok(rows) => Some(rows),
                Err(e) => {
                    error!("home page feed failed: {}", e);
                    None
                }
            };
            page.dispatch(PageEvent::FeedFetched(rows));
        }
    }

    let session = match user {
        Some(user) => {
            let profile_image_url = match app_state.posts.author(user.user_id).await {
                Ok(Some(author)) => author.profile_image_url,
                Ok(None) => {
                    warn!("no profile for signed-in user {}", user.user_id);
                    DEFAULT_AVATAR_URL.to_string()
                }
                Err(e) => {
                    warn!("profile lookup for {} failed: {}", user.user_id, e);
                    DEFAULT_AVATAR_URL.to_string()
                }
            };
            IdentitySession::SignedIn(SessionUser { profile_image_url })
        }
        None => IdentitySession::SignedOut,
    };
    page.dispatch(PageEvent::IdentityChanged(session));

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&page.view(Utc::now())))
}
