// src/handlers/post_handlers.rs - posts.* and profile.* procedures over HTTP

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use log::{debug, error, info};

use crate::AppState;
use crate::dtos::post_dtos::{CreatePostDTO, PostIdQuery, UserIdQuery, UsernameQuery};
use crate::dtos::rpc::{ApiResponse, ValidationErrorOut};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::post_services::ServiceError;

/// Maps a procedure failure onto the error envelope and HTTP status.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let code = err.code();
    match err {
        ServiceError::Validation(field_errors) => {
            let mut body = ApiResponse::<()>::error(code, "Invalid input");
            body.validation_error = Some(ValidationErrorOut { field_errors });
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::BadRequest(msg) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(code, msg)),
        ServiceError::TooManyRequests => HttpResponse::TooManyRequests()
            .json(ApiResponse::<()>::error(code, "Too many posts, slow down")),
        ServiceError::NotFound(what) => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(code, format!("{} not found", what)))
        }
        other => {
            error!("procedure failed: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(code, "Internal server error"))
        }
    }
}

/// Undecodable bodies get the same envelope as any other bad input.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("rejected request body: {}", err);
    let response = error_response(ServiceError::BadRequest(err.to_string()));
    InternalError::from_response(err, response).into()
}

pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("rejected query string: {}", err);
    let response = error_response(ServiceError::BadRequest(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error("UNAUTHORIZED", "Sign in to post"))
}

#[get("/posts.getAll")]
pub async fn get_all_posts(app_state: web::Data<AppState>) -> HttpResponse {
    match app_state.posts.get_all().await {
        Ok(rows) => {
            debug!("posts.getAll -> {} rows", rows.len());
            HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", rows))
        }
        Err(e) => error_response(e),
    }
}

#[get("/posts.getById")]
pub async fn get_post_by_id(
    app_state: web::Data<AppState>,
    query: web::Query<PostIdQuery>,
) -> HttpResponse {
    match app_state.posts.get_by_id(query.id).await {
        Ok(row) => HttpResponse::Ok().json(ApiResponse::success("Post retrieved successfully", row)),
        Err(e) => error_response(e),
    }
}

#[get("/posts.getPostsByUserId")]
pub async fn get_posts_by_user_id(
    app_state: web::Data<AppState>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    match app_state.posts.get_by_author(query.user_id).await {
        Ok(rows) => HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", rows)),
        Err(e) => error_response(e),
    }
}

#[post("/posts.create")]
pub async fn create_post(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    body: web::Json<CreatePostDTO>,
) -> HttpResponse {
    let Some(user) = user else {
        return unauthorized();
    };

    match app_state.posts.create(user.user_id, body.into_inner().content).await {
        Ok(post) => {
            info!("posts.create by {} -> {}", user.user_id, post.id);
            HttpResponse::Ok().json(ApiResponse::success("Post created successfully", post))
        }
        Err(e) => error_response(e),
    }
}

#[get("/profile.getUserByUsername")]
pub async fn get_user_by_username(
    app_state: web::Data<AppState>,
    query: web::Query<UsernameQuery>,
) -> HttpResponse {
    match app_state.posts.find_author_by_username(&query.username).await {
        Ok(author) => HttpResponse::Ok().json(ApiResponse::success("User retrieved successfully", author)),
        Err(e) => error_response(e),
    }
}
