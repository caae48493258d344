pub mod client;
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use actix_web::web;

use crate::handlers::page_handlers::home_page;
use crate::handlers::post_handlers::{
    create_post, get_all_posts, get_post_by_id, get_posts_by_user_id, get_user_by_username, json_error,
    query_error,
};
use crate::services::post_services::PostService;

#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

/// Registers every route; shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .service(get_all_posts) // GET  /api/posts.getAll
            .service(get_post_by_id) // GET  /api/posts.getById?id=
            .service(get_posts_by_user_id) // GET  /api/posts.getPostsByUserId?userId=
            .service(create_post) // POST /api/posts.create
            .service(get_user_by_username), // GET  /api/profile.getUserByUsername?username=
    )
    .service(home_page); // GET /
}
