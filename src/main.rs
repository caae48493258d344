// src/main.rs
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info, warn};
use reqwest::Client;

use chirp::config::{self, AppConfig, mask_key};
use chirp::middleware::auth_extractor::AuthConfig;
use chirp::repositories::author_repository::SupabaseAuthorDirectory;
use chirp::repositories::post_repository::{InMemoryPostStore, PgPostStore, PostStore};
use chirp::services::post_services::PostService;
use chirp::services::rate_limit::RateLimiter;
use chirp::{AppState, configure};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Supabase URL: {}", cfg.supabase_url);
    info!("Supabase Key: {}", mask_key(&cfg.supabase_key));

    let post_store: Arc<dyn PostStore> = match &cfg.pg {
        Some(pg) => {
            let pool = match config::get_pg_pool(pg) {
                Ok(p) => p,
                Err(e) => {
                    error!("Failed to create PG pool: {:#}", e);
                    std::process::exit(1);
                }
            };
            let store = PgPostStore::new(pool);
            if let Err(e) = store.ensure_schema().await {
                error!("Failed to prepare posts table: {}", e);
                std::process::exit(1);
            }
            Arc::new(store)
        }
        None => {
            warn!("PG_HOST not set, posts are kept in memory");
            Arc::new(InMemoryPostStore::new())
        }
    };

    let http_client = match Client::builder().user_agent("chirp/0.1").build() {
        Ok(c) => c,
        Err(e) => {
            error!("failed to build http client: {}", e);
            std::process::exit(1);
        }
    };

    let authors = SupabaseAuthorDirectory::new(http_client, &cfg.supabase_url, &cfg.supabase_key);
    let limiter = RateLimiter::new(cfg.post_rate_limit, cfg.post_rate_window);

    let state = web::Data::new(AppState {
        posts: PostService::new(post_store, Arc::new(authors), Arc::new(limiter)),
    });
    let auth_data = web::Data::new(AuthConfig { jwt_secret: cfg.jwt_secret.clone() });

    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    let allowed_origins = cfg.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
