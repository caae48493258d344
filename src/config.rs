use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

#[derive(Debug, Clone)]
pub struct PgSettings {
    pub host: String,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub max_size: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub supabase_url: String,
    pub supabase_key: String,
    pub jwt_secret: String,
    /// Posts are kept in memory when unset.
    pub pg: Option<PgSettings>,
    pub post_rate_limit: usize,
    pub post_rate_window: Duration,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().with_context(|| format!("{} is not valid", name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Reads configuration from the environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        let supabase_url = env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let supabase_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .context("SUPABASE_SERVICE_ROLE_KEY must be set")?;
        let jwt_secret = env::var("SUPABASE_JWT_SECRET").context("SUPABASE_JWT_SECRET must be set")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let pg = match env::var("PG_HOST") {
            Ok(host) => Some(PgSettings {
                host,
                user: env::var("PG_USER").context("PG_USER not set")?,
                password: env::var("PG_PASS").ok(),
                dbname: env::var("PG_DB").context("PG_DB not set")?,
                max_size: parse_or("PG_POOL_SIZE", 16)?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            allowed_origins,
            supabase_url: supabase_url.trim().to_string(),
            supabase_key: supabase_key.trim().to_string(),
            jwt_secret: jwt_secret.trim().to_string(),
            pg,
            post_rate_limit: parse_or("POST_RATE_LIMIT", 3)?,
            post_rate_window: Duration::from_secs(parse_or("POST_RATE_WINDOW_SECS", 60)?),
        })
    }
}

pub fn get_pg_pool(settings: &PgSettings) -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(settings.host.clone());
    cfg.user = Some(settings.user.clone());
    cfg.password = settings.password.clone();
    cfg.dbname = Some(settings.dbname.clone());

    let mut pool = PoolConfig::default();
    pool.max_size = settings.max_size;
    cfg.pool = Some(pool);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}

/// Shows only the ends of a secret, for startup logs.
pub fn mask_key(k: &str) -> String {
    let chars: Vec<char> = k.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_fully_redacted() {
        assert_eq!(mask_key("abc"), "[REDACTED]");
        assert_eq!(mask_key("abcdefghijkl"), "abcd***ijkl");
    }

    #[test]
    fn masking_counts_characters_not_bytes() {
        assert_eq!(mask_key("clé-ñandú-été"), "clé-***-été");
        assert_eq!(mask_key("ééééééé"), "[REDACTED]");
    }
}
