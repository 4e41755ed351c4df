use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/boarddb";
const DEFAULT_DATABASE_USER: &str = "board_user";
const DEFAULT_DATABASE_PASSWORD: &str = "board_password";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// `None` keeps whatever `url` carries.
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let mut options = PgConnectOptions::from_str(&self.url)?;
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub http_host: String,
    pub http_port: u16,
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Reads the configuration from the process environment, falling back to
    /// local development defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let url = string_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        // Local defaults only fill in credentials the URL does not carry.
        let url_has_credentials = has_userinfo(&url);
        let credential = |key: &str, default: &str| {
            lookup(key).or_else(|| (!url_has_credentials).then(|| default.to_string()))
        };

        let database = DatabaseConfig {
            user: credential("DATABASE_USER", DEFAULT_DATABASE_USER),
            password: credential("DATABASE_PASSWORD", DEFAULT_DATABASE_PASSWORD),
            url,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            ),
            acquire_timeout: Duration::from_secs(parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                lookup("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )),
        };

        Self {
            database,
            http_host: string_or("HTTP_HOST", DEFAULT_HTTP_HOST),
            http_port: parse_or("HTTP_PORT", lookup("HTTP_PORT"), DEFAULT_HTTP_PORT),
            cors_allowed_origins: string_or("CORS_ALLOWED_ORIGINS", "*"),
        }
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn has_userinfo(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?']).next().unwrap_or_default();
    authority.contains('@')
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
