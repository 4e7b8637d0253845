use secrecy::Secret;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub jwt_secret: String,
    pub admin_username: String,
    /// Argon2 PHC string for the admin password
    pub admin_password_hash: String,
    pub session_ttl_hours: i64,
    pub playlist_limit: usize,
    pub server_host: String,
    pub server_port: u16,
    /// Allowed CORS origins (comma-separated). Use "*" for any origin (development only).
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub api_url: String,
    pub accounts_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        // JWT_SECRET is required - no insecure defaults
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            anyhow::anyhow!(
                "JWT_SECRET environment variable must be set. \
                Generate a secure secret with: openssl rand -base64 32"
            )
        })?;

        // Validate JWT secret length (at least 32 bytes for HS256)
        if jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long for security. \
                Generate a secure secret with: openssl rand -base64 32"
            ));
        }

        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH").map_err(|_| {
            anyhow::anyhow!(
                "ADMIN_PASSWORD_HASH environment variable must be set to an Argon2 hash. \
                Generate one with: echo -n 'password' | argon2 $(openssl rand -hex 8) -id -e"
            )
        })?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:8000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_secs = env::var("SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Config {
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: Secret::new(required("SPOTIFY_CLIENT_SECRET")?),
                api_url: env::var("SPOTIFY_API_URL")
                    .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
                accounts_url: env::var("SPOTIFY_ACCOUNTS_URL")
                    .unwrap_or_else(|_| "https://accounts.spotify.com".to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            jwt_secret,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password_hash,
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            playlist_limit: env::var("PLAYLIST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            cors_origins,
        })
    }
}

fn required(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} must be set", key))
}
