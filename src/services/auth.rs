use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AuthResponse, LoginRequest};
use crate::services::session::SessionStore;
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Session id
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
}

/// Checks a username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<()>;
}

/// A single configured account whose password is stored as an Argon2 hash.
pub struct StaticCredentials {
    username: String,
    password_hash: String,
}

impl StaticCredentials {
    pub fn new(username: String, password_hash: String) -> Result<Self> {
        PasswordHash::new(&password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Self {
            username,
            password_hash,
        })
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        // Hash check runs even when the username is wrong
        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        if password_ok && username == self.username {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionStore,
    jwt_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        sessions: SessionStore,
        config: &Config,
    ) -> Self {
        Self {
            verifier,
            sessions,
            jwt_secret: config.jwt_secret.clone(),
            session_ttl: Duration::hours(config.session_ttl_hours),
        }
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        if let Err(e) = self.verifier.verify(&req.username, &req.password).await {
            tracing::warn!("Rejected login for {}", req.username);
            return Err(e);
        }

        let session = self.sessions.start(&req.username).await;
        let token = self.generate_token(session.id, &session.username)?;

        Ok(AuthResponse {
            token,
            session: session.info(),
        })
    }

    pub async fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        Ok(token_data.claims)
    }

    fn generate_token(&self, session_id: Uuid, username: &str) -> Result<String> {
        let claims = Claims {
            sub: session_id,
            username: username.to_string(),
            exp: (Utc::now() + self.session_ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}
