use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::services::SessionContext;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::sync::Arc;

/// The caller's live session, resolved from the bearer token.
pub struct RequireSession(pub SessionContext);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth_service.verify_token(token).await?;
        let session = state.sessions.get(claims.sub).await?;

        Ok(RequireSession(session))
    }
}
