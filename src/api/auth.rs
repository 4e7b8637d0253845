use crate::api::middleware::RequireSession;
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{AuthResponse, LoginRequest, MessageResponse, SessionInfo};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = state.auth_service.login(req).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
) -> Result<Json<MessageResponse>> {
    state.sessions.end(session.id).await;

    Ok(Json(MessageResponse {
        message: "You have been logged out.".to_string(),
    }))
}

async fn me(RequireSession(session): RequireSession) -> Json<SessionInfo> {
    Json(session.info())
}
