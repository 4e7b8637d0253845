use crate::api::middleware::RequireSession;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{MembershipInfo, MessageResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

const PREMIUM_PERKS: [&str; 3] = [
    "Unlimited Playlist Generation",
    "AI-based Song Recommendations",
    "Exclusive Access to Premium Songs",
];

pub fn membership_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(membership))
        .route("/signup", post(sign_up))
}

async fn membership(RequireSession(session): RequireSession) -> Json<MembershipInfo> {
    Json(MembershipInfo {
        premium: session.is_premium(),
        perks: PREMIUM_PERKS.to_vec(),
    })
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
) -> Result<Json<MessageResponse>> {
    state
        .sessions
        .update(session.id, |session| session.sign_up_premium())
        .await?;

    Ok(Json(MessageResponse {
        message: "Thank you for becoming a Premium Member!".to_string(),
    }))
}
