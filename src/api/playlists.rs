use crate::api::middleware::RequireSession;
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{
    playlist::{search_query, LOCATION_BASED},
    Genre, GenerateRequest, GenerateResponse, SuggestionResponse,
};
use crate::services::keyword;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn playlist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/suggestion", get(suggestion))
        .route("/generate", post(generate))
}

async fn suggestion(RequireSession(session): RequireSession) -> Json<SuggestionResponse> {
    let genres = Genre::ALL.into_iter().map(|genre| genre.keyword());

    let response = match session.location() {
        Some(location) => {
            let location_keyword = keyword::resolve(location);
            SuggestionResponse {
                message: format!("Location-based suggestion: {}", search_query(&location_keyword)),
                location_keyword: Some(location_keyword),
                search_types: std::iter::once(LOCATION_BASED).chain(genres).collect(),
            }
        }
        None => SuggestionResponse {
            location_keyword: None,
            search_types: genres.collect(),
            message: "Please set your location first for personalized recommendations!".to_string(),
        },
    };

    Json(response)
}

async fn generate(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let keyword = match (req.genre, session.location()) {
        (Some(genre), _) => genre.keyword().to_string(),
        (None, Some(location)) => keyword::resolve(location),
        (None, None) => {
            return Err(AppError::Validation(
                "Please set your location first or select a genre.".to_string(),
            ))
        }
    };

    let playlists = state
        .playlist_search
        .search(&keyword, state.playlist_limit)
        .await;

    tracing::info!(
        "Session {}: {} playlists for '{}'",
        session.id,
        playlists.len(),
        keyword
    );

    if playlists.is_empty() {
        return Err(AppError::NotFound(
            "No playlists found for this search type.".to_string(),
        ));
    }

    Ok(Json(GenerateResponse {
        query: search_query(&keyword),
        keyword,
        playlists,
    }))
}
