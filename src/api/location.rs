use crate::api::middleware::RequireSession;
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{
    location::{INCOMPLETE_LOCATION, OTHER_PLACE},
    Genre, LocationOptions, LocationRecord, LocationSaved, PlaceLabel, SaveLocationRequest,
};
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn location_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_location).put(save_location))
        .route("/options", get(location_options))
}

/// Choices offered by the location form (public)
async fn location_options() -> Json<LocationOptions> {
    let mut local_places: Vec<&'static str> = PlaceLabel::LOCAL
        .into_iter()
        .map(|place| place.label())
        .collect();
    local_places.push(OTHER_PLACE);

    Json(LocationOptions {
        travel_places: PlaceLabel::TRAVEL.into_iter().map(|place| place.label()).collect(),
        local_places,
        genres: Genre::ALL.into_iter().map(|genre| genre.keyword()).collect(),
    })
}

async fn get_location(RequireSession(session): RequireSession) -> Result<Json<LocationRecord>> {
    session
        .location()
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No location saved".to_string()))
}

async fn save_location(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Json(req): Json<SaveLocationRequest>,
) -> Result<Json<LocationSaved>> {
    req.validate()
        .map_err(|_| AppError::Validation(INCOMPLETE_LOCATION.to_string()))?;

    if req.travelling && !req.has_valid_travel_place() {
        return Err(AppError::Validation(
            "Please choose where you are travelling.".to_string(),
        ));
    }
    if !req.travelling && req.current_place.is_none() {
        return Err(AppError::Validation(
            "Please choose the place you are now.".to_string(),
        ));
    }

    let location = req.into_record();
    let message = location.summary();

    state.sessions.save_location(session.id, location.clone()).await?;
    tracing::info!("Session {}: {}", session.id, message);

    Ok(Json(LocationSaved { location, message }))
}
