pub mod auth;
pub mod location;
pub mod membership;
pub mod middleware;
pub mod playlists;

pub use auth::auth_routes;
pub use location::location_routes;
pub use membership::membership_routes;
pub use playlists::playlist_routes;

use crate::services::{AuthService, PlaylistSearch, SessionStore};
use axum::Router;
use std::sync::Arc;

pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub sessions: SessionStore,
    pub playlist_search: Arc<dyn PlaylistSearch>,
    pub playlist_limit: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .nest("/auth", auth_routes())
            .nest("/location", location_routes())
            .nest("/playlists", playlist_routes())
            .nest("/membership", membership_routes())
            .with_state(state),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaylistSummary;
    use crate::services::{auth::tests::test_config, StaticCredentials};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records every keyword it is asked for.
    #[derive(Default)]
    struct StubSearch {
        keywords: Mutex<Vec<String>>,
        empty: bool,
    }

    #[async_trait]
    impl PlaylistSearch for StubSearch {
        async fn search(&self, keyword: &str, limit: usize) -> Vec<PlaylistSummary> {
            self.keywords.lock().unwrap().push(keyword.to_string());
            if self.empty {
                return vec![];
            }
            (0..limit)
                .map(|i| PlaylistSummary {
                    name: format!("{} #{}", keyword, i + 1),
                    url: format!("https://open.spotify.com/playlist/{}", i),
                    image: None,
                })
                .collect()
        }
    }

    fn app(search: Arc<StubSearch>) -> Router {
        let config = test_config();
        let sessions = SessionStore::new(chrono::Duration::hours(1));
        let verifier = StaticCredentials::new(
            config.admin_username.clone(),
            config.admin_password_hash.clone(),
        )
        .unwrap();

        router(Arc::new(AppState {
            auth_service: Arc::new(AuthService::new(Arc::new(verifier), sessions.clone(), &config)),
            sessions,
            playlist_search: search,
            playlist_limit: 3,
        }))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "hunter2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    fn beach_trip() -> Value {
        json!({
            "country": "India",
            "state": "Goa",
            "city": "Panaji",
            "travelling": true,
            "travel_place": "Beach 🏖",
            "current_place": "Hospital 🏥"
        })
    }

    #[tokio::test]
    async fn test_invalid_credentials_are_rejected() {
        let app = app(Arc::default());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "nope" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_session_routes_require_a_token() {
        let app = app(Arc::default());
        for (method, uri) in [
            (Method::GET, "/api/v1/auth/me"),
            (Method::GET, "/api/v1/location"),
            (Method::GET, "/api/v1/playlists/suggestion"),
            (Method::GET, "/api/v1/membership"),
        ] {
            let (status, _) = send(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        }

        let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_location_options_are_public() {
        let app = app(Arc::default());
        let (status, body) = send(&app, Method::GET, "/api/v1/location/options", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["travel_places"].as_array().unwrap().len(), 5);
        assert_eq!(body["local_places"].as_array().unwrap().len(), 7);
        assert_eq!(body["local_places"][6], "Other ✍");
        assert_eq!(body["genres"], json!(["Pop", "Classical", "Retro", "Jazz", "Lofi"]));
    }

    #[tokio::test]
    async fn test_incomplete_location_is_rejected_without_state_change() {
        let app = app(Arc::default());
        let token = login(&app).await;

        let mut form = beach_trip();
        form["city"] = json!("");
        let (status, body) =
            send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please fill Country, State, and City before saving.");

        let (status, _) = send(&app, Method::GET, "/api/v1/location", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_travel_place_must_be_a_travel_destination() {
        let app = app(Arc::default());
        let token = login(&app).await;

        let mut form = beach_trip();
        form["travel_place"] = json!("Cafe ☕");
        let (status, body) =
            send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please choose where you are travelling.");

        let (status, _) = send(&app, Method::GET, "/api/v1/location", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_saved_location_drives_the_search_keyword() {
        let search = Arc::new(StubSearch::default());
        let app = app(search.clone());
        let token = login(&app).await;

        let (status, body) =
            send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(beach_trip())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Location set to: Panaji, Goa, India | Travelling to: Beach 🏖"
        );
        assert_eq!(body["location"]["current_place"], Value::Null);

        let (_, body) =
            send(&app, Method::GET, "/api/v1/playlists/suggestion", Some(&token), None).await;
        assert_eq!(body["location_keyword"], "beach vibes chill");
        assert_eq!(body["search_types"][0], "Use Location-Based");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/playlists/generate",
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyword"], "beach vibes chill");
        assert_eq!(body["query"], "beach vibes chill music");
        assert_eq!(body["playlists"].as_array().unwrap().len(), 3);
        assert_eq!(*search.keywords.lock().unwrap(), vec!["beach vibes chill"]);
    }

    #[tokio::test]
    async fn test_genre_overrides_location() {
        let search = Arc::new(StubSearch::default());
        let app = app(search.clone());
        let token = login(&app).await;
        send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(beach_trip())).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/playlists/generate",
            Some(&token),
            Some(json!({ "genre": "Jazz" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyword"], "Jazz");
        assert_eq!(*search.keywords.lock().unwrap(), vec!["Jazz"]);
    }

    #[tokio::test]
    async fn test_freeform_place_is_searched_with_vibes() {
        let search = Arc::new(StubSearch::default());
        let app = app(search.clone());
        let token = login(&app).await;

        let form = json!({
            "country": "Kenya",
            "state": "Nairobi",
            "city": "Nairobi",
            "travelling": false,
            "current_place": "Rooftop Party"
        });
        send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(form)).await;
        send(&app, Method::POST, "/api/v1/playlists/generate", Some(&token), Some(json!({}))).await;

        assert_eq!(*search.keywords.lock().unwrap(), vec!["Rooftop Party vibes"]);
    }

    #[tokio::test]
    async fn test_no_results_is_reported_uniformly() {
        let search = Arc::new(StubSearch {
            empty: true,
            ..Default::default()
        });
        let app = app(search);
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/playlists/generate",
            Some(&token),
            Some(json!({ "genre": "Retro" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No playlists found for this search type.");
    }

    #[tokio::test]
    async fn test_logout_discards_location_and_falls_back_to_genres() {
        let search = Arc::new(StubSearch::default());
        let app = app(search.clone());
        let token = login(&app).await;
        send(&app, Method::PUT, "/api/v1/location", Some(&token), Some(beach_trip())).await;

        let (status, _) = send(&app, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        // The old token no longer names a live session
        let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = login(&app).await;
        let (_, me) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(me["has_location"], false);

        let (_, body) =
            send(&app, Method::GET, "/api/v1/playlists/suggestion", Some(&token), None).await;
        assert_eq!(body["location_keyword"], Value::Null);
        assert_eq!(body["search_types"], json!(["Pop", "Classical", "Retro", "Jazz", "Lofi"]));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/playlists/generate",
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/playlists/generate",
            Some(&token),
            Some(json!({ "genre": "Lofi" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyword"], "Lofi");
        assert_eq!(*search.keywords.lock().unwrap(), vec!["Lofi"]);
    }

    #[tokio::test]
    async fn test_premium_signup() {
        let app = app(Arc::default());
        let token = login(&app).await;

        let (_, body) = send(&app, Method::GET, "/api/v1/membership", Some(&token), None).await;
        assert_eq!(body["premium"], false);
        assert_eq!(body["perks"].as_array().unwrap().len(), 3);

        let (status, _) =
            send(&app, Method::POST, "/api/v1/membership/signup", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, "/api/v1/membership", Some(&token), None).await;
        assert_eq!(body["premium"], true);
    }
}
