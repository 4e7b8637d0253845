use crate::config::SpotifyConfig;
use crate::error::{AppError, Result};
use crate::models::{playlist::search_query, PlaylistSummary};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Spotify rejects search limits above this.
const MAX_SEARCH_LIMIT: usize = 50;

/// Tokens are refreshed this long before they actually expire.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Upper bound on the lifetime accepted from the token endpoint.
const MAX_TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Catalog search for playlists matching a keyword.
///
/// Implementations never fail: provider errors are logged and reported as an
/// empty list, so callers cannot tell "nothing found" from "search failed".
#[async_trait]
pub trait PlaylistSearch: Send + Sync {
    async fn search(&self, keyword: &str, limit: usize) -> Vec<PlaylistSummary>;
}

pub struct SpotifyClient {
    api_url: String,
    accounts_url: String,
    client_id: String,
    client_secret: Secret<String>,
    client: Client,
    token: RwLock<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    refresh_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    playlists: Option<PlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Option<Vec<Option<SpotifyPlaylist>>>,
}

#[derive(Debug, Deserialize)]
struct SpotifyPlaylist {
    name: Option<String>,
    #[serde(default)]
    external_urls: Option<ExternalUrls>,
    #[serde(default)]
    images: Option<Vec<SpotifyImage>>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: Option<String>,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            accounts_url: config.accounts_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client,
            token: RwLock::new(None),
        })
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.refresh_at > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_url);

        tracing::debug!("Requesting Spotify access token from {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Token endpoint returned status: {} - {}",
                status, body
            )));
        }

        let data: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse token response: {}", e)))?;

        let lifetime = data.expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS);

        Ok(AccessToken {
            value: data.access_token,
            refresh_at: Utc::now() + Duration::seconds(lifetime - TOKEN_REFRESH_MARGIN_SECS),
        })
    }

    /// Searches playlists, surfacing provider failures as errors.
    pub async fn search_playlists(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistSummary>> {
        let limit = limit.min(MAX_SEARCH_LIMIT);
        if limit == 0 {
            return Ok(vec![]);
        }

        let token = self.access_token().await?;
        let url = format!("{}/search", self.api_url);
        let query = search_query(keyword);
        let limit_param = limit.to_string();

        tracing::debug!("Searching Spotify playlists: {} with query: {}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("type", "playlist"),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Revoked or expired early; the next search fetches a fresh token
            self.token.write().await.take();
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status: {} - {}",
                status, body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to read response: {}", e)))?;

        let data: SearchResponse = serde_json::from_str(&response_text).map_err(|e| {
            AppError::ExternalApi(format!(
                "Failed to parse response: {} - Response: {}",
                e,
                response_text.chars().take(200).collect::<String>()
            ))
        })?;

        let playlists = into_summaries(data, limit);
        tracing::debug!("Found {} playlists for query: {}", playlists.len(), query);

        Ok(playlists)
    }
}

#[async_trait]
impl PlaylistSearch for SpotifyClient {
    async fn search(&self, keyword: &str, limit: usize) -> Vec<PlaylistSummary> {
        match self.search_playlists(keyword, limit).await {
            Ok(playlists) => playlists,
            Err(e) => {
                tracing::warn!("Playlist search for '{}' failed: {}", keyword, e);
                vec![]
            }
        }
    }
}

fn into_summaries(response: SearchResponse, limit: usize) -> Vec<PlaylistSummary> {
    response
        .playlists
        .and_then(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|playlist| PlaylistSummary {
            name: playlist.name.unwrap_or_else(|| "No Name".to_string()),
            url: playlist
                .external_urls
                .and_then(|urls| urls.spotify)
                .unwrap_or_default(),
            image: playlist
                .images
                .and_then(|images| images.into_iter().next())
                .and_then(|image| image.url),
        })
        .take(limit)
        .collect()
}
