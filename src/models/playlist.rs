use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub url: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Classical,
    Retro,
    Jazz,
    Lofi,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Pop,
        Genre::Classical,
        Genre::Retro,
        Genre::Jazz,
        Genre::Lofi,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Classical => "Classical",
            Genre::Retro => "Retro",
            Genre::Jazz => "Jazz",
            Genre::Lofi => "Lofi",
        }
    }
}

/// Option shown first when a location has been saved.
pub const LOCATION_BASED: &str = "Use Location-Based";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Overrides the location-based keyword when set.
    pub genre: Option<Genre>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub keyword: String,
    pub query: String,
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    /// Present only when the session has a saved location.
    pub location_keyword: Option<String>,
    pub search_types: Vec<&'static str>,
    pub message: String,
}

/// Text sent to the catalog search for a keyword.
pub fn search_query(keyword: &str) -> String {
    format!("{} music", keyword)
}
