use crate::models::{LocationRecord, Place};

/// Suffix appended to places that have no mapped keyword.
const FALLBACK_SUFFIX: &str = " vibes";

/// Maps a saved location to the keyword used for the playlist search.
///
/// The place selected by `travelling` is looked up exactly as entered. Known
/// labels return their keyword verbatim; anything else, including an absent
/// or empty place, returns the place text followed by `" vibes"`.
pub fn resolve(location: &LocationRecord) -> String {
    match location.active_place() {
        Some(place) => resolve_place(place),
        None => FALLBACK_SUFFIX.to_string(),
    }
}

pub fn resolve_place(place: &Place) -> String {
    match place {
        Place::Enumerated(label) => label.keyword().to_string(),
        Place::Freeform(text) => format!("{}{}", text, FALLBACK_SUFFIX),
    }
}
