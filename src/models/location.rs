use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Known places, each carrying a display label and a search keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceLabel {
    Mountain,
    Beach,
    Forest,
    Desert,
    CityTour,
    Cafe,
    Mall,
    Fair,
    Hospital,
    Restaurant,
    Park,
}

/// Marker offered alongside the local places; the client replaces it with free text.
pub const OTHER_PLACE: &str = "Other ✍";

impl PlaceLabel {
    pub const ALL: [PlaceLabel; 11] = [
        PlaceLabel::Mountain,
        PlaceLabel::Beach,
        PlaceLabel::Forest,
        PlaceLabel::Desert,
        PlaceLabel::CityTour,
        PlaceLabel::Cafe,
        PlaceLabel::Mall,
        PlaceLabel::Fair,
        PlaceLabel::Hospital,
        PlaceLabel::Restaurant,
        PlaceLabel::Park,
    ];

    pub const TRAVEL: [PlaceLabel; 5] = [
        PlaceLabel::Mountain,
        PlaceLabel::Beach,
        PlaceLabel::Forest,
        PlaceLabel::Desert,
        PlaceLabel::CityTour,
    ];

    pub const LOCAL: [PlaceLabel; 6] = [
        PlaceLabel::Cafe,
        PlaceLabel::Mall,
        PlaceLabel::Fair,
        PlaceLabel::Hospital,
        PlaceLabel::Restaurant,
        PlaceLabel::Park,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlaceLabel::Mountain => "Mountain ⛰",
            PlaceLabel::Beach => "Beach 🏖",
            PlaceLabel::Forest => "Forest 🌲",
            PlaceLabel::Desert => "Desert 🏜",
            PlaceLabel::CityTour => "City Tour 🏙",
            PlaceLabel::Cafe => "Cafe ☕",
            PlaceLabel::Mall => "Mall 🏬",
            PlaceLabel::Fair => "Fair 🎡",
            PlaceLabel::Hospital => "Hospital 🏥",
            PlaceLabel::Restaurant => "Restaurant 🍽",
            PlaceLabel::Park => "Park 🌳",
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PlaceLabel::Mountain => "mountain adventure",
            PlaceLabel::Beach => "beach vibes chill",
            PlaceLabel::Forest => "forest ambient nature",
            PlaceLabel::Desert => "desert folk",
            PlaceLabel::CityTour => "city pop urban",
            PlaceLabel::Cafe => "lofi cafe chill",
            PlaceLabel::Mall => "pop upbeat shopping",
            PlaceLabel::Fair => "festival fun carnival",
            PlaceLabel::Hospital => "calm relaxing healing",
            PlaceLabel::Restaurant => "dinner jazz lounge",
            PlaceLabel::Park => "acoustic folk park",
        }
    }

    pub fn is_travel_destination(&self) -> bool {
        Self::TRAVEL.contains(self)
    }

    /// Exact match on the display label, emoji included.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|place| place.label() == label)
    }
}

/// A place as entered by the user: one of the known labels or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Place {
    Enumerated(PlaceLabel),
    Freeform(String),
}

impl Place {
    pub fn as_str(&self) -> &str {
        match self {
            Place::Enumerated(label) => label.label(),
            Place::Freeform(text) => text,
        }
    }
}

impl From<String> for Place {
    fn from(value: String) -> Self {
        match PlaceLabel::from_label(&value) {
            Some(label) => Place::Enumerated(label),
            None => Place::Freeform(value),
        }
    }
}

impl From<&str> for Place {
    fn from(value: &str) -> Self {
        Place::from(value.to_string())
    }
}

impl From<Place> for String {
    fn from(place: Place) -> Self {
        match place {
            Place::Enumerated(label) => label.label().to_string(),
            Place::Freeform(text) => text,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub country: String,
    pub state: String,
    pub city: String,
    pub travelling: bool,
    pub travel_place: Option<Place>,
    pub current_place: Option<Place>,
}

impl LocationRecord {
    /// The place selected by `travelling`; the other field is ignored.
    pub fn active_place(&self) -> Option<&Place> {
        if self.travelling {
            self.travel_place.as_ref()
        } else {
            self.current_place.as_ref()
        }
    }

    pub fn summary(&self) -> String {
        let place = self.active_place().map(Place::as_str).unwrap_or_default();
        if self.travelling {
            format!(
                "Location set to: {}, {}, {} | Travelling to: {}",
                self.city, self.state, self.country, place
            )
        } else {
            format!(
                "Location set to: {}, {}, {} | Currently at: {}",
                self.city, self.state, self.country, place
            )
        }
    }
}

pub const INCOMPLETE_LOCATION: &str = "Please fill Country, State, and City before saving.";

#[derive(Debug, Deserialize, Validate)]
pub struct SaveLocationRequest {
    #[validate(length(min = 1, message = "Please fill Country, State, and City before saving."))]
    pub country: String,
    #[validate(length(min = 1, message = "Please fill Country, State, and City before saving."))]
    pub state: String,
    #[validate(length(min = 1, message = "Please fill Country, State, and City before saving."))]
    pub city: String,
    pub travelling: bool,
    pub travel_place: Option<String>,
    pub current_place: Option<String>,
}

impl SaveLocationRequest {
    /// Travel places must be one of the travel destination labels.
    pub fn has_valid_travel_place(&self) -> bool {
        match self.travel_place.as_deref().map(PlaceLabel::from_label) {
            Some(Some(label)) => label.is_travel_destination(),
            _ => false,
        }
    }

    /// Keeps only the place that `travelling` selects.
    pub fn into_record(self) -> LocationRecord {
        let (travel_place, current_place) = if self.travelling {
            (self.travel_place.map(Place::from), None)
        } else {
            (None, self.current_place.map(Place::from))
        };

        LocationRecord {
            country: self.country,
            state: self.state,
            city: self.city,
            travelling: self.travelling,
            travel_place,
            current_place,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationSaved {
    pub location: LocationRecord,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LocationOptions {
    pub travel_places: Vec<&'static str>,
    pub local_places: Vec<&'static str>,
    pub genres: Vec<&'static str>,
}
