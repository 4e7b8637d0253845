pub mod location;
pub mod playlist;
pub mod session;

pub use location::{
    LocationOptions, LocationRecord, LocationSaved, Place, PlaceLabel, SaveLocationRequest,
};
pub use playlist::{Genre, GenerateRequest, GenerateResponse, PlaylistSummary, SuggestionResponse};
pub use session::{AuthResponse, LoginRequest, MembershipInfo, MessageResponse, SessionInfo};
