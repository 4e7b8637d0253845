pub mod auth;
pub mod keyword;
pub mod session;
pub mod spotify;

pub use auth::{AuthService, CredentialVerifier, StaticCredentials};
pub use session::{SessionContext, SessionStore};
pub use spotify::{PlaylistSearch, SpotifyClient};
