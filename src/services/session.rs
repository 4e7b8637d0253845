use crate::error::{AppError, Result};
use crate::models::{LocationRecord, SessionInfo};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    NoLocation,
    HasLocation,
}

/// Per-session state. Only login, save-location, premium signup and logout mutate it.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub username: String,
    pub started_at: DateTime<Utc>,
    logged_in: bool,
    location: Option<LocationRecord>,
    premium: bool,
}

impl SessionContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            started_at: Utc::now(),
            logged_in: false,
            location: None,
            premium: false,
        }
    }

    pub fn login(&mut self) {
        self.logged_in = true;
    }

    /// Replaces any previously saved location.
    pub fn save_location(&mut self, location: LocationRecord) -> Result<()> {
        if !self.logged_in {
            return Err(AppError::Unauthorized);
        }
        self.location = Some(location);
        Ok(())
    }

    pub fn sign_up_premium(&mut self) -> Result<()> {
        if !self.logged_in {
            return Err(AppError::Unauthorized);
        }
        self.premium = true;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.location = None;
        self.premium = false;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn location(&self) -> Option<&LocationRecord> {
        self.location.as_ref()
    }

    pub fn is_premium(&self) -> bool {
        self.premium
    }

    pub fn state(&self) -> SessionState {
        match (self.logged_in, &self.location) {
            (false, _) => SessionState::LoggedOut,
            (true, None) => SessionState::NoLocation,
            (true, Some(_)) => SessionState::HasLocation,
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            username: self.username.clone(),
            state: self.state(),
            logged_in: self.is_logged_in(),
            has_location: self.location.is_some(),
            premium: self.premium,
            started_at: self.started_at,
        }
    }
}

/// Live sessions keyed by id. Ending a session resets it and drops it.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a logged-in session with no location.
    pub async fn start(&self, username: &str) -> SessionContext {
        let mut context = SessionContext::new(username);
        context.login();

        let mut sessions = self.sessions.write().await;
        let cutoff = Utc::now() - self.ttl;
        let before = sessions.len();
        sessions.retain(|_, session| session.started_at > cutoff);
        if sessions.len() < before {
            tracing::debug!("Purged {} expired sessions", before - sessions.len());
        }
        sessions.insert(context.id, context.clone());

        tracing::info!(
            "Session {} started for {} ({} active)",
            context.id,
            username,
            sessions.len()
        );
        context
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionContext> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|session| self.is_live(session))
            .cloned()
            .ok_or(AppError::Unauthorized)
    }

    /// Applies `f` to a live session and returns its result.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .filter(|session| self.is_live(session))
            .ok_or(AppError::Unauthorized)?;
        f(session)
    }

    pub async fn save_location(&self, id: Uuid, location: LocationRecord) -> Result<()> {
        self.update(id, |session| session.save_location(location)).await
    }

    /// Logs the session out and tears it down.
    pub async fn end(&self, id: Uuid) -> Option<SessionContext> {
        let mut sessions = self.sessions.write().await;
        let mut session = sessions.remove(&id)?;
        session.logout();
        tracing::info!("Session {} ended for {}", id, session.username);
        Some(session)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_live(&self, session: &SessionContext) -> bool {
        session.is_logged_in() && session.started_at > Utc::now() - self.ttl
    }
}
