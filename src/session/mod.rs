//! Per-user session state.
//!
//! The session holds exactly three things: the backend bearer token,
//! one-shot OCR prefill data, and pending flash messages. `UserSession`
//! wraps the raw session in those operations so the one-shot contracts
//! (take-and-clear) are explicit instead of ambient key access.
//!
//! Storage is picked once at startup: an in-process store by default,
//! PostgreSQL-backed when database parameters are configured. Either
//! way the browser cookie carries only a signed session id.

mod postgres;

pub use postgres::PostgresSessionStore;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use tower_sessions::session::{Error as SessionError, Id, Record};
use tower_sessions::{session_store, MemoryStore, Session, SessionStore};

use crate::models::OcrFields;

const TOKEN_KEY: &str = "token";
const OCR_DATA_KEY: &str = "ocr_data";
const FLASH_KEY: &str = "_flashes";

/// Severity of a flash message, mapped to a CSS class on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

/// A one-time notification, rendered then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// The portal's view of the caller's session.
#[derive(Debug, Clone)]
pub struct UserSession(Session);

impl UserSession {
    /// The backend bearer token, if the caller has logged in.
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        self.0.get::<String>(TOKEN_KEY).await
    }

    /// Store the bearer token after a successful login.
    pub async fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.0.insert(TOKEN_KEY, token).await
    }

    /// Drop the whole session: token, prefill data, and pending
    /// flashes. Used on logout and whenever the backend answers 401.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.0.flush().await
    }

    /// Stash extracted OCR fields for the next visit to the creation
    /// form.
    pub async fn set_ocr_data(&self, fields: &OcrFields) -> Result<(), SessionError> {
        self.0.insert(OCR_DATA_KEY, fields).await
    }

    /// Read and clear the OCR prefill data in one step. A second take
    /// yields `None` whether or not the form submission in between
    /// succeeded.
    pub async fn take_ocr_data(&self) -> Result<Option<OcrFields>, SessionError> {
        self.0.remove::<OcrFields>(OCR_DATA_KEY).await
    }

    /// Queue a flash message for the next rendered page.
    pub async fn flash(
        &self,
        level: FlashLevel,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        let mut flashes = self
            .0
            .get::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default();
        flashes.push(Flash {
            level,
            message: message.into(),
        });
        self.0.insert(FLASH_KEY, flashes).await
    }

    /// Drain pending flash messages for rendering.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>, SessionError> {
        Ok(self
            .0
            .remove::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state)
            .await
            .map(UserSession)
    }
}

/// Session storage, selected once at startup.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    /// In-process store; sessions die with the server.
    Memory(MemoryStore),
    /// PostgreSQL-backed store; sessions survive restarts.
    Postgres(PostgresSessionStore),
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Memory(store) => store.create(record).await,
            SessionBackend::Postgres(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Memory(store) => store.save(record).await,
            SessionBackend::Postgres(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            SessionBackend::Memory(store) => store.load(session_id).await,
            SessionBackend::Postgres(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            SessionBackend::Memory(store) => store.delete(session_id).await,
            SessionBackend::Postgres(store) => store.delete(session_id).await,
        }
    }
}
