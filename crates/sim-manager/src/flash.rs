//! Single-use flash messages carried across a redirect.
//!
//! Each browser gets a random session id in a cookie; pending messages are
//! kept in process memory under that id and drained by the next rendered
//! page. Nothing here survives a restart.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderName;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "sim_session";

/// Pending messages older than this are dropped unread
pub const FLASH_TTL: Duration = Duration::from_secs(300);

/// Severity of a flash message; also its CSS class suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// `"success"` or `"error"`
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

/// One user-facing notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    /// A [`FlashLevel::Success`] message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// A [`FlashLevel::Error`] message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
struct Pending {
    queued_at: Instant,
    messages: Vec<Flash>,
}

impl Pending {
    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.queued_at) >= FLASH_TTL
    }
}

/// Per-session flash queues.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct FlashStore {
    pending: Arc<Mutex<HashMap<Uuid, Pending>>>,
}

impl FlashStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `flash` for the next page rendered for `session`.
    pub async fn push(&self, session: Uuid, flash: Flash) {
        self.push_at(session, flash, Instant::now()).await;
    }

    /// [`FlashStore::push`] against an explicit clock reading.
    pub async fn push_at(&self, session: Uuid, flash: Flash, now: Instant) {
        let mut pending = self.pending.lock().await;
        pending.retain(|_, p| !p.expired(now));

        let entry = pending.entry(session).or_insert_with(|| Pending {
            queued_at: now,
            messages: Vec::new(),
        });
        entry.queued_at = now;
        entry.messages.push(flash);
    }

    /// Drains every pending message for `session`, oldest first.
    ///
    /// Messages queued more than [`FLASH_TTL`] ago are discarded unread.
    pub async fn take(&self, session: Uuid) -> Vec<Flash> {
        self.take_at(session, Instant::now()).await
    }

    /// [`FlashStore::take`] against an explicit clock reading.
    pub async fn take_at(&self, session: Uuid, now: Instant) -> Vec<Flash> {
        match self.pending.lock().await.remove(&session) {
            Some(p) if !p.expired(now) => p.messages,
            _ => Vec::new(),
        }
    }
}

/// Session id taken from the request cookie, or freshly issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
}

impl Session {
    /// Issues a fresh random session id.
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Reads the session id out of a raw `Cookie` header value.
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(|id| Self { id })
    }

    /// `Set-Cookie` response part pinning this session on the client
    pub fn cookie(&self) -> [(HeaderName, String); 1] {
        [(
            SET_COOKIE,
            format!(
                "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                self.id
            ),
        )]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(Session::from_cookie_header)
            .unwrap_or_default();
        Ok(session)
    }
}
