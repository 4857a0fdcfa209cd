//! In-memory session state for the number-verification flow.
//!
//! Two components guard the flow's shared state:
//!
//! - [`SessionStore`]: state-token → [`SessionData`] map. One record per
//!   authorization attempt, keyed by the opaque `state` token round-tripped
//!   through the carrier redirect.
//! - [`CurrentSession`]: single-slot handoff cell holding the most recently
//!   completed session until the polling client drains it.
//!
//! Each component owns its lock and never hands out the guarded state
//! directly. Critical sections are short and never await while held. The only
//! operation touching both locks is [`CurrentSession::take_and_reset`], which
//! always acquires slot then store.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

/// One authorization attempt.
///
/// Every field is omitted from JSON when unset, so an untouched record
/// serializes as `{}` and a marker record as `{"error": "..."}`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionData {
    /// Record for a freshly initiated authorization.
    pub fn new(phone_number: impl Into<String>, auth_url: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            auth_url: Some(auth_url.into()),
            ..Default::default()
        }
    }
}

/// In-memory state-token → session map.
///
/// Thread-safe, cloneable. A token is written once by the auth-URL route and
/// resolved by the callback route; the whole map is dropped when the
/// current-session slot is drained, so stale tokens cannot be replayed.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a record under a token. Returns `false` and leaves the existing
    /// record untouched when the token is already taken.
    pub async fn insert(&self, token: &str, data: SessionData) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(token) {
            return false;
        }
        sessions.insert(token.to_string(), data);
        true
    }

    /// Copy of the record for a token.
    pub async fn get(&self, token: &str) -> Option<SessionData> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Record a callback outcome in one critical section.
    ///
    /// Sets `code` when non-empty, and `error` when the carrier reported one.
    /// Returns a copy of the updated record, or `None` (a no-op) when the
    /// token is unknown.
    pub async fn set_outcome(
        &self,
        token: &str,
        code: &str,
        error_description: Option<String>,
    ) -> Option<SessionData> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(token)?;
        if !code.is_empty() {
            session.code = Some(code.to_string());
        }
        if let Some(description) = error_description {
            session.error = Some(description);
        }
        Some(session.clone())
    }

    /// Drop every record.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot handoff cell for the most recently completed session.
///
/// `publish` replaces whatever is in the slot, so only one authorization flow
/// can safely be in flight per process; a second publish before the first is
/// read drops the unread session.
#[derive(Clone)]
pub struct CurrentSession {
    slot: Arc<Mutex<Option<SessionData>>>,
}

impl CurrentSession {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Put a completed session in the slot, replacing any unread one.
    pub async fn publish(&self, data: SessionData) {
        *self.slot.lock().await = Some(data);
    }

    /// Drain the slot.
    ///
    /// An empty slot returns `None` and leaves the store untouched. Otherwise
    /// the session is taken, the whole store is cleared, and the session is
    /// returned. The slot lock is held across the store clear, so the drain
    /// is indivisible: a session is delivered to exactly one caller and no
    /// publish can land between the take and the reset.
    pub async fn take_and_reset(&self, store: &SessionStore) -> Option<SessionData> {
        let mut slot = self.slot.lock().await;
        let data = slot.take()?;
        store.clear().await;
        Some(data)
    }
}

impl Default for CurrentSession {
    fn default() -> Self {
        Self::new()
    }
}
