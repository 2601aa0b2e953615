use std::sync::Arc;

use axum::http::HeaderMap;
use dashmap::DashMap;
use tracing::debug;

use crate::config::{Configuration, ServerConfig};
use crate::core::tts::{SynthesisClient, SynthesisSession};

/// Request header naming the caller's session.
pub const SESSION_HEADER: &str = "x-session-id";

/// Session used when the request carries no session header.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Application state shared across all handlers
pub struct AppState {
    pub config: ServerConfig,
    pub client: Arc<SynthesisClient>,
    /// One session per caller; each allows a single synthesis in flight.
    sessions: DashMap<String, Arc<SynthesisSession>>,
}

impl AppState {
    /// Build state backed by Amazon Polly.
    pub fn new(config: ServerConfig, credentials: &Configuration) -> Arc<Self> {
        Self::with_client(config, Arc::new(SynthesisClient::new(credentials)))
    }

    /// Build state around an existing synthesis client.
    pub fn with_client(config: ServerConfig, client: Arc<SynthesisClient>) -> Arc<Self> {
        Arc::new(Self {
            config,
            client,
            sessions: DashMap::new(),
        })
    }

    /// Get or create the session named `id`.
    ///
    /// The session stays registered while the returned lease is alive and is
    /// evicted when the last lease drops with nothing in flight, so the map
    /// only ever holds sessions that are in use.
    pub fn session(self: &Arc<Self>, id: &str) -> SessionLease {
        let session = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                debug!(session = id, "Creating synthesis session");
                Arc::new(SynthesisSession::new(id, self.client.clone()))
            })
            .clone();
        SessionLease {
            state: self.clone(),
            session: Some(session),
        }
    }

    /// Session named by the request's `x-session-id` header.
    pub fn session_for(self: &Arc<Self>, headers: &HeaderMap) -> SessionLease {
        self.session(session_id(headers))
    }

    /// Inspect a live session without creating or retaining it.
    pub fn inspect_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&SynthesisSession) -> R,
    ) -> Option<R> {
        self.sessions.get(id).map(|entry| f(entry.value()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn release(&self, session: Arc<SynthesisSession>) {
        let id = session.id().to_string();
        drop(session);
        // Leases clone under the shard lock, so a count of one means only the
        // map still refers to the session.
        let evicted = self
            .sessions
            .remove_if(&id, |_, s| Arc::strong_count(s) == 1 && !s.is_busy());
        if evicted.is_some() {
            debug!(session = %id, "Evicted idle synthesis session");
        }
    }
}

/// Registered use of a session; evicts the session on drop once idle.
pub struct SessionLease {
    state: Arc<AppState>,
    session: Option<Arc<SynthesisSession>>,
}

impl std::ops::Deref for SessionLease {
    type Target = SynthesisSession;

    fn deref(&self) -> &SynthesisSession {
        // Only `Drop` takes the session out.
        self.session
            .as_deref()
            .unwrap_or_else(|| unreachable!("session lease used after release"))
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.state.release(session);
        }
    }
}

/// Session id carried by `headers`, or [`DEFAULT_SESSION_ID`].
pub fn session_id(headers: &HeaderMap) -> &str {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), "default");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers), "default");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("tab-42"));
        assert_eq!(session_id(&headers), "tab-42");
    }

    fn state() -> Arc<AppState> {
        let credentials = Configuration::from_lookup(|key| match key {
            "AWS_ACCESS_KEY_ID" => Some("AKIATEST".to_string()),
            "AWS_SECRET_ACCESS_KEY" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(ServerConfig::default(), &credentials)
    }

    #[tokio::test]
    async fn test_session_evicted_when_last_lease_drops() {
        let state = state();

        let first = state.session("tab-1");
        let second = state.session("tab-1");
        assert_eq!(state.session_count(), 1);
        assert_eq!(state.inspect_session("tab-1", |s| s.is_busy()), Some(false));

        drop(first);
        assert_eq!(state.session_count(), 1);
        drop(second);
        assert_eq!(state.session_count(), 0);
        assert!(state.inspect_session("tab-1", |_| ()).is_none());
    }

    #[tokio::test]
    async fn test_session_map_stays_bounded() {
        let state = state();

        for i in 0..1000 {
            let lease = state.session(&format!("tab-{i}"));
            assert_eq!(lease.id(), format!("tab-{i}"));
            assert!(state.inspect_session(&format!("tab-{}", i + 1), |_| ()).is_none());
        }
        assert_eq!(state.session_count(), 0);
    }
}
