//! Per-user synthesis session.
//!
//! A session serialises a user's synthesis actions: while one call is
//! pending, further calls are refused with [`SynthesisError::InProgress`]
//! instead of being started. Dropping the pending future (cancellation)
//! releases the session; nothing is written anywhere, so there is nothing to
//! undo.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use super::aws_polly::PollyEngine;
use super::client::SynthesisClient;
use super::types::{AudioPayload, SynthesisRequest, SynthesisState, check_text};
use crate::errors::SynthesisError;

/// Clears the in-flight flag when the synthesis future completes or is
/// dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SynthesisSession {
    id: String,
    client: Arc<SynthesisClient>,
    in_flight: AtomicBool,
    last_state: Mutex<SynthesisState>,
}

impl SynthesisSession {
    pub fn new(id: impl Into<String>, client: Arc<SynthesisClient>) -> Self {
        Self {
            id: id.into(),
            client,
            in_flight: AtomicBool::new(false),
            last_state: Mutex::new(SynthesisState::Idle),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> &Arc<SynthesisClient> {
        &self.client
    }

    /// Whether a synthesis is currently pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Terminal state of the most recent completed action, or `Idle`.
    pub fn last_state(&self) -> SynthesisState {
        *self.last_state.lock()
    }

    /// Build a request from the session catalog and synthesize it.
    pub async fn synthesize(
        &self,
        text: impl Into<String>,
        voice_id: &str,
        engine: PollyEngine,
    ) -> Result<AudioPayload, SynthesisError> {
        let _guard = self.begin()?;

        let text = text.into();
        let request = match self.build_request(text, voice_id, engine).await {
            Ok(request) => request,
            Err(err) => {
                self.finish(SynthesisState::RejectedLocally);
                return Err(err);
            }
        };

        let (result, state) = self.client.synthesize_traced(&request).await;
        self.finish(state);
        result
    }

    async fn build_request(
        &self,
        text: String,
        voice_id: &str,
        engine: PollyEngine,
    ) -> Result<SynthesisRequest, SynthesisError> {
        check_text(&text, engine)?;
        self.client.request(text, voice_id, engine).await
    }

    /// Synthesize an already built request.
    pub async fn synthesize_request(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioPayload, SynthesisError> {
        let _guard = self.begin()?;
        let (result, state) = self.client.synthesize_traced(request).await;
        self.finish(state);
        result
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SynthesisError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                debug!(session = %self.id, "Synthesis refused, previous request still pending");
                SynthesisError::InProgress
            })?;
        Ok(InFlightGuard(&self.in_flight))
    }

    fn finish(&self, state: SynthesisState) {
        debug!(session = %self.id, state = ?state, "Synthesis finished");
        *self.last_state.lock() = state;
    }
}
