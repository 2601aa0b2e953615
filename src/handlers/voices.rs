use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::tts::{PollyEngine, Voice};
use crate::errors::app_error::AppResult;
use crate::state::AppState;

/// A voice as presented to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoiceEntry {
    /// Polly voice id, e.g. `Joanna`
    pub id: String,
    /// Display name of the voice
    pub name: String,
    pub language_code: String,
    pub gender: Option<String>,
    pub engines: Vec<PollyEngine>,
    /// Selection label, e.g. `Joanna (en-US - Female)`
    pub label: String,
}

impl From<&Voice> for VoiceEntry {
    fn from(voice: &Voice) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.display_name().to_string(),
            language_code: voice.language_code().to_string(),
            gender: voice.gender().map(str::to_string),
            engines: voice.engines().to_vec(),
            label: voice.label(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VoicesQuery {
    /// Fetch a fresh list from the provider instead of the cached catalog.
    #[serde(default)]
    pub refresh: bool,
}

/// List the voices offered for synthesis.
///
/// The catalog is fetched from the provider on first use and cached; pass
/// `?refresh=true` to fetch it again.
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VoicesQuery>,
) -> AppResult<Json<Vec<VoiceEntry>>> {
    let languages = &state.config.voice_languages;

    let voices = if query.refresh {
        Arc::new(state.client.list_voices(languages).await?)
    } else {
        state.client.catalog(languages).await?
    };

    debug!(count = voices.len(), refresh = query.refresh, "Serving voice list");
    Ok(Json(voices.iter().map(VoiceEntry::from).collect()))
}
