//! Playhead sync endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::cue::playhead::{parse_seconds, PlayheadState};
use crate::error::{Error, Result};
use crate::AppState;

/// Echo acknowledgement for POST /playhead
#[derive(Debug, Serialize)]
pub struct PlayheadAck {
    pub status: String,
    pub received: Value,
    pub playhead: PlayheadState,
}

/// Current playhead with staleness hint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayheadResponse {
    #[serde(flatten)]
    pub state: PlayheadState,
    /// Milliseconds since the last update; absent before the first update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_ms: Option<u64>,
}

/// POST /playhead
pub async fn update_playhead(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlayheadAck>> {
    let Json(received) = body?;

    let Some(fields) = received.as_object() else {
        return Err(Error::validation(
            "body",
            "JSON object",
            "playhead update must be an object with a 'seconds' field",
        ));
    };

    let seconds = parse_seconds(fields.get("seconds"))?;
    let playhead = state.playhead.update(seconds).await?;

    Ok(Json(PlayheadAck {
        status: "ok".to_string(),
        received,
        playhead,
    }))
}

/// GET /playhead
pub async fn get_playhead(State(state): State<AppState>) -> Json<PlayheadResponse> {
    let current = state.query.current_playhead().await;

    Json(PlayheadResponse {
        age_ms: current.updated_at.map(vixio_common::time::age_ms),
        state: current,
    })
}

/// Build playhead routes
pub fn playhead_routes() -> Router<AppState> {
    Router::new().route("/playhead", get(get_playhead).post(update_playhead))
}
