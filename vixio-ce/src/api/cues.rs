//! Cue trigger, claim and queue endpoints
//!
//! - POST /cue/trigger: accept a trigger document
//! - POST /cue/claim: hand the next cue to an executor
//! - GET /queue: ordered pending cues, optionally only the first `limit`
//! - GET /cue/schema: show schema from the validation service

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use vixio_common::LightingHandoff;

use crate::collaborators::handoff_for;
use crate::cue::{CueItem, TriggerAck};
use crate::error::{Error, Result};
use crate::AppState;

/// Query parameters for GET /queue
#[derive(Debug, Default, Deserialize)]
pub struct QueueQuery {
    pub limit: Option<usize>,
}

/// Pending queue response
#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub queue: Vec<CueItem>,
    pub count: usize,
}

/// Claim response
///
/// `status` is `"claimed"` with a cue, or `"empty"` when nothing was pending
/// (including when a concurrent claimant took the last cue).
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub status: String,
    pub cue: Option<CueItem>,
    /// Lighting bridge handoff, for cues carrying lighting intent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighting: Option<LightingHandoff>,
}

/// POST /cue/trigger
pub async fn trigger_cue(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<TriggerAck>> {
    let Json(document) = body?;
    let ack = state.intake.submit(document).await?;
    Ok(Json(ack))
}

/// POST /cue/claim
pub async fn claim_cue(State(state): State<AppState>) -> Json<ClaimResponse> {
    match state.registry.claim().await {
        Some(cue) => {
            let lighting = handoff_for(&cue.payload);
            if let Some(handoff) = &lighting {
                debug!(
                    "Lighting handoff for universe {} ({})",
                    handoff.universe,
                    if handoff.is_unicast() { "unicast" } else { "multicast" }
                );
            }
            info!(
                "Cue {} claimed (priority {}, sequence {})",
                cue.id, cue.priority, cue.sequence
            );
            Json(ClaimResponse {
                status: "claimed".to_string(),
                cue: Some(cue),
                lighting,
            })
        }
        None => Json(ClaimResponse {
            status: "empty".to_string(),
            cue: None,
            lighting: None,
        }),
    }
}

/// GET /queue
pub async fn get_queue(
    State(state): State<AppState>,
    Query(params): Query<QueueQuery>,
) -> Json<QueueResponse> {
    let queue = match params.limit {
        Some(limit) => state.query.peek_pending(limit).await,
        None => state.query.list_pending().await,
    };

    Json(QueueResponse {
        count: queue.len(),
        queue,
    })
}

/// GET /cue/schema
pub async fn get_schema(State(state): State<AppState>) -> Result<Json<Value>> {
    let validator = state
        .validator
        .as_ref()
        .ok_or_else(|| Error::NotFound("No validation service configured".to_string()))?;

    Ok(Json(validator.schema().await?))
}

/// Build cue routes
pub fn cue_routes() -> Router<AppState> {
    Router::new()
        .route("/cue/trigger", post(trigger_cue))
        .route("/cue/claim", post(claim_cue))
        .route("/cue/schema", get(get_schema))
        .route("/queue", get(get_queue))
}
