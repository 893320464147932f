//! # Vixio Cue Engine Library (vixio-ce)
//!
//! Cue scheduling and playhead synchronization for live show control.
//!
//! **Purpose:** Accept cue triggers, order them by priority and arrival,
//! track the show's transport position, and expose the ordered pending queue
//! to executors (lighting, audio, video) which claim cues as they fire them.
//!
//! Firing cues is the executor's job; this service only accepts, orders and
//! hands out.

pub mod api;
pub mod collaborators;
pub mod config;
pub mod cue;
pub mod error;

pub use error::{Error, Result};

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use collaborators::PayloadValidator;
use cue::{CueRegistry, PlayheadTracker, QueryView, TriggerIntake};

/// Application state shared across HTTP handlers
///
/// Owns the single registry and playhead for the process; handlers reach
/// them only through this state.
#[derive(Clone)]
pub struct AppState {
    /// Ordered pending cues (claims go straight to the registry)
    pub registry: Arc<CueRegistry>,
    /// Transport position
    pub playhead: Arc<PlayheadTracker>,
    /// Trigger validation + insertion
    pub intake: TriggerIntake,
    /// Read-only view for queue and playhead queries
    pub query: QueryView,
    /// Validation service, when configured
    pub validator: Option<Arc<dyn PayloadValidator>>,
}

impl AppState {
    /// Create state with an empty registry and no validation service
    pub fn new() -> Self {
        let registry = Arc::new(CueRegistry::new());
        let playhead = Arc::new(PlayheadTracker::new());

        Self {
            intake: TriggerIntake::new(Arc::clone(&registry)),
            query: QueryView::new(Arc::clone(&registry), Arc::clone(&playhead)),
            registry,
            playhead,
            validator: None,
        }
    }

    /// Validate every trigger payload with `validator` before accepting it
    pub fn with_validator(mut self, validator: Arc<dyn PayloadValidator>) -> Self {
        self.intake = self.intake.with_validator(Arc::clone(&validator));
        self.validator = Some(validator);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::cue_routes())
        .merge(api::playhead_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Dashboards poll the queue straight from the browser
        .layer(CorsLayer::permissive())
}
