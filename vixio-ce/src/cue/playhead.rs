//! Playhead tracking
//!
//! Holds the latest reported transport position. Successive updates are not
//! required to be monotonic; a rewind or an out-of-order report simply
//! overwrites the previous value. Consumers use `updated_at` to judge staleness.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, Result};

const SECONDS_EXPECTED: &str = "finite number of seconds";

/// Last known transport position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayheadState {
    pub position_seconds: f64,
    /// `None` until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for PlayheadState {
    fn default() -> Self {
        Self {
            position_seconds: 0.0,
            updated_at: None,
        }
    }
}

/// Single process-lifetime playhead record
pub struct PlayheadTracker {
    state: RwLock<PlayheadState>,
}

impl PlayheadTracker {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(PlayheadState::default()),
        }
    }

    /// Overwrite position and timestamp together
    pub async fn update(&self, seconds: f64) -> Result<PlayheadState> {
        if !seconds.is_finite() {
            return Err(Error::validation(
                "seconds",
                SECONDS_EXPECTED,
                format!("{} is not a finite number", seconds),
            ));
        }

        let next = PlayheadState {
            position_seconds: seconds,
            updated_at: Some(vixio_common::time::now()),
        };
        *self.state.write().await = next;

        debug!("Playhead updated to {:.3}s", seconds);
        Ok(next)
    }

    /// Current state
    pub async fn read(&self) -> PlayheadState {
        *self.state.read().await
    }
}

impl Default for PlayheadTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `seconds` from a playhead request document
///
/// Accepts JSON numbers and strings holding a number.
pub fn parse_seconds(value: Option<&Value>) -> Result<f64> {
    let seconds = match value {
        None | Some(Value::Null) => {
            return Err(Error::validation(
                "seconds",
                SECONDS_EXPECTED,
                "field is required",
            ))
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match seconds {
        Some(s) if s.is_finite() => Ok(s),
        _ => Err(Error::validation(
            "seconds",
            SECONDS_EXPECTED,
            format!("cannot interpret {} as seconds", value.map(Value::to_string).unwrap_or_default()),
        )),
    }
}
