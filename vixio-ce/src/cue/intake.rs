//! Trigger intake
//!
//! Turns a raw trigger document into exactly one registry insert. All
//! coercion and collaborator calls happen here, before the registry lock is
//! taken.
//!
//! Priority policy:
//! - absent or `null` → 50
//! - integer → used as is
//! - finite float → truncated toward zero
//! - string holding an integer → parsed
//! - anything else → `Error::Validation` on field `priority`
//! - out of [0, 100] → clamped (never rejected)

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::registry::CueRegistry;
use super::types::{CuePayload, Priority};
use crate::collaborators::PayloadValidator;
use crate::error::{Error, Result};

const PRIORITY_EXPECTED: &str = "integer in [0, 100]";

/// Acknowledgement returned for an accepted trigger
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAck {
    pub status: String,
    pub id: Uuid,
    pub sequence: u64,
    pub priority: Priority,
    pub queue_size: usize,
}

/// Validates trigger requests and inserts them into the registry
#[derive(Clone)]
pub struct TriggerIntake {
    registry: Arc<CueRegistry>,
    validator: Option<Arc<dyn PayloadValidator>>,
}

impl TriggerIntake {
    pub fn new(registry: Arc<CueRegistry>) -> Self {
        Self {
            registry,
            validator: None,
        }
    }

    /// Check every payload with `validator` before accepting it
    pub fn with_validator(mut self, validator: Arc<dyn PayloadValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Accept a trigger document
    ///
    /// The whole document, `priority` included, becomes the cue payload.
    pub async fn submit(&self, document: Value) -> Result<TriggerAck> {
        let payload = match document {
            Value::Object(payload) => payload,
            other => {
                info!("Rejected trigger: body is not a JSON object");
                return Err(Error::validation(
                    "body",
                    "JSON object",
                    format!("got {}", json_type_name(&other)),
                ));
            }
        };

        let priority = resolve_priority(&payload).inspect_err(|e| {
            info!("Rejected trigger: {}", e);
        })?;

        if let Some(validator) = &self.validator {
            validator.validate(&payload).await.inspect_err(|e| {
                info!("Trigger payload failed validation: {}", e);
            })?;
        }

        let receipt = self.registry.insert(priority, payload).await;

        debug!(
            "Queued cue {} at priority {} ({} pending)",
            receipt.id, priority, receipt.queue_size
        );

        Ok(TriggerAck {
            status: "queued".to_string(),
            id: receipt.id,
            sequence: receipt.sequence,
            priority,
            queue_size: receipt.queue_size,
        })
    }
}

/// Resolve the effective priority of a trigger document
pub fn resolve_priority(payload: &CuePayload) -> Result<Priority> {
    let raw = match payload.get("priority") {
        None | Some(Value::Null) => return Ok(Priority::DEFAULT),
        Some(value) => coerce_integer(value).ok_or_else(|| {
            Error::validation(
                "priority",
                PRIORITY_EXPECTED,
                format!("cannot interpret {} as an integer", value),
            )
        })?,
    };

    if Priority::new(raw).is_none() {
        warn!("Priority {} out of range, clamping to [0, 100]", raw);
    }
    Ok(Priority::clamped(raw))
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.is_u64() {
                // Above i64::MAX; clamps to 100 either way
                Some(i64::MAX)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
