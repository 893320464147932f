//! Validation service client
//!
//! The narrative/validation service owns the show schema. The cue engine may
//! ask it to check a trigger payload before the cue is accepted. No retries:
//! a failed call is reported to the caller, who decides whether to resubmit.
//!
//! Service contract:
//! - `GET /schema` → 200 schema document, 500 `{"detail": "Schema not found"}`
//! - `POST /validate` → 200 `{"valid": true}`,
//!   400 `{"detail": {"message", "error", "path", "schema_path"}}`

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cue::CuePayload;
use crate::error::{Error, Result};

const SCHEMA_EXPECTED: &str = "document conforming to the show schema";

/// Seam for payload validation before a cue is accepted
#[async_trait]
pub trait PayloadValidator: Send + Sync {
    /// Check a trigger document against the show schema
    async fn validate(&self, document: &CuePayload) -> Result<()>;

    /// Fetch the schema document the validator checks against
    async fn schema(&self) -> Result<Value>;
}

/// FastAPI-style error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Value,
}

/// Structured detail returned with a 400 from `/validate`
#[derive(Debug, Deserialize)]
struct ValidationDetail {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    path: Vec<Value>,
}

/// reqwest-backed client for the validation service
#[derive(Debug, Clone)]
pub struct HttpSchemaValidator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchemaValidator {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build validation client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_detail(response: reqwest::Response) -> Value {
        response
            .json::<ErrorEnvelope>()
            .await
            .map(|envelope| envelope.detail)
            .unwrap_or(Value::Null)
    }
}

#[async_trait]
impl PayloadValidator for HttpSchemaValidator {
    async fn validate(&self, document: &CuePayload) -> Result<()> {
        let url = format!("{}/validate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(document)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Validation service unreachable: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                debug!("Payload accepted by validation service");
                Ok(())
            }
            StatusCode::BAD_REQUEST => {
                let detail = Self::read_detail(response).await;
                Err(rejection_from_detail(detail))
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                let detail = Self::read_detail(response).await;
                warn!("Validation service failed: {}", detail);
                Err(Error::NotFound(detail_text(&detail, "Schema not found")))
            }
            other => Err(Error::Upstream(format!(
                "Validation service returned unexpected status {}",
                other
            ))),
        }
    }

    async fn schema(&self) -> Result<Value> {
        let url = format!("{}/schema", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Validation service unreachable: {}", e)))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Value>()
                .await
                .map_err(|e| Error::Upstream(format!("Schema is not valid JSON: {}", e))),
            StatusCode::INTERNAL_SERVER_ERROR => {
                let detail = Self::read_detail(response).await;
                Err(Error::NotFound(detail_text(&detail, "Schema not found")))
            }
            other => Err(Error::Upstream(format!(
                "Validation service returned unexpected status {}",
                other
            ))),
        }
    }
}

fn detail_text(detail: &Value, fallback: &str) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Null => fallback.to_string(),
        other => other.to_string(),
    }
}

/// Turn a `/validate` 400 detail into a field-level validation error
fn rejection_from_detail(detail: Value) -> Error {
    let parsed: Option<ValidationDetail> = serde_json::from_value(detail.clone()).ok();

    let Some(parsed) = parsed else {
        return Error::validation("payload", SCHEMA_EXPECTED, detail_text(&detail, "Validation failed"));
    };

    let field = if parsed.path.is_empty() {
        "payload".to_string()
    } else {
        let segments: Vec<String> = parsed
            .path
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        format!("payload.{}", segments.join("."))
    };

    let message = parsed
        .error
        .or(parsed.message)
        .unwrap_or_else(|| "Validation failed".to_string());

    Error::validation(field, SCHEMA_EXPECTED, message)
}
