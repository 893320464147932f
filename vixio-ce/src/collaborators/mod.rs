//! Boundaries to external services
//!
//! - `validation`: schema validation service client
//! - `lighting`: extraction of lighting bridge handoffs from cue payloads

pub mod lighting;
pub mod validation;

pub use lighting::handoff_for;
pub use validation::{HttpSchemaValidator, PayloadValidator};
