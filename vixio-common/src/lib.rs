//! # Vixio Common Library
//!
//! Shared code for the Vixio show-control services:
//! - Error types
//! - Bootstrap configuration loading
//! - Lighting bridge handoff types
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod lighting;
pub mod time;

pub use error::{Error, Result};
pub use lighting::LightingHandoff;
