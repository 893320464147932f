//! HTTP API handlers for vixio-ce

pub mod cues;
pub mod health;
pub mod playhead;

pub use cues::{claim_cue, cue_routes, get_queue, get_schema, trigger_cue};
pub use health::{get_build_info, health_check, health_routes, service_info};
pub use playhead::{get_playhead, playhead_routes, update_playhead};
