//! Cue scheduling core
//!
//! Components, leaves first:
//! - `playhead`: latest transport position
//! - `registry`: ordered store of pending cues
//! - `intake`: validation and insertion of trigger requests
//! - `query`: read-only view over registry and playhead

pub mod intake;
pub mod playhead;
pub mod query;
pub mod registry;
pub mod types;

pub use intake::{TriggerAck, TriggerIntake};
pub use playhead::{PlayheadState, PlayheadTracker};
pub use query::QueryView;
pub use registry::CueRegistry;
pub use types::{CueItem, CuePayload, CueState, InsertReceipt, Priority};
