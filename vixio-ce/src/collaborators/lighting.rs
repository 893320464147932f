//! Lighting intent extraction
//!
//! Claimed cues that carry lighting intent are turned into a
//! [`LightingHandoff`] for the lighting bridge. Two payload shapes are
//! understood:
//!
//! - Level cue: `{"id": "lighting.level", "args": {"start", "count", "level", "universe", "dest"}}`
//!   sets `count` slots from 1-based `start` to `level` (0.0-1.0) scaled to 0-255.
//! - Raw levels: `{"universe", "levels": [..], "dest"}` with per-channel 0-255 values.
//!
//! Anything else carries no lighting intent and yields `None`.

use serde_json::Value;
use tracing::debug;
use vixio_common::lighting::{LightingHandoff, UNIVERSE_SIZE};

use crate::cue::CuePayload;

/// Cue id marking a level cue
pub const LEVEL_CUE_ID: &str = "lighting.level";

const DEFAULT_UNIVERSE: i64 = 1;

/// Build the bridge handoff for a cue payload, if it encodes lighting intent
pub fn handoff_for(payload: &CuePayload) -> Option<LightingHandoff> {
    let handoff = if payload.get("id").and_then(Value::as_str) == Some(LEVEL_CUE_ID) {
        level_cue_handoff(payload.get("args"))
    } else if let Some(levels) = payload.get("levels").and_then(Value::as_array) {
        raw_levels_handoff(payload, levels)
    } else {
        return None;
    };

    if handoff.is_none() {
        debug!("Cue carries lighting fields but no valid universe; no handoff");
    }
    handoff
}

fn level_cue_handoff(args: Option<&Value>) -> Option<LightingHandoff> {
    let empty = Value::Null;
    let args = args.unwrap_or(&empty);

    let start = number_arg(args, "start").unwrap_or(1.0) as i64;
    let count = number_arg(args, "count").unwrap_or(1.0) as i64;
    let level = number_arg(args, "level").unwrap_or(0.0).clamp(0.0, 1.0);
    let universe = number_arg(args, "universe")
        .map(|u| u as i64)
        .unwrap_or(DEFAULT_UNIVERSE);

    let value = (level * 255.0).round();
    let mut levels = vec![0.0; UNIVERSE_SIZE];
    // Slots outside the universe are dropped
    let first = start.saturating_sub(1).clamp(0, UNIVERSE_SIZE as i64);
    let end = start
        .saturating_sub(1)
        .saturating_add(count.max(0))
        .clamp(first, UNIVERSE_SIZE as i64);
    for slot in &mut levels[first as usize..end as usize] {
        *slot = value;
    }

    LightingHandoff::from_levels(universe, &levels, string_arg(args, "dest"))
}

fn raw_levels_handoff(payload: &CuePayload, levels: &[Value]) -> Option<LightingHandoff> {
    let universe = payload
        .get("universe")
        .and_then(number_value)
        .map(|u| u as i64)
        .unwrap_or(DEFAULT_UNIVERSE);

    let levels: Vec<f64> = levels
        .iter()
        .map(|v| number_value(v).unwrap_or(0.0))
        .collect();

    let destination = payload
        .get("dest")
        .and_then(Value::as_str)
        .map(str::to_string);

    LightingHandoff::from_levels(universe, &levels, destination)
}

fn number_arg(args: &Value, key: &str) -> Option<f64> {
    args.get(key).and_then(number_value)
}

fn string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numbers and numeric strings, as the show editors send both
fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> CuePayload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_level_cue_sets_slot_range() {
        let cue = payload(json!({
            "id": "lighting.level",
            "args": {"start": 3, "count": 2, "level": 1.0, "universe": 4}
        }));

        let handoff = handoff_for(&cue).unwrap();
        assert_eq!(handoff.universe, 4);
        assert_eq!(&handoff.levels[..5], &[0, 0, 255, 255, 0]);
        assert!(handoff.destination.is_none());
    }

    #[test]
    fn test_level_cue_defaults() {
        let cue = payload(json!({"id": "lighting.level", "args": {"level": 0.5}}));

        let handoff = handoff_for(&cue).unwrap();
        assert_eq!(handoff.universe, 1);
        assert_eq!(handoff.levels[0], 128);
        assert!(handoff.levels[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_level_cue_clamps_level_and_ignores_out_of_range_slots() {
        let cue = payload(json!({
            "id": "lighting.level",
            "args": {"start": 511, "count": 5, "level": 3.0, "dest": "10.1.1.20"}
        }));

        let handoff = handoff_for(&cue).unwrap();
        assert_eq!(handoff.levels[510], 255);
        assert_eq!(handoff.levels[511], 255);
        assert_eq!(handoff.levels.len(), UNIVERSE_SIZE);
        assert_eq!(handoff.destination.as_deref(), Some("10.1.1.20"));
    }

    #[test]
    fn test_raw_levels_payload() {
        let cue = payload(json!({"universe": 2, "levels": [10, 300, -4, "64"]}));

        let handoff = handoff_for(&cue).unwrap();
        assert_eq!(handoff.universe, 2);
        assert_eq!(&handoff.levels[..5], &[10, 255, 0, 64, 0]);
    }

    #[test]
    fn test_invalid_universe_yields_no_handoff() {
        let cue = payload(json!({"id": "lighting.level", "args": {"universe": 0}}));
        assert!(handoff_for(&cue).is_none());
    }

    #[test]
    fn test_non_lighting_payload_yields_no_handoff() {
        let cue = payload(json!({"id": "audio.play", "args": {"file": "intro.wav"}}));
        assert!(handoff_for(&cue).is_none());
    }
}
