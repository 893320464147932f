//! Lighting bridge handoff types
//!
//! The lighting bridge owns the wire protocol (sACN framing, unicast/multicast
//! transmission). Other services hand it a `(universe, levels, destination)`
//! tuple and nothing more.

use serde::{Deserialize, Serialize};

/// Channels per universe
pub const UNIVERSE_SIZE: usize = 512;

/// Lowest valid universe number
pub const MIN_UNIVERSE: u16 = 1;

/// Highest valid universe number
pub const MAX_UNIVERSE: u16 = 63999;

/// One universe worth of channel levels destined for the lighting bridge
///
/// `levels` always holds exactly [`UNIVERSE_SIZE`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingHandoff {
    pub universe: u16,
    pub levels: Vec<u8>,
    /// Unicast destination; `None` means multicast
    #[serde(rename = "dest", skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl LightingHandoff {
    /// Build a handoff from raw levels
    ///
    /// Each level is rounded and clamped to 0..=255, the list is truncated or
    /// zero-padded to 512 channels. Returns `None` for universes outside
    /// 1..=63999.
    pub fn from_levels(universe: i64, levels: &[f64], destination: Option<String>) -> Option<Self> {
        let universe = u16::try_from(universe).ok()?;
        if !(MIN_UNIVERSE..=MAX_UNIVERSE).contains(&universe) {
            return None;
        }

        let mut frame = vec![0u8; UNIVERSE_SIZE];
        for (slot, level) in frame.iter_mut().zip(levels.iter()) {
            *slot = clamp_level(*level);
        }

        Some(Self {
            universe,
            levels: frame,
            destination,
        })
    }

    /// True when the handoff targets a single host rather than multicast
    pub fn is_unicast(&self) -> bool {
        self.destination.is_some()
    }
}

fn clamp_level(level: f64) -> u8 {
    if level.is_nan() {
        return 0;
    }
    level.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_padded_to_universe_size() {
        let handoff = LightingHandoff::from_levels(1, &[255.0, 128.0], None).unwrap();
        assert_eq!(handoff.levels.len(), UNIVERSE_SIZE);
        assert_eq!(&handoff.levels[..3], &[255, 128, 0]);
        assert!(!handoff.is_unicast());
    }

    #[test]
    fn test_levels_are_truncated_to_universe_size() {
        let levels = vec![10.0; 600];
        let handoff = LightingHandoff::from_levels(2, &levels, None).unwrap();
        assert_eq!(handoff.levels.len(), UNIVERSE_SIZE);
        assert!(handoff.levels.iter().all(|&v| v == 10));
    }

    #[test]
    fn test_levels_are_clamped_and_rounded() {
        let handoff =
            LightingHandoff::from_levels(1, &[-20.0, 300.0, 127.6, f64::NAN], None).unwrap();
        assert_eq!(&handoff.levels[..4], &[0, 255, 128, 0]);
    }

    #[test]
    fn test_invalid_universe_is_rejected() {
        assert!(LightingHandoff::from_levels(0, &[], None).is_none());
        assert!(LightingHandoff::from_levels(-1, &[], None).is_none());
        assert!(LightingHandoff::from_levels(64000, &[], None).is_none());
        assert!(LightingHandoff::from_levels(63999, &[], None).is_some());
    }

    #[test]
    fn test_destination_serializes_as_dest() {
        let handoff =
            LightingHandoff::from_levels(3, &[], Some("10.0.0.5".to_string())).unwrap();
        assert!(handoff.is_unicast());
        let json = serde_json::to_value(&handoff).unwrap();
        assert_eq!(json["dest"], "10.0.0.5");
        assert_eq!(json["universe"], 3);
    }
}
