use serde::{Deserialize, Serialize};

use crate::core::depth::MAX_DEPTH;
use crate::core::time::Millis;
use crate::error::Result;

/// Timing and feedback configuration. Every field has a default, so a JSON
/// override only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceConfig {
    /// Press time that counts as no hesitation at all.
    pub hesitation_threshold_ms: u32,
    /// Upper bound on hesitation.
    pub max_hesitation_ms: u32,
    /// Pause between release and the word appearing.
    pub release_delay_ms: Millis,
    /// Reveal animation length.
    pub appear_ms: Millis,
    /// How long a broken-on-appear word stays before symbolizing.
    pub broken_on_appear_ms: Millis,
    /// Reading delay per depth.
    pub reading_delay_ms: [Millis; 4],
    /// Degrading duration per depth.
    pub degrading_ms: [Millis; 4],
    /// Symbolizing duration per depth.
    pub symbolizing_ms: [Millis; 4],
    /// Pause after symbolizing completes.
    pub linger_ms: Millis,
    /// Reset animation length.
    pub reset_ms: Millis,
    /// Polling period of the degrading and symbolizing loops.
    pub poll_interval_ms: Millis,
    /// How often the press pattern repeats while held.
    pub haptic_repeat_ms: Millis,
    /// Vibration pattern (on/off ms) at press start.
    pub haptic_press_pattern: Vec<u32>,
    /// Vibration pattern replayed while held.
    pub haptic_repeat_pattern: Vec<u32>,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            hesitation_threshold_ms: 1500,
            max_hesitation_ms: 5000,
            release_delay_ms: 100,
            appear_ms: 1400,
            broken_on_appear_ms: 2000,
            reading_delay_ms: [800, 700, 600, 500],
            degrading_ms: [3200, 2800, 2400, 2000],
            symbolizing_ms: [2000, 1800, 1600, 1400],
            linger_ms: 1000,
            reset_ms: 2000,
            poll_interval_ms: 50,
            haptic_repeat_ms: 600,
            haptic_press_pattern: [10, 20].repeat(10),
            haptic_repeat_pattern: [10, 20].repeat(5),
        }
    }
}

impl ExperienceConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn reading_delay(&self, depth: u8) -> Millis {
        self.reading_delay_ms[depth_slot(depth)]
    }

    pub fn degrading_duration(&self, depth: u8) -> Millis {
        self.degrading_ms[depth_slot(depth)]
    }

    pub fn symbolizing_duration(&self, depth: u8) -> Millis {
        self.symbolizing_ms[depth_slot(depth)]
    }
}

fn depth_slot(depth: u8) -> usize {
    usize::from(depth.min(MAX_DEPTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_by_depth() {
        let config = ExperienceConfig::default();
        assert_eq!(config.reading_delay(0), 800);
        assert_eq!(config.reading_delay(3), 500);
        assert_eq!(config.degrading_duration(1), 2800);
        assert_eq!(config.symbolizing_duration(2), 1600);
        assert_eq!(config.haptic_press_pattern.len(), 20);
        assert_eq!(config.haptic_repeat_pattern.len(), 10);
    }

    #[test]
    fn depth_above_max_uses_last_slot() {
        let config = ExperienceConfig::default();
        assert_eq!(config.reading_delay(9), 500);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ExperienceConfig::from_json(r#"{ "appearMs": 900, "lingerMs": 0 }"#).unwrap();
        assert_eq!(config.appear_ms, 900);
        assert_eq!(config.linger_ms, 0);
        assert_eq!(config.reset_ms, 2000);
        assert_eq!(config.reading_delay_ms, [800, 700, 600, 500]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = ExperienceConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
