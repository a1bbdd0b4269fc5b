use serde::Serialize;

use crate::core::time::Millis;

/// Top-level interaction phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Pressing,
    Released,
    WordAppearing,
    BrokenOnAppear,
    WordVisible,
    ReadingDetected,
    WordDegrading,
    Symbolized,
    ResetToCircle,
}

impl Phase {
    /// Whether the word is on screen during this phase.
    pub fn shows_word(self) -> bool {
        matches!(
            self,
            Phase::WordAppearing
                | Phase::BrokenOnAppear
                | Phase::WordVisible
                | Phase::WordDegrading
                | Phase::Symbolized
                | Phase::ResetToCircle
        )
    }

    /// Whether the pressable circle is on screen during this phase.
    pub fn shows_circle(self) -> bool {
        matches!(self, Phase::Idle | Phase::Pressing)
    }
}

/// Completion signals sent by the word engine to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WordSignal {
    /// The reveal animation finished.
    Visible,
    /// The broken-on-appear word has been shown long enough.
    BrokenShown,
    /// The reading delay elapsed.
    ReadingDetected,
    /// Start degrading right away.
    DegradeNow,
    /// Degradation reached full progress.
    Symbolized,
    /// Symbolizing and lingering are done.
    Reset,
    /// The reset animation finished and word state is cleared.
    DecayComplete,
}

/// A phase change and the instant it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub at: Millis,
}

/// Observable events, buffered per frame for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExperienceEvent {
    #[serde(rename_all = "camelCase")]
    PhaseChanged { from: Phase, to: Phase, at: Millis },
    #[serde(rename_all = "camelCase")]
    DepthChanged { depth: u8, pull_count: u32 },
}

impl From<Transition> for ExperienceEvent {
    fn from(t: Transition) -> Self {
        ExperienceEvent::PhaseChanged {
            from: t.from,
            to: t.to,
            at: t.at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_serializes_camel_case() {
        let json = serde_json::to_string(&Phase::BrokenOnAppear).unwrap();
        assert_eq!(json, "\"brokenOnAppear\"");
    }

    #[test]
    fn event_json_is_tagged() {
        let event = ExperienceEvent::DepthChanged { depth: 1, pull_count: 5 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"depthChanged","depth":1,"pullCount":5}"#);
    }

    #[test]
    fn word_hidden_while_released() {
        assert!(!Phase::Released.shows_word());
        assert!(!Phase::ReadingDetected.shows_word());
        assert!(Phase::ResetToCircle.shows_word());
        assert!(Phase::Pressing.shows_circle());
        assert!(!Phase::Released.shows_circle());
    }
}
