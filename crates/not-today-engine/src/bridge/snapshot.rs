//! Read-only view of the experience for the presentation layer.
//! Serialized to camelCase JSON; must stay in sync with the host renderer.
//!
//! The renderer draws from this alone and sends nothing back except pointer
//! events.

use serde::Serialize;

use crate::api::types::Phase;
use crate::systems::glyphs::Glyph;
use crate::systems::placement::Placement;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub depth: u8,
    pub pull_count: u32,
    pub pattern_b: bool,
    pub hesitation_ms: u32,
    /// The selected word, untransformed.
    pub word: Option<String>,
    /// Characters to draw, already transformed for the current phase.
    /// Empty while no word is on screen.
    pub glyphs: Vec<Glyph>,
    pub degrading_progress: f64,
    pub symbolizing_progress: f64,
    pub placement: Option<Placement>,
    pub tail_length: usize,
    pub shake_intensity: f32,
    pub circle_visible: bool,
    /// Short, quick breaths while pressed; slow breaths when idle.
    pub circle_breathing_fast: bool,
}

impl Snapshot {
    /// Shown text as a plain string.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
