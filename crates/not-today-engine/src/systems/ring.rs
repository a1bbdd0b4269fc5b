//! Jittered rings drawn behind the circle.
//!
//! Everything is derived from seeded [`Lcg`] streams, so a given seed always
//! yields the same set of rings and the same outlines.

use std::f32::consts::TAU;
use std::fmt::Write;

use glam::Vec2;
use serde::Serialize;

use crate::core::rng::Lcg;

/// Segments per ring outline.
pub const RING_SEGMENTS: usize = 64;

/// Radius jitter of a ring outline (fraction of radius).
pub const RING_VARIANCE: f32 = 0.015;

/// Ring geometry lives in a 100×100 view box.
const VIEW_CENTER: Vec2 = Vec2::new(50.0, 50.0);
const VIEW_RADIUS: f32 = 50.0;

/// One ring and its idle animation parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingLine {
    /// Radius as a fraction of the circle radius.
    pub radius: f32,
    /// Starting rotation in degrees.
    pub rotate_offset: f32,
    /// Base scale, close to 1.
    pub scale_variance: f32,
    /// Sway period in seconds.
    pub period_secs: f32,
    /// Start delay in seconds.
    pub delay_secs: f32,
    pub stroke_width: f32,
    /// Seed of this ring's outline jitter.
    pub path_seed: u64,
}

impl RingLine {
    /// Outline points in view-box coordinates (first and last coincide).
    pub fn points(&self) -> Vec<Vec2> {
        ring_points(VIEW_CENTER, self.radius * VIEW_RADIUS, RING_VARIANCE, self.path_seed)
    }

    /// Closed SVG path of the outline.
    pub fn svg_path(&self) -> String {
        svg_path(&self.points())
    }
}

/// Generate 3–7 rings, evenly spread between 0.35 and 0.65 of the radius.
pub fn ring_lines(seed: u64) -> Vec<RingLine> {
    let mut rng = Lcg::new(seed);
    let count = (rng.next_f64() * 5.0) as usize + 3;
    (0..count)
        .map(|i| RingLine {
            radius: 0.35 + (i as f32 / count as f32) * 0.3,
            rotate_offset: rng.next_f64() as f32 * 360.0,
            scale_variance: 0.995 + rng.next_f64() as f32 * 0.01,
            period_secs: 5.0 + rng.next_f64() as f32 * 2.0,
            delay_secs: rng.next_f64() as f32 * 0.5,
            stroke_width: 1.0 + rng.next_f64() as f32 * 0.5,
            path_seed: (rng.next_f64() * 10_000.0) as u64,
        })
        .collect()
}

/// Points around `center` with each radius scaled by `1 + (draw - 0.5) * variance`.
pub fn ring_points(center: Vec2, radius: f32, variance: f32, seed: u64) -> Vec<Vec2> {
    let mut rng = Lcg::new(seed);
    (0..=RING_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / RING_SEGMENTS as f32 * TAU;
            let jitter = (rng.next_f64() as f32 - 0.5) * variance;
            center + Vec2::from_angle(angle) * radius * (1.0 + jitter)
        })
        .collect()
}

/// `M x y L x y ... Z` with two decimals.
pub fn svg_path(points: &[Vec2]) -> String {
    let mut path = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{} {:.2} {:.2} ", command, p.x, p.y);
    }
    path.push('Z');
    path
}
