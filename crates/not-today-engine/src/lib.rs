pub mod api;
pub mod assets;
pub mod bridge;
pub mod core;
pub mod input;
pub mod systems;

mod error;
#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::config::ExperienceConfig;
pub use api::experience::Experience;
pub use api::types::{ExperienceEvent, Phase, Transition, WordSignal};
pub use assets::dictionary::Dictionary;
pub use bridge::snapshot::Snapshot;
pub use core::depth::{calculate_depth, should_trigger_b_pattern, MAX_DEPTH};
pub use core::rng::{Lcg, RandomSource};
#[cfg(feature = "thread-rng")]
pub use core::rng::ThreadEntropy;
pub use core::store::{DepthState, DepthStore, KeyValueStore, MemoryStore};
pub use core::time::Millis;
pub use error::{Error, Result};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::glyphs::{Glyph, SYMBOLS};
pub use systems::haptics::Haptics;
pub use systems::placement::{Placement, Reveal};
pub use systems::ring::{ring_lines, RingLine};
