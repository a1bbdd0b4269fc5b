pub mod controller;
pub mod glyphs;
pub mod haptics;
pub mod placement;
pub mod ring;
pub mod word;
