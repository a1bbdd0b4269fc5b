pub mod config;
pub mod experience;
pub mod types;
