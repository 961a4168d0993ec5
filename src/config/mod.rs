//! Configuration
//!
//! Simulation tunables loaded from RON files.

pub mod settings;

pub use settings::Settings;
