// Readescape shared type definitions
// Each submodule defines types used across the engine.

pub mod errors;
pub mod reading;
pub mod settings;
