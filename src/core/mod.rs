// LogChain - core/mod.rs
//
// Core layer: data model, caller resolution, and text rendering.
// Dependencies: standard library and chrono only.
// Must NOT depend on: app, platform.

pub mod caller;
pub mod format;
pub mod model;
