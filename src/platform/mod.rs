// LogChain - platform/mod.rs
//
// Platform layer: output sinks and config.toml loading.
// Dependencies: core (records, formatter), app::params, directories, toml.

pub mod config;
pub mod sink;
