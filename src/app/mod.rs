// LogChain - app/mod.rs
//
// Application layer: the Logger configuration object, Entry chains, the
// process-wide facade, and the format-string macros.
// Dependencies: core, platform (sinks).

pub mod entry;
pub mod facade;
pub mod logger;
pub mod macros;
pub mod params;
