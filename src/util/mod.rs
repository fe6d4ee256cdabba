// LogChain - util/mod.rs
//
// Utility modules: error types, named constants, tracing bridge setup.
// No dependencies on core, app, or platform layers.

pub mod constants;
pub mod error;
pub mod logging;
