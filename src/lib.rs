// ============================================================================
// Spring Application Context Generator - Library Interface
// ============================================================================
//
// Exposes the pipeline stages for integration testing.
// The binary (main.rs) drives them through `cli`.

pub mod model;
pub mod extractor;
pub mod walker;
pub mod emitter;
pub mod generator;
pub mod cli;
