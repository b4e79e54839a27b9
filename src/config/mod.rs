//! JSON configuration for the command-line tools.
//!
//! Everything here is canvas-relative (fractions in [0,1], measured from the
//! top-left corner). This is the boundary where ranges are validated and
//! fractions are resolved to the pixel-space [`GridConfig`](crate::engine::GridConfig)
//! the engine consumes.
pub mod render;
