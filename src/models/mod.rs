//! Plane model implementation.
//!
//! The model is implemented as small, pure functions so that the training loop
//! and the renderers share one definition of `out`.

pub mod plane;

pub use plane::*;
