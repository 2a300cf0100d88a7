//! The core of the intro3d demo: static geometry, pooled GPU resources, shape instances,
//! the orbiting camera and the frame loop that ties them together.
//!
//! Nothing in here opens a window. The host supplies a [`abs::Graphics`] implementation
//! (normally `glow::Context`) and a [`surface::Surface`].

pub mod abs;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod shape;
pub mod surface;
pub mod timing;

pub use error::{ConfigError, RenderError};
