//! This module contains the GL-facing building blocks of the renderer:
//! the capability surface, shader programs and pooled geometry.

pub mod gfx;
pub mod pool;
pub mod shader;

pub use gfx::*;
pub use pool::*;
pub use shader::*;
