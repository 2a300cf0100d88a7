//! Windowing and GL context setup.

pub mod app;

pub use app::*;
