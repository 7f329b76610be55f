//! dvd framework crate.
//!
//! Owns the platform + GPU runtime pieces used by the bounce demo: the winit
//! event loop, the wgpu device/surface, input translation, frame timing and the
//! 2D rect/text renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
