//! Font loading and text measurement.
//!
//! Glyph rasterization happens in `render::shapes::text::TextRenderer`, which
//! borrows the [`FontSystem`] each frame.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
