//! Moving shapes simulated by the engine.

mod rect;

pub use rect::Rect;
