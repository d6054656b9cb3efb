//! Geometry primitives
//!
//! Minimal 2D math used by the canvas: screen-space vectors and rects.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
