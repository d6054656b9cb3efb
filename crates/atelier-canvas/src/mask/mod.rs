//! Mask decoding and pixel-accurate product hit testing
//!
//! Each card's mask is decoded off the frame loop into a pixel buffer and a
//! translucent highlight overlay, cached write-once per card id. Hit tests
//! against a not-yet-decoded mask degrade to "not over product"; the frame
//! loop never blocks on a decode.

mod pixels;
mod store;

pub use pixels::{MaskPixels, BRIGHTNESS_THRESHOLD, HIGHLIGHT_RGBA};
pub use store::{MaskError, MaskSource, MaskStore};
