//! Decoded mask pixel buffers

use crate::math::{Rect, Vec2};

/// A mask pixel is "product" when its mean RGB brightness exceeds this
pub const BRIGHTNESS_THRESHOLD: u8 = 128;

/// Highlight overlay pixel for bright mask pixels: low-alpha near-white
pub const HIGHLIGHT_RGBA: [u8; 4] = [250, 250, 252, 64];

/// An RGBA pixel buffer with mask query helpers
#[derive(Clone, Debug, PartialEq)]
pub struct MaskPixels {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl MaskPixels {
    /// Wrap a raw RGBA buffer (`rgba.len()` must be `width * height * 4`)
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        Self { width, height, rgba }
    }

    /// Buffer width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major
    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Mean RGB brightness at a pixel, or `None` when out of bounds
    pub fn brightness_at(&self, px: u32, py: u32) -> Option<u8> {
        if px >= self.width || py >= self.height {
            return None;
        }
        let i = ((py * self.width + px) * 4) as usize;
        let sum = self.rgba[i] as u16 + self.rgba[i + 1] as u16 + self.rgba[i + 2] as u16;
        Some((sum / 3) as u8)
    }

    /// Whether the pixel is part of the product silhouette
    #[inline]
    pub fn is_product_at(&self, px: u32, py: u32) -> bool {
        self.brightness_at(px, py)
            .is_some_and(|b| b > BRIGHTNESS_THRESHOLD)
    }

    /// Map a screen-space pointer against a rendered rect into this buffer
    /// and test the hit pixel. Independent horizontal/vertical scale
    /// factors; out-of-bounds pointers are simply not over the product.
    pub fn hit_test(&self, pointer: Vec2, rect: Rect) -> bool {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return false;
        }
        let sx = self.width as f32 / rect.width;
        let sy = self.height as f32 / rect.height;
        let mx = ((pointer.x - rect.x) * sx).floor();
        let my = ((pointer.y - rect.y) * sy).floor();
        if mx < 0.0 || my < 0.0 || mx >= self.width as f32 || my >= self.height as f32 {
            return false;
        }
        self.is_product_at(mx as u32, my as u32)
    }

    /// Derive the highlight overlay: bright mask pixels become a fixed
    /// low-alpha near-white, everything else fully transparent
    pub fn derive_overlay(&self) -> MaskPixels {
        let mut overlay = vec![0u8; self.rgba.len()];
        for py in 0..self.height {
            for px in 0..self.width {
                if self.is_product_at(px, py) {
                    let i = ((py * self.width + px) * 4) as usize;
                    overlay[i..i + 4].copy_from_slice(&HIGHLIGHT_RGBA);
                }
            }
        }
        MaskPixels::new(self.width, self.height, overlay)
    }
}
