//! Virtual scroll space, spawn triggering, and visibility
//!
//! The controller owns the scroll offset and the total virtual content
//! height. Cards live at absolute `y` coordinates in an unbounded scroll
//! space; viewport-relative position is `y - scroll_offset`. When the
//! viewport approaches the bottom of generated content the engine places a
//! batch of new cards beyond `total_height` and grows it, producing
//! unbounded scrolling without an "end" of content. Off-screen cards are
//! culled from rendering only, never from memory.

use crate::card::Card;
use crate::math::{Rect, Vec2};

/// Overscan margin above and below the viewport (px) to avoid pop-in
pub const OVERSCAN_PX: f32 = 100.0;

/// Growth of `total_height` per spawn batch (px)
const SPAWN_HEIGHT_INCREMENT: f32 = 1600.0;

/// Fraction of the viewport height that fades cards at the top and bottom
const EDGE_FADE_FRACTION: f32 = 1.0 / 8.0;

/// Where a wheel event should be routed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelRoute {
    /// The event is over the gallery and was consumed by the canvas
    Canvas,
    /// The event originated over the sibling text panel; forward it there
    Sibling,
}

/// Scroll and spawn controller
#[derive(Clone, Debug)]
pub struct ScrollController {
    scroll_offset: f32,
    total_height: f32,
    viewport_width: f32,
    viewport_height: f32,
    /// Fraction of the display width reserved on the left by the sibling
    /// text panel
    panel_fraction: f32,
}

impl ScrollController {
    /// Create a controller for the given viewport, with `panel_fraction`
    /// of the width reserved on the left by the sibling panel
    pub fn new(viewport_width: f32, viewport_height: f32, panel_fraction: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            total_height: viewport_height * 3.0,
            viewport_width,
            viewport_height,
            panel_fraction: panel_fraction.clamp(0.0, 0.9),
        }
    }

    /// Update the viewport dimensions
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.total_height = self.total_height.max(height * 3.0);
    }

    /// Update the fraction of the width reserved by the sibling panel
    pub fn set_panel_fraction(&mut self, fraction: f32) {
        self.panel_fraction = fraction.clamp(0.0, 0.9);
    }

    /// Current scroll offset
    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Current virtual content height (only ever grows)
    #[inline]
    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Viewport height
    #[inline]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Whether viewport geometry is known yet
    #[inline]
    pub fn has_geometry(&self) -> bool {
        self.viewport_width > 0.0 && self.viewport_height > 0.0
    }

    /// Set the scroll offset, clamped to ≥ 0
    pub fn set_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Scroll by a delta (wheel or touch)
    pub fn scroll_by(&mut self, dy: f32) {
        self.set_offset(self.scroll_offset + dy);
    }

    /// Whether the viewport is within one screen height of the bottom of
    /// generated content
    #[inline]
    pub fn needs_spawn(&self) -> bool {
        self.scroll_offset + self.viewport_height > self.total_height - self.viewport_height
    }

    /// Target `y` values beyond `total_height` for one spawn batch
    pub fn spawn_targets(&self, batch_size: usize) -> Vec<f32> {
        let step = SPAWN_HEIGHT_INCREMENT / batch_size.max(1) as f32;
        (0..batch_size)
            .map(|i| self.total_height + (i as f32 + 0.5) * step)
            .collect()
    }

    /// Grow the virtual content height by one batch increment
    pub fn grow(&mut self) {
        self.total_height += SPAWN_HEIGHT_INCREMENT;
    }

    /// Left edge of the gallery area in screen px
    #[inline]
    pub fn gallery_left_px(&self) -> f32 {
        self.viewport_width * self.panel_fraction
    }

    /// Width of the gallery area in screen px
    #[inline]
    pub fn gallery_width_px(&self) -> f32 {
        self.viewport_width - self.gallery_left_px()
    }

    /// A card's current rendered rect in screen space
    ///
    /// Card `x` is a percentage of the gallery span; `y` maps through the
    /// scroll offset.
    pub fn card_screen_rect(&self, card: &Card) -> Rect {
        let center_x = self.gallery_left_px() + card.x / 100.0 * self.gallery_width_px();
        let center_y = card.y - self.scroll_offset;
        Rect::from_center(Vec2::new(center_x, center_y), card.width, card.height)
    }

    /// Whether a card is eligible for rendering
    ///
    /// Expanded cards always render; others render when their
    /// viewport-relative top lies within the overscanned viewport.
    pub fn is_visible(&self, card: &Card) -> bool {
        if card.interaction.is_expanded() {
            return true;
        }
        let top = self.card_screen_rect(card).y;
        top >= -card.height - OVERSCAN_PX && top <= self.viewport_height + OVERSCAN_PX
    }

    /// Edge-fade multiplier for a rendered rect: 0 at the viewport
    /// boundary, 1 once the card is entirely inside the non-fade zone.
    /// Purely presentational, computed from the current position each pass.
    pub fn edge_fade(&self, rect: Rect) -> f32 {
        let zone = self.viewport_height * EDGE_FADE_FRACTION;
        if zone <= 0.0 {
            return 1.0;
        }
        let top = (rect.y / zone).clamp(0.0, 1.0);
        let bottom = ((self.viewport_height - rect.bottom()) / zone).clamp(0.0, 1.0);
        top * bottom
    }

    /// Route a wheel event by its screen x: events over the sibling panel
    /// are forwarded, not consumed
    pub fn route_wheel(&self, x: f32) -> WheelRoute {
        if x < self.gallery_left_px() {
            WheelRoute::Sibling
        } else {
            WheelRoute::Canvas
        }
    }
}
