//! On-canvas card instance

use crate::interact::CardInteraction;

/// Unique card identifier (monotonically increasing, never reused)
pub type CardId = u64;

/// Left bound of the horizontal span, in percent of gallery width
pub const X_MIN: f32 = 8.0;

/// Right bound of the horizontal span, in percent of gallery width
pub const X_MAX: f32 = 92.0;

/// One on-canvas instance of a gallery item
///
/// `x` is the card center as a percentage of the gallery's horizontal span,
/// clamped to [`X_MIN`, `X_MAX`] after every mutation. `y` is an absolute
/// coordinate in the unbounded virtual scroll space, not the viewport.
/// Width and height are chosen once at spawn and immutable thereafter.
/// Cards never expire; the "ephemeral" feel is the fade-in, not deletion.
#[derive(Clone, Debug)]
pub struct Card {
    /// Monotonic card id
    pub id: CardId,
    /// Index of the backing item in the catalog (an item may back several
    /// concurrent cards)
    pub item_index: usize,
    /// Center x in percent of the gallery span
    pub x: f32,
    /// Center y in virtual scroll space (px)
    pub y: f32,
    /// Rendered width (px)
    pub width: f32,
    /// Rendered height (px)
    pub height: f32,
    /// Horizontal velocity (percent per frame)
    pub vx: f32,
    /// Vertical velocity (px per frame)
    pub vy: f32,
    /// Presentation opacity (0-1), driven by the fade-in curve while idle
    pub opacity: f32,
    /// Reserved for pointer-proximity scaling
    pub scale: f32,
    /// Spawn timestamp (ms), used only for the fade-in curve
    pub spawned_ms: f64,
    /// Current interaction state
    pub interaction: CardInteraction,
}

impl Card {
    /// Clamp `x` back into the horizontal span
    #[inline]
    pub fn clamp_x(&mut self) {
        self.x = self.x.clamp(X_MIN, X_MAX);
    }

    /// Check if this card is exempt from drift simulation this frame
    #[inline]
    pub fn suspends_drift(&self) -> bool {
        self.interaction.suspends_drift()
    }
}
