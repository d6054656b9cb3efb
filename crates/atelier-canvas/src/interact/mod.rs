//! Interaction state machine types
//!
//! Converts raw pointer/keyboard events into per-card state transitions and
//! emits commerce intents to external collaborators. The transition logic
//! itself lives on `CanvasEngine` (see `engine::input`); this module holds
//! the per-card state variants, the timing constants, and the outbound
//! event queue.

mod events;
mod state;

pub use events::{CanvasEvent, EventQueue};
pub use state::{CardInteraction, DragState, HoverState};

/// Dwell time over masked pixels before the product is revealed (ms)
pub const DWELL_MS: f64 = 600.0;

/// Grace period after the pointer leaves a card before hover state clears (ms)
///
/// Exists because the detail overlay is rendered outside the card's own
/// bounds; the pointer must be able to cross the gap without the overlay
/// vanishing.
pub const HOVER_EXIT_GRACE_MS: f64 = 150.0;

/// Grace period after the pointer leaves the masked region before the
/// revealed product clears (ms)
pub const PRODUCT_CLEAR_GRACE_MS: f64 = 150.0;
