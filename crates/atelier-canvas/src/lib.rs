//! Ephemeral canvas engine
//!
//! Renders a continuously drifting, infinitely-scrolling field of image
//! cards in which a subset of pixels in each card is a hidden interactive
//! product region, discoverable only by dwelling over the exact masked
//! pixels. This crate owns the card list and everything that mutates it:
//!
//! - `placement`: non-overlapping stochastic card placement
//! - `drift`: per-frame ambient motion and fade-in
//! - `mask`: asynchronous mask decoding and pixel-accurate hit testing
//! - `scroll`: virtual scroll space, spawn triggering, visibility culling
//! - `interact`: the hover/dwell/drag/expand state machine and its events
//! - `engine`: the coordinating facade the host drives each frame
//!
//! The renderer, commerce UI, and sibling text panel are external
//! collaborators: they drive the engine with pointer/scroll/frame input and
//! read card frames and drained events back out.

pub mod card;
pub mod config;
pub mod drift;
pub mod engine;
pub mod interact;
pub mod mask;
pub mod math;
pub mod placement;
pub mod scroll;

pub use card::{Card, CardId, X_MAX, X_MIN};
pub use config::{PhysicsConfig, SpawnConfig};
pub use drift::{DriftSimulator, FADE_IN_MS};
pub use engine::{CanvasEngine, CardFrame};
pub use interact::{
    CanvasEvent, CardInteraction, EventQueue, DWELL_MS, HOVER_EXIT_GRACE_MS,
    PRODUCT_CLEAR_GRACE_MS,
};
pub use mask::{MaskError, MaskSource, MaskStore, BRIGHTNESS_THRESHOLD};
pub use math::{Rect, Vec2};
pub use placement::{PlacementEngine, MAX_PLACE_ATTEMPTS};
pub use scroll::{ScrollController, WheelRoute, OVERSCAN_PX};
