//! Canvas engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `frame`: per-frame tick, timer resolution, and drift
//! - `input`: pointer/keyboard handling and the interaction state machine
//! - `rendering`: screen-space card frames for the renderer
//!
//! The host drives the engine cooperatively: pointer and wheel events as
//! they arrive, `tick` once per animation frame, then `card_frames` and
//! `drain_events` to read the results back out. Nothing in here blocks.

mod frame;
mod input;
mod rendering;

use std::sync::Arc;

use atelier_catalog::{Catalog, Product};

use crate::card::{Card, CardId};
use crate::config::{PhysicsConfig, SpawnConfig};
use crate::drift::DriftSimulator;
use crate::interact::{CanvasEvent, EventQueue};
use crate::mask::{MaskSource, MaskStore};
use crate::placement::PlacementEngine;
use crate::scroll::ScrollController;

pub use rendering::CardFrame;

/// Canvas engine owning the card list and everything that mutates it
///
/// - Placement engine (non-overlapping spawn, used-item cycling)
/// - Drift simulator (ambient motion, fade-in)
/// - Mask store (async decode, pixel hit testing)
/// - Scroll controller (virtual scroll space, visibility)
/// - Interaction state machine (hover/dwell/drag/expand, commerce events)
pub struct CanvasEngine {
    /// The read-only gallery catalog
    pub catalog: Catalog,
    /// All live cards; cards are appended, never removed
    pub cards: Vec<Card>,
    /// Mask decode cache and hit tester
    pub masks: MaskStore,
    /// Scroll offset, virtual height, and visibility
    pub scroll: ScrollController,
    /// Outbound events for the commerce collaborator
    pub events: EventQueue,
    pub(crate) placement: PlacementEngine,
    pub(crate) drift: DriftSimulator,
    pub(crate) spawn: SpawnConfig,
    /// Whether the pointer is currently over the detail overlay surface
    /// (reported by the host; the overlay is rendered outside card bounds)
    pub(crate) overlay_hovered: bool,
}

impl CanvasEngine {
    /// Create an engine with default tuning and entropy-seeded sampling
    pub fn new(catalog: Catalog, mask_source: Arc<dyn MaskSource>) -> Self {
        Self::with_config(
            catalog,
            mask_source,
            PhysicsConfig::default(),
            SpawnConfig::default(),
        )
    }

    /// Create an engine with explicit tuning
    pub fn with_config(
        catalog: Catalog,
        mask_source: Arc<dyn MaskSource>,
        physics: PhysicsConfig,
        spawn: SpawnConfig,
    ) -> Self {
        Self::with_seed(catalog, mask_source, physics, spawn, rand::random())
    }

    /// Create an engine with a fixed sampling seed (deterministic tests)
    pub fn with_seed(
        catalog: Catalog,
        mask_source: Arc<dyn MaskSource>,
        physics: PhysicsConfig,
        spawn: SpawnConfig,
        seed: u64,
    ) -> Self {
        Self {
            catalog,
            cards: Vec::new(),
            masks: MaskStore::new(mask_source),
            scroll: ScrollController::new(0.0, 0.0, 0.0),
            events: EventQueue::new(),
            placement: PlacementEngine::with_seed(seed),
            drift: DriftSimulator::with_seed(physics, seed.wrapping_add(1)),
            spawn,
            overlay_hovered: false,
        }
    }

    /// Initialize with viewport geometry and the sibling panel's reserved
    /// left fraction, then place the initial card field
    ///
    /// Idempotent: a second init only updates geometry.
    pub fn init(&mut self, width: f32, height: f32, panel_fraction: f32, now_ms: f64) {
        self.scroll.set_viewport(width, height);
        self.scroll.set_panel_fraction(panel_fraction);

        if self.cards.is_empty() {
            let count = self.spawn.initial_cards;
            let span = self.scroll.total_height() * 0.9;
            for i in 0..count {
                let target_y = (i as f32 + 0.5) / count.max(1) as f32 * span;
                self.spawn_card_at(target_y, now_ms);
            }
        }
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.scroll.set_viewport(width, height);
    }

    /// Set the scroll offset and spawn a batch if the viewport is within
    /// one screen height of the generated bottom
    pub fn set_scroll_offset(&mut self, offset: f32, now_ms: f64) {
        self.scroll.set_offset(offset);
        self.maybe_spawn(now_ms);
    }

    /// Get a card by id
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Drain all pending outbound events in emission order
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.events.drain()
    }

    /// Emit an add-to-bag intent for the product behind a card
    pub fn add_to_bag(&mut self, card_id: CardId) {
        if let Some(product) = self.product_for_card(card_id) {
            self.events.push(CanvasEvent::AddToBag { product });
        }
    }

    /// Emit a buy-now intent for the product behind a card
    pub fn buy_now(&mut self, card_id: CardId) {
        if let Some(product) = self.product_for_card(card_id) {
            self.events.push(CanvasEvent::BuyNow { product });
        }
    }

    /// The product record behind a card, if both still resolve
    pub fn product_for_card(&self, card_id: CardId) -> Option<Product> {
        let card = self.card(card_id)?;
        Some(self.catalog.get(card.item_index)?.product.clone())
    }

    /// Spawn one batch of cards past the generated bottom when needed
    pub(crate) fn maybe_spawn(&mut self, now_ms: f64) {
        if !self.scroll.needs_spawn() {
            return;
        }
        let targets = self.scroll.spawn_targets(self.spawn.batch_size);
        log::debug!("spawning batch of {} cards", targets.len());
        for target_y in targets {
            self.spawn_card_at(target_y, now_ms);
        }
        self.scroll.grow();
    }

    /// Place one card and kick off its mask decode
    pub(crate) fn spawn_card_at(&mut self, target_y: f32, now_ms: f64) {
        let Some(card) = self
            .placement
            .place(&self.catalog, &self.cards, target_y, now_ms)
        else {
            // Empty catalog: append nothing; the next scroll check retries
            return;
        };
        if let Some(item) = self.catalog.get(card.item_index) {
            self.masks.request(card.id, &item.mask_image_ref);
        }
        self.cards.push(card);
    }
}
