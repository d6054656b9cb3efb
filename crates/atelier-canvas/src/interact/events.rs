//! Outbound events for external collaborators

use std::collections::VecDeque;

use serde::Serialize;

use atelier_catalog::Product;

use crate::card::CardId;
use crate::math::Vec2;

/// Event emitted by the canvas for the commerce collaborator
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanvasEvent {
    /// The pointer dwelled on a product's masked pixels long enough to
    /// reveal it
    ProductRevealed {
        card_id: CardId,
        product: Product,
        /// Pointer position at reveal time (screen space), where the detail
        /// overlay should anchor
        screen_position: Vec2,
    },
    /// The previously revealed product is no longer active
    ProductCleared,
    /// The user asked to add the revealed product to their bag
    AddToBag { product: Product },
    /// The user asked to buy the revealed product immediately
    BuyNow { product: Product },
}

/// FIFO queue of canvas events, drained by the host each frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<CanvasEvent>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event
    pub fn push(&mut self, event: CanvasEvent) {
        self.events.push_back(event);
    }

    /// Drain all pending events in emission order
    pub fn drain(&mut self) -> Vec<CanvasEvent> {
        self.events.drain(..).collect()
    }

    /// Number of pending events
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
