//! Per-frame tick: mask installs, deadline resolution, drift
//!
//! Timers are absolute `now_ms` deadlines stored on the hover state, not
//! callbacks. Each tick re-checks the live state before acting on a due
//! deadline, so a deadline that was superseded by later pointer events
//! resolves as a no-op.

use crate::interact::{CanvasEvent, CardInteraction};

use super::CanvasEngine;

impl CanvasEngine {
    /// Advance the canvas by one frame
    ///
    /// Order matters: completed mask decodes install first so a dwell
    /// deadline firing this frame sees the freshest hit data, then due
    /// deadlines resolve, then idle cards drift.
    pub fn tick(&mut self, now_ms: f64) {
        self.masks.poll();
        self.resolve_timers(now_ms);
        self.drift.step(&mut self.cards, now_ms);
    }

    /// Fire due hover deadlines against the live state
    fn resolve_timers(&mut self, now_ms: f64) {
        let overlay = self.overlay_hovered;

        for card in self.cards.iter_mut() {
            let CardInteraction::Hovered(h) = &mut card.interaction else {
                continue;
            };

            // Dwell complete: reveal, once per uninterrupted dwell
            if h.reveal_deadline_ms.is_some_and(|d| now_ms >= d) {
                h.reveal_deadline_ms = None;
                if h.over_product && !h.revealed {
                    h.revealed = true;
                    if let Some(item) = self.catalog.get(card.item_index) {
                        self.events.push(CanvasEvent::ProductRevealed {
                            card_id: card.id,
                            product: item.product.clone(),
                            screen_position: h.pointer,
                        });
                    }
                }
            }

            // Pointer left the masked region long enough: clear the reveal,
            // unless the user moved onto the detail overlay
            if h.clear_deadline_ms.is_some_and(|d| now_ms >= d) {
                h.clear_deadline_ms = None;
                if !overlay && h.revealed && !h.over_product {
                    h.revealed = false;
                    self.events.push(CanvasEvent::ProductCleared);
                }
            }

            // Pointer left the card long enough: drop the hover entirely
            let mut drop_hover = false;
            let mut was_revealed = false;
            if h.exit_deadline_ms.is_some_and(|d| now_ms >= d) {
                if overlay {
                    h.exit_deadline_ms = None;
                } else {
                    drop_hover = true;
                    was_revealed = h.revealed;
                }
            }
            if drop_hover {
                card.interaction = CardInteraction::Idle;
                if was_revealed {
                    self.events.push(CanvasEvent::ProductCleared);
                }
            }
        }
    }
}
