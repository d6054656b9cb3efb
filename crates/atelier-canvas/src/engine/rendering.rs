//! Screen-space render output
//!
//! The engine does not draw. Each frame the host asks for a flat list of
//! card frames, already culled, positioned in screen space, and with the
//! final presentation opacity folded in.

use serde::Serialize;

use crate::card::CardId;
use crate::math::Rect;

use super::CanvasEngine;

/// One card, ready to draw
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFrame {
    /// Card id, stable across frames
    pub id: CardId,
    /// Scene image to draw
    pub scene_image_ref: String,
    /// Screen-space rect
    pub rect: Rect,
    /// Final opacity: fade-in combined with the viewport edge fade
    pub opacity: f32,
    /// Reserved pointer-proximity scale
    pub scale: f32,
    /// Whether the card is hovered (host may lift or outline it)
    pub hovered: bool,
    /// Whether a product is currently revealed on this card
    pub revealed: bool,
    /// Whether the card is mid-drag
    pub dragging: bool,
    /// Whether the card is expanded to its detail view
    pub expanded: bool,
    /// Whether the mask overlay for this card is decoded and drawable
    pub highlight_ready: bool,
}

impl CanvasEngine {
    /// Frames for every renderable card, in paint order (later cards on
    /// top; the expanded card, if any, is moved to the end)
    pub fn card_frames(&self) -> Vec<CardFrame> {
        let mut frames: Vec<CardFrame> = self
            .cards
            .iter()
            .filter(|card| self.scroll.is_visible(card))
            .map(|card| {
                let rect = self.scroll.card_screen_rect(card);
                let expanded = card.interaction.is_expanded();
                let opacity = if expanded {
                    1.0
                } else {
                    card.opacity * self.scroll.edge_fade(rect)
                };
                let revealed = matches!(
                    &card.interaction,
                    crate::interact::CardInteraction::Hovered(h) if h.revealed
                );
                let scene_image_ref = self
                    .catalog
                    .get(card.item_index)
                    .map(|item| item.scene_image_ref.clone())
                    .unwrap_or_default();
                CardFrame {
                    id: card.id,
                    scene_image_ref,
                    rect,
                    opacity,
                    scale: card.scale,
                    hovered: card.interaction.is_hovered(),
                    revealed,
                    dragging: card.interaction.is_dragging(),
                    expanded,
                    highlight_ready: self.masks.is_ready(card.id),
                }
            })
            .collect();

        if let Some(index) = frames.iter().position(|f| f.expanded) {
            let expanded = frames.remove(index);
            frames.push(expanded);
        }
        frames
    }
}
