//! Pointer and keyboard handling
//!
//! All transitions of the per-card interaction state live here. Pointer
//! coordinates arrive in screen space; card hit testing goes through the
//! scroll controller's screen rects, with the topmost (most recently
//! spawned) card winning and an expanded card taking priority over
//! everything beneath it.

use crate::card::CardId;
use crate::interact::{
    CanvasEvent, CardInteraction, DragState, HoverState, PRODUCT_CLEAR_GRACE_MS,
};
use crate::math::Vec2;
use crate::scroll::WheelRoute;

use super::CanvasEngine;

impl CanvasEngine {
    /// Handle a pointer move
    ///
    /// While a drag is active the pointer drives the dragged card directly
    /// and hover resolution is skipped entirely. An expanded card swallows
    /// pointer movement: it leaves the Expanded state only via Escape or a
    /// second double-click, never through hover resolution.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        if !self.scroll.has_geometry() {
            return;
        }
        let pointer = Vec2::new(x, y);

        if let Some(index) = self.dragging_index() {
            self.move_dragged(index, pointer);
            return;
        }

        let hit = self.card_index_at(pointer);

        if hit.is_some_and(|h| self.cards[h].interaction.is_expanded()) {
            self.exit_hovers_except(None, pointer, now_ms);
            return;
        }

        match hit {
            Some(h) => {
                // Exit-grace every other hovered card; several can be in
                // their grace window at once, and only the card actually
                // under the pointer keeps its live hover state
                self.exit_hovers_except(Some(h), pointer, now_ms);
                if !self.cards[h].interaction.is_hovered() {
                    self.cards[h].interaction =
                        CardInteraction::Hovered(HoverState::new(pointer));
                }
                self.update_hover(h, pointer, now_ms);
            }
            None => self.exit_hovers_except(None, pointer, now_ms),
        }
    }

    /// Handle a pointer press: start dragging the card under the pointer
    ///
    /// Expanded cards are not draggable. A revealed product is cleared the
    /// moment its card starts moving.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, _now_ms: f64) {
        if !self.scroll.has_geometry() {
            return;
        }
        let pointer = Vec2::new(x, y);
        let Some(index) = self.card_index_at(pointer) else {
            return;
        };
        if self.cards[index].interaction.is_expanded() {
            return;
        }

        let was_revealed = matches!(
            &self.cards[index].interaction,
            CardInteraction::Hovered(h) if h.revealed
        );
        if was_revealed {
            self.events.push(CanvasEvent::ProductCleared);
        }

        let card = &mut self.cards[index];
        card.interaction = CardInteraction::Dragging(DragState {
            pointer_start: pointer,
            card_start_x: card.x,
            card_start_y: card.y,
        });
        // Dragged cards resume from rest, not from their drift momentum
        card.vx = 0.0;
        card.vy = 0.0;
    }

    /// Handle a pointer release: the dragged card settles where it was
    /// dropped and resumes drifting from rest
    pub fn handle_pointer_up(&mut self, x: f32, y: f32, now_ms: f64) {
        let Some(index) = self.dragging_index() else {
            return;
        };
        self.cards[index].interaction = CardInteraction::Idle;
        // Re-resolve hover at the drop position
        self.handle_pointer_move(x, y, now_ms);
    }

    /// Handle a double click: toggle the card under the pointer between
    /// expanded and idle, collapsing any other expanded card first so at
    /// most one card is expanded at a time
    pub fn handle_double_click(&mut self, x: f32, y: f32, _now_ms: f64) {
        if !self.scroll.has_geometry() {
            return;
        }
        let Some(index) = self.card_index_at(Vec2::new(x, y)) else {
            return;
        };

        if self.cards[index].interaction.is_expanded() {
            self.cards[index].interaction = CardInteraction::Idle;
            return;
        }

        for card in self.cards.iter_mut() {
            if card.interaction.is_expanded() {
                card.interaction = CardInteraction::Idle;
            }
        }

        let was_revealed = matches!(
            &self.cards[index].interaction,
            CardInteraction::Hovered(h) if h.revealed
        );
        if was_revealed {
            self.events.push(CanvasEvent::ProductCleared);
        }
        self.cards[index].interaction = CardInteraction::Expanded;
    }

    /// Handle the escape key: collapse the expanded card, if any
    pub fn handle_escape(&mut self) {
        for card in self.cards.iter_mut() {
            if card.interaction.is_expanded() {
                card.interaction = CardInteraction::Idle;
            }
        }
    }

    /// Handle a wheel event at screen `x`: events over the sibling panel
    /// are routed back to the host untouched, events over the gallery
    /// scroll the canvas (and may trigger a spawn batch)
    pub fn handle_wheel(&mut self, x: f32, dy: f32, now_ms: f64) -> WheelRoute {
        let route = self.scroll.route_wheel(x);
        if route == WheelRoute::Canvas {
            self.scroll.scroll_by(dy);
            self.maybe_spawn(now_ms);
        }
        route
    }

    /// The host reports the pointer entering or leaving the product detail
    /// overlay, which is rendered outside card bounds but must keep the
    /// hover and reveal alive while the user interacts with it
    pub fn set_overlay_hovered(&mut self, hovered: bool, now_ms: f64) {
        self.overlay_hovered = hovered;
        if hovered {
            return;
        }
        // Pointer left the overlay: resume the normal grace periods
        for index in 0..self.cards.len() {
            let rect = self.scroll.card_screen_rect(&self.cards[index]);
            if let CardInteraction::Hovered(h) = &mut self.cards[index].interaction {
                if !rect.contains(h.pointer) {
                    h.schedule_exit(now_ms);
                } else if h.revealed && !h.over_product {
                    h.clear_deadline_ms = Some(now_ms + PRODUCT_CLEAR_GRACE_MS);
                }
            }
        }
    }

    /// Index of the topmost card under the pointer
    ///
    /// An expanded card renders above everything, so it is checked first;
    /// otherwise later-spawned cards win.
    pub(crate) fn card_index_at(&self, pointer: Vec2) -> Option<usize> {
        if let Some(index) = self
            .cards
            .iter()
            .position(|c| c.interaction.is_expanded())
        {
            if self
                .scroll
                .card_screen_rect(&self.cards[index])
                .contains(pointer)
            {
                return Some(index);
            }
        }
        self.cards
            .iter()
            .enumerate()
            .rev()
            .find(|(_, c)| {
                !c.interaction.is_expanded()
                    && self.scroll.card_screen_rect(c).contains(pointer)
            })
            .map(|(i, _)| i)
    }

    fn dragging_index(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.interaction.is_dragging())
    }

    /// Follow the pointer during a drag: horizontal delta maps from screen
    /// px to percent of the gallery span, vertical delta applies directly
    /// in virtual scroll space
    fn move_dragged(&mut self, index: usize, pointer: Vec2) {
        let gallery_width = self.scroll.gallery_width_px();
        if gallery_width <= 0.0 {
            return;
        }
        let card = &mut self.cards[index];
        let CardInteraction::Dragging(drag) = card.interaction.clone() else {
            return;
        };
        let dx_pct = (pointer.x - drag.pointer_start.x) / gallery_width * 100.0;
        card.x = drag.card_start_x + dx_pct;
        card.clamp_x();
        card.y = drag.card_start_y + (pointer.y - drag.pointer_start.y);
    }

    /// Refresh the hover state for a card the pointer stayed on: run the
    /// mask hit test and arm or disarm the dwell timer on region changes
    fn update_hover(&mut self, index: usize, pointer: Vec2, now_ms: f64) {
        let id: CardId = self.cards[index].id;
        let rect = self.scroll.card_screen_rect(&self.cards[index]);
        let over = self.masks.is_over_product(id, pointer, rect);

        if let CardInteraction::Hovered(h) = &mut self.cards[index].interaction {
            h.pointer = pointer;
            h.cancel_exit();
            if over && !h.over_product {
                h.arm_dwell(now_ms);
            } else if !over && h.over_product {
                h.disarm_dwell(now_ms);
            }
        }
    }

    /// Start the exit grace period on every hovered card except `keep`
    /// rather than dropping their hover immediately
    fn exit_hovers_except(&mut self, keep: Option<usize>, pointer: Vec2, now_ms: f64) {
        for (index, card) in self.cards.iter_mut().enumerate() {
            if Some(index) == keep {
                continue;
            }
            if let CardInteraction::Hovered(h) = &mut card.interaction {
                h.pointer = pointer;
                h.schedule_exit(now_ms);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use atelier_catalog::{Catalog, GalleryItem, Product};

    use crate::card::CardId;
    use crate::config::{PhysicsConfig, SpawnConfig};
    use crate::mask::{MaskError, MaskSource};

    use super::CanvasEngine;

    /// A PNG whose right half is white (product) and left half black
    pub(crate) fn half_mask_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, _y| {
            if x >= width / 2 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    pub(crate) fn test_catalog(items: usize) -> Catalog {
        let items = (0..items)
            .map(|i| GalleryItem {
                id: format!("scene-{i}"),
                scene_image_ref: format!("gallery/scene-{i}.jpg"),
                mask_image_ref: format!("gallery/scene-{i}-mask.png"),
                product: Product {
                    id: format!("product-{i}"),
                    name: format!("Product {i}"),
                    brand: "Maison".to_string(),
                    price: 1000 + i as u32,
                    currency: "USD".to_string(),
                    description: String::new(),
                    thumbnail_ref: format!("products/{i}.jpg"),
                },
            })
            .collect();
        Catalog::new(items)
    }

    /// Deterministic engine with still physics and a half-mask source
    pub(crate) fn test_engine(catalog: Catalog, initial_cards: usize) -> CanvasEngine {
        let source: Arc<dyn MaskSource> =
            Arc::new(|_: &str| -> Result<Vec<u8>, MaskError> { Ok(half_mask_png(8, 8)) });
        CanvasEngine::with_seed(
            catalog,
            source,
            PhysicsConfig {
                drift_speed: 1.0,
                jiggle: 0.0,
                bounce: 0.5,
            },
            SpawnConfig {
                batch_size: 6,
                initial_cards,
            },
            42,
        )
    }

    /// Poll until the mask for a card settles
    pub(crate) fn wait_mask(engine: &mut CanvasEngine, card_id: CardId) {
        for _ in 0..200 {
            engine.masks.poll();
            if engine.masks.is_ready(card_id) || engine.masks.is_failed(card_id) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("mask for card {card_id} never settled");
    }

    /// Park every card except `keep` far below the viewport so hit tests
    /// resolve to a single known card
    pub(crate) fn isolate_card(engine: &mut CanvasEngine, keep: usize) {
        for (i, card) in engine.cards.iter_mut().enumerate() {
            if i != keep {
                card.y = 1.0e6;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{isolate_card, test_catalog, test_engine, wait_mask};
    use crate::card::{X_MAX, X_MIN};
    use crate::interact::{CanvasEvent, CardInteraction, DWELL_MS};
    use crate::math::Vec2;
    use crate::scroll::WheelRoute;

    /// Screen point over the product (right) half of card 0's mask
    fn product_point(engine: &crate::engine::CanvasEngine) -> Vec2 {
        let rect = engine.scroll.card_screen_rect(&engine.cards[0]);
        Vec2::new(rect.x + rect.width * 0.75, rect.center().y)
    }

    /// Screen point over the scene (left) half of card 0's mask
    fn scene_point(engine: &crate::engine::CanvasEngine) -> Vec2 {
        let rect = engine.scroll.card_screen_rect(&engine.cards[0]);
        Vec2::new(rect.x + rect.width * 0.25, rect.center().y)
    }

    fn hover_ready_engine() -> crate::engine::CanvasEngine {
        let mut engine = test_engine(test_catalog(3), 6);
        engine.init(1600.0, 900.0, 0.25, 0.0);
        // Put card 0 well inside the viewport and alone under the pointer
        engine.cards[0].x = 50.0;
        engine.cards[0].y = 450.0;
        isolate_card(&mut engine, 0);
        let id = engine.cards[0].id;
        wait_mask(&mut engine, id);
        engine
    }

    #[test]
    fn test_hover_enter_and_dwell_armed_over_product() {
        let mut engine = hover_ready_engine();
        let p = product_point(&engine);
        engine.handle_pointer_move(p.x, p.y, 1000.0);

        match &engine.cards[0].interaction {
            CardInteraction::Hovered(h) => {
                assert!(h.over_product);
                assert!(h.reveal_deadline_ms.is_some());
            }
            other => panic!("expected hover, got {other:?}"),
        }
    }

    #[test]
    fn test_hover_over_scene_pixels_does_not_arm_dwell() {
        let mut engine = hover_ready_engine();
        let p = scene_point(&engine);
        engine.handle_pointer_move(p.x, p.y, 1000.0);

        match &engine.cards[0].interaction {
            CardInteraction::Hovered(h) => {
                assert!(!h.over_product);
                assert!(h.reveal_deadline_ms.is_none());
            }
            other => panic!("expected hover, got {other:?}"),
        }
    }

    #[test]
    fn test_pointer_off_card_schedules_exit() {
        let mut engine = hover_ready_engine();
        let p = scene_point(&engine);
        engine.handle_pointer_move(p.x, p.y, 1000.0);
        engine.handle_pointer_move(10.0, 10.0, 1050.0);

        match &engine.cards[0].interaction {
            CardInteraction::Hovered(h) => assert!(h.exit_deadline_ms.is_some()),
            other => panic!("expected hover during grace, got {other:?}"),
        }

        // Returning before the deadline cancels the exit
        engine.handle_pointer_move(p.x, p.y, 1100.0);
        match &engine.cards[0].interaction {
            CardInteraction::Hovered(h) => assert!(h.exit_deadline_ms.is_none()),
            other => panic!("expected hover, got {other:?}"),
        }
    }

    #[test]
    fn test_drag_follows_pointer_and_clamps_span() {
        let mut engine = hover_ready_engine();
        let rect = engine.scroll.card_screen_rect(&engine.cards[0]);
        let (cx, cy) = (rect.center().x, rect.center().y);

        engine.handle_pointer_down(cx, cy, 2000.0);
        assert!(engine.cards[0].interaction.is_dragging());
        assert!((engine.cards[0].vx - 0.0).abs() < f32::EPSILON);

        // Drag far right: x clamps at the span edge, y follows exactly
        engine.handle_pointer_move(cx + 5000.0, cy + 120.0, 2100.0);
        assert!((engine.cards[0].x - X_MAX).abs() < 0.001);
        assert!((engine.cards[0].y - 570.0).abs() < 0.001);

        // Drag far left
        engine.handle_pointer_move(cx - 5000.0, cy, 2200.0);
        assert!((engine.cards[0].x - X_MIN).abs() < 0.001);

        engine.handle_pointer_up(cx - 5000.0, cy, 2300.0);
        assert!(!engine.cards[0].interaction.is_dragging());
        // Resumes from rest
        assert!((engine.cards[0].vx - 0.0).abs() < f32::EPSILON);
        assert!((engine.cards[0].vy - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_drag_clears_revealed_product() {
        let mut engine = hover_ready_engine();
        let p = product_point(&engine);
        engine.handle_pointer_move(p.x, p.y, 1000.0);
        engine.tick(1700.0);
        assert!(matches!(
            engine.drain_events().as_slice(),
            [CanvasEvent::ProductRevealed { .. }]
        ));

        engine.handle_pointer_down(p.x, p.y, 1800.0);
        assert!(matches!(
            engine.drain_events().as_slice(),
            [CanvasEvent::ProductCleared]
        ));
    }

    #[test]
    fn test_double_click_exclusive_expand() {
        let mut engine = hover_ready_engine();
        engine.cards[1].x = 50.0;
        engine.cards[1].y = 2.0e6;

        let r0 = engine.scroll.card_screen_rect(&engine.cards[0]);
        engine.handle_double_click(r0.center().x, r0.center().y, 3000.0);
        assert!(engine.cards[0].interaction.is_expanded());

        // Expanding another card collapses the first
        engine.scroll.set_offset(2.0e6 - 450.0);
        let r1 = engine.scroll.card_screen_rect(&engine.cards[1]);
        engine.handle_double_click(r1.center().x, r1.center().y, 3100.0);
        assert!(!engine.cards[0].interaction.is_expanded());
        assert!(engine.cards[1].interaction.is_expanded());

        let expanded = engine
            .cards
            .iter()
            .filter(|c| c.interaction.is_expanded())
            .count();
        assert_eq!(expanded, 1);

        // Double-clicking the expanded card collapses it
        engine.handle_double_click(r1.center().x, r1.center().y, 3200.0);
        assert!(!engine.cards[1].interaction.is_expanded());
    }

    #[test]
    fn test_escape_collapses_expanded() {
        let mut engine = hover_ready_engine();
        let r0 = engine.scroll.card_screen_rect(&engine.cards[0]);
        engine.handle_double_click(r0.center().x, r0.center().y, 3000.0);
        assert!(engine.cards[0].interaction.is_expanded());

        engine.handle_escape();
        assert!(!engine.cards[0].interaction.is_expanded());

        // Escape with nothing expanded is a no-op
        engine.handle_escape();
    }

    #[test]
    fn test_pointer_move_over_expanded_card_keeps_it_expanded() {
        let mut engine = hover_ready_engine();
        let r0 = engine.scroll.card_screen_rect(&engine.cards[0]);
        engine.handle_double_click(r0.center().x, r0.center().y, 3000.0);
        assert!(engine.cards[0].interaction.is_expanded());

        // Moving across the expanded card must not demote it to hover
        engine.handle_pointer_move(r0.center().x + 5.0, r0.center().y, 3100.0);
        assert!(engine.cards[0].interaction.is_expanded());

        // And it stays expanded (and drift-exempt) across later frames
        engine.tick(3500.0);
        assert!(engine.cards[0].interaction.is_expanded());
        assert!(engine.events.is_empty());
    }

    #[test]
    fn test_grace_hover_does_not_reset_another_cards_dwell() {
        let mut engine = test_engine(test_catalog(3), 6);
        engine.init(1600.0, 900.0, 0.25, 0.0);
        // Two cards side by side in the viewport, the rest parked away
        engine.cards[0].x = 25.0;
        engine.cards[0].y = 450.0;
        engine.cards[1].x = 75.0;
        engine.cards[1].y = 450.0;
        for card in engine.cards.iter_mut().skip(2) {
            card.y = 1.0e6;
        }
        let (id0, id1) = (engine.cards[0].id, engine.cards[1].id);
        wait_mask(&mut engine, id0);
        wait_mask(&mut engine, id1);

        let r0 = engine.scroll.card_screen_rect(&engine.cards[0]);
        engine.handle_pointer_move(r0.center().x, r0.center().y, 1000.0);
        assert!(engine.cards[0].interaction.is_hovered());

        // Cross onto the second card's masked half; the first card rides
        // out its exit grace, still hovered
        let r1 = engine.scroll.card_screen_rect(&engine.cards[1]);
        let p = Vec2::new(r1.x + r1.width * 0.75, r1.center().y);
        engine.handle_pointer_move(p.x, p.y, 1010.0);
        assert!(engine.cards[0].interaction.is_hovered());
        match &engine.cards[1].interaction {
            CardInteraction::Hovered(h) => {
                assert_eq!(h.reveal_deadline_ms, Some(1010.0 + DWELL_MS));
            }
            other => panic!("expected hover, got {other:?}"),
        }

        // Moving within the masked region must keep the armed deadline
        engine.handle_pointer_move(p.x + 2.0, p.y, 1100.0);
        match &engine.cards[1].interaction {
            CardInteraction::Hovered(h) => {
                assert_eq!(h.reveal_deadline_ms, Some(1010.0 + DWELL_MS));
            }
            other => panic!("expected hover, got {other:?}"),
        }

        // First card's grace expires, then the dwell reveals exactly once
        engine.tick(1200.0);
        assert!(matches!(engine.cards[0].interaction, CardInteraction::Idle));
        engine.tick(1010.0 + DWELL_MS);
        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            CanvasEvent::ProductRevealed { card_id, .. } if card_id == id1
        ));
    }

    #[test]
    fn test_expanded_card_not_draggable() {
        let mut engine = hover_ready_engine();
        let r0 = engine.scroll.card_screen_rect(&engine.cards[0]);
        engine.handle_double_click(r0.center().x, r0.center().y, 3000.0);

        engine.handle_pointer_down(r0.center().x, r0.center().y, 3100.0);
        assert!(engine.cards[0].interaction.is_expanded());
    }

    #[test]
    fn test_wheel_routing_and_scroll() {
        let mut engine = test_engine(test_catalog(2), 4);
        engine.init(1600.0, 900.0, 0.25, 0.0);

        // Over the sibling panel (left 400px): forwarded, no scroll
        let route = engine.handle_wheel(100.0, 50.0, 100.0);
        assert_eq!(route, WheelRoute::Sibling);
        assert!((engine.scroll.scroll_offset() - 0.0).abs() < 0.001);

        // Over the gallery: consumed
        let route = engine.handle_wheel(800.0, 50.0, 100.0);
        assert_eq!(route, WheelRoute::Canvas);
        assert!((engine.scroll.scroll_offset() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_moves_before_geometry_are_ignored() {
        let mut engine = test_engine(test_catalog(2), 4);
        // No init: geometry unknown
        engine.handle_pointer_move(100.0, 100.0, 0.0);
        engine.handle_pointer_down(100.0, 100.0, 0.0);
        engine.handle_double_click(100.0, 100.0, 0.0);
        assert!(engine.cards.is_empty());
        assert!(engine.events.is_empty());
    }
}
