//! Per-card interaction state

use crate::math::Vec2;

use super::{DWELL_MS, HOVER_EXIT_GRACE_MS, PRODUCT_CLEAR_GRACE_MS};

/// Interaction state of a single card
///
/// A tagged variant rather than independent booleans so that illegal
/// combinations (hovered while dragging, expanded while hovered) are
/// unrepresentable. Hovered, Dragging, and Expanded cards are all exempt
/// from drift mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum CardInteraction {
    /// Not interacting; drifts freely
    Idle,
    /// Pointer is over the card (or within the exit grace period)
    Hovered(HoverState),
    /// Card follows the pointer; velocity is frozen at zero
    Dragging(DragState),
    /// Card is expanded to its detail view (at most one per canvas)
    Expanded,
}

impl CardInteraction {
    /// Check if this card is exempt from drift simulation
    #[inline]
    pub fn suspends_drift(&self) -> bool {
        !matches!(self, CardInteraction::Idle)
    }

    /// Check if this card is hovered
    #[inline]
    pub fn is_hovered(&self) -> bool {
        matches!(self, CardInteraction::Hovered(_))
    }

    /// Check if this card is being dragged
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self, CardInteraction::Dragging(_))
    }

    /// Check if this card is expanded
    #[inline]
    pub fn is_expanded(&self) -> bool {
        matches!(self, CardInteraction::Expanded)
    }
}

/// Hover state with the dwell and grace deadlines
///
/// All deadlines are absolute `now_ms` timestamps. A superseding pointer
/// event replaces a deadline rather than stacking a second one, and the
/// engine re-checks the live state when a deadline fires, so a stale
/// deadline is a harmless no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    /// Last pointer position in screen space
    pub pointer: Vec2,
    /// Whether the pointer is currently over masked product pixels
    pub over_product: bool,
    /// Whether the product has been revealed to the commerce collaborator
    pub revealed: bool,
    /// Pending dwell deadline for revealing the product
    pub reveal_deadline_ms: Option<f64>,
    /// Pending deadline for clearing a revealed product after the pointer
    /// left the masked region
    pub clear_deadline_ms: Option<f64>,
    /// Pending deadline for dropping hover state after the pointer left the
    /// card bounds
    pub exit_deadline_ms: Option<f64>,
}

impl HoverState {
    /// Fresh hover state at the given pointer position
    pub fn new(pointer: Vec2) -> Self {
        Self {
            pointer,
            over_product: false,
            revealed: false,
            reveal_deadline_ms: None,
            clear_deadline_ms: None,
            exit_deadline_ms: None,
        }
    }

    /// Pointer entered the masked region: (re)start the dwell timer and
    /// cancel any pending clear
    pub fn arm_dwell(&mut self, now_ms: f64) {
        self.over_product = true;
        self.clear_deadline_ms = None;
        if !self.revealed {
            self.reveal_deadline_ms = Some(now_ms + DWELL_MS);
        }
    }

    /// Pointer left the masked region: cancel the dwell timer and, if a
    /// product was revealed, schedule its clearing
    pub fn disarm_dwell(&mut self, now_ms: f64) {
        self.over_product = false;
        self.reveal_deadline_ms = None;
        if self.revealed {
            self.clear_deadline_ms = Some(now_ms + PRODUCT_CLEAR_GRACE_MS);
        }
    }

    /// Pointer left the card bounds: schedule the hover exit
    pub fn schedule_exit(&mut self, now_ms: f64) {
        self.reveal_deadline_ms = None;
        if self.exit_deadline_ms.is_none() {
            self.exit_deadline_ms = Some(now_ms + HOVER_EXIT_GRACE_MS);
        }
    }

    /// Pointer came back inside the card bounds before the exit fired
    pub fn cancel_exit(&mut self) {
        self.exit_deadline_ms = None;
    }
}

/// Drag state recorded at pointer-down
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    /// Pointer position at drag start (screen space)
    pub pointer_start: Vec2,
    /// Card `x` at drag start (percent of gallery span)
    pub card_start_x: f32,
    /// Card `y` at drag start (virtual scroll space)
    pub card_start_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_drift_exemption() {
        assert!(!CardInteraction::Idle.suspends_drift());
        assert!(CardInteraction::Hovered(HoverState::new(Vec2::ZERO)).suspends_drift());
        assert!(CardInteraction::Expanded.suspends_drift());
        assert!(CardInteraction::Dragging(DragState {
            pointer_start: Vec2::ZERO,
            card_start_x: 50.0,
            card_start_y: 100.0,
        })
        .suspends_drift());
    }

    #[test]
    fn test_arm_dwell_sets_deadline() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.arm_dwell(1000.0);

        assert!(hover.over_product);
        assert_eq!(hover.reveal_deadline_ms, Some(1000.0 + DWELL_MS));
    }

    #[test]
    fn test_arm_dwell_after_reveal_does_not_rearm() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.revealed = true;
        hover.arm_dwell(1000.0);

        assert!(hover.reveal_deadline_ms.is_none());
    }

    #[test]
    fn test_disarm_dwell_cancels_pending_reveal() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.arm_dwell(1000.0);
        hover.disarm_dwell(1300.0);

        assert!(!hover.over_product);
        assert!(hover.reveal_deadline_ms.is_none());
        // Nothing was revealed, so nothing is scheduled to clear
        assert!(hover.clear_deadline_ms.is_none());
    }

    #[test]
    fn test_disarm_dwell_schedules_clear_after_reveal() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.revealed = true;
        hover.disarm_dwell(2000.0);

        assert_eq!(hover.clear_deadline_ms, Some(2000.0 + PRODUCT_CLEAR_GRACE_MS));
    }

    #[test]
    fn test_rearm_replaces_clear_deadline() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.revealed = true;
        hover.disarm_dwell(2000.0);
        hover.arm_dwell(2050.0);

        assert!(hover.clear_deadline_ms.is_none());
    }

    #[test]
    fn test_exit_not_stacked() {
        let mut hover = HoverState::new(Vec2::ZERO);
        hover.schedule_exit(1000.0);
        hover.schedule_exit(1100.0);

        // The original deadline stands; a second exit does not extend it
        assert_eq!(hover.exit_deadline_ms, Some(1000.0 + HOVER_EXIT_GRACE_MS));

        hover.cancel_exit();
        assert!(hover.exit_deadline_ms.is_none());
    }
}
