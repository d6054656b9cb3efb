//! Per-frame drift simulation
//!
//! Runs once per scheduled frame over every card. Idle cards fade in,
//! integrate their velocity at a damped sub-pixel step, and receive a small
//! random perturbation so the field never visually settles. Cards that are
//! hovered, dragged, or expanded are left untouched apart from their
//! opacity being pinned at 1.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::card::{Card, X_MAX, X_MIN};
use crate::config::PhysicsConfig;

/// Linear fade-in window from spawn (ms)
pub const FADE_IN_MS: f64 = 800.0;

/// Velocity integration step per frame
const DRIFT_STEP: f32 = 1.0;

/// Per-frame velocity damping
const DAMPING: f32 = 0.985;

/// Base horizontal perturbation amplitude (percent per frame)
const JIGGLE_X: f32 = 0.0015;

/// Base vertical perturbation amplitude (px per frame); drift reads as
/// mostly vertical
const JIGGLE_Y: f32 = 0.006;

/// Drift simulator mutating idle cards in place each frame
pub struct DriftSimulator {
    physics: PhysicsConfig,
    rng: StdRng,
}

impl DriftSimulator {
    /// Create a simulator with the given physics tuning
    pub fn new(physics: PhysicsConfig) -> Self {
        Self::with_seed(physics, rand::random())
    }

    /// Create a simulator with a fixed perturbation seed (deterministic tests)
    pub fn with_seed(physics: PhysicsConfig, seed: u64) -> Self {
        Self {
            physics: physics.clamped(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current physics tuning
    pub fn physics(&self) -> PhysicsConfig {
        self.physics
    }

    /// Advance every card by one frame
    ///
    /// Never allocates or removes; interaction-suspended cards keep their
    /// position and velocity exactly (running the step twice on a hovered
    /// card yields identical position).
    pub fn step(&mut self, cards: &mut [Card], now_ms: f64) {
        for card in cards.iter_mut() {
            if card.suspends_drift() {
                // Hovered/expanded/dragged cards are fully visible
                card.opacity = 1.0;
                continue;
            }
            self.step_card(card, now_ms);
        }
    }

    fn step_card(&mut self, card: &mut Card, now_ms: f64) {
        let age = (now_ms - card.spawned_ms).max(0.0);
        card.opacity = (age / FADE_IN_MS).min(1.0) as f32;

        card.x += card.vx * DRIFT_STEP * self.physics.drift_speed;
        card.y += card.vy * DRIFT_STEP * self.physics.drift_speed;

        card.vx *= DAMPING;
        card.vy *= DAMPING;

        let jiggle = self.physics.jiggle;
        card.vx += self.rng.gen_range(-JIGGLE_X..=JIGGLE_X) * jiggle;
        card.vy += self.rng.gen_range(-JIGGLE_Y..=JIGGLE_Y) * jiggle;

        // Partially inelastic reflection at the horizontal bounds
        if card.x < X_MIN {
            card.x = X_MIN;
            card.vx = -card.vx * self.physics.bounce;
        } else if card.x > X_MAX {
            card.x = X_MAX;
            card.vx = -card.vx * self.physics.bounce;
        }
    }
}
