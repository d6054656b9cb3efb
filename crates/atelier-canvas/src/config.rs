//! Canvas tuning configuration
//!
//! Mirrors the physics and spawning sections of the hosted canvas config:
//! multipliers the curator can adjust without touching engine constants.

use serde::{Deserialize, Serialize};

/// How cards move and behave
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Drift speed multiplier (0-3)
    pub drift_speed: f32,
    /// Per-frame perturbation intensity (0-3)
    pub jiggle: f32,
    /// Boundary bounce elasticity (0-1)
    pub bounce: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            drift_speed: 1.0,
            jiggle: 1.0,
            bounce: 0.5,
        }
    }
}

impl PhysicsConfig {
    /// Clamp all multipliers into their documented ranges
    pub fn clamped(self) -> Self {
        Self {
            drift_speed: self.drift_speed.clamp(0.0, 3.0),
            jiggle: self.jiggle.clamp(0.0, 3.0),
            bounce: self.bounce.clamp(0.0, 1.0),
        }
    }
}

/// Card spawning parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpawnConfig {
    /// Cards placed per spawn batch when the viewport nears the bottom
    pub batch_size: usize,
    /// Cards placed when the canvas first initializes
    pub initial_cards: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            batch_size: 6,
            initial_cards: 12,
        }
    }
}
