//! The player's gun

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keyboard rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// Aim direction of the gun, always unit length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    pub direction: Vec2,
}

impl Default for Gun {
    fn default() -> Self {
        // Straight up
        Self { direction: Vec2::Y }
    }
}

impl Gun {
    /// Aim at a point in simulation space (the gun sits at the origin).
    ///
    /// The angle is not clamped, so the gun can point below the horizon.
    pub fn rotate(&mut self, target: Vec2) -> Vec2 {
        let angle = target.y.atan2(target.x);
        self.direction = Vec2::from_angle(angle);
        self.direction
    }

    /// Rotate the current aim by `step` radians
    pub fn nudge(&mut self, direction: Direction, step: f32) -> Vec2 {
        let delta = match direction {
            Direction::Left => step,
            Direction::Right => -step,
        };
        self.direction = Vec2::from_angle(delta).rotate(self.direction).normalize_or(Vec2::Y);
        self.direction
    }

    /// Current aim angle in radians
    pub fn angle(&self) -> f32 {
        self.direction.y.atan2(self.direction.x)
    }
}
