//! Bullet flight: a straight-line, fixed-step state machine
//!
//! Each tick first checks for a hit at the current position, then for leaving
//! the playfield, and only then advances the bullet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::coords::{Playfield, SlotKey};
use super::grid::{BubbleGrid, Color};

/// The loaded or in-flight bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub color: Color,
    /// Ticks since launch
    pub steps: u32,
}

impl Bullet {
    /// A fresh bullet sitting at the gun origin
    pub fn new(color: Color) -> Self {
        Self {
            pos: Vec2::ZERO,
            color,
            steps: 0,
        }
    }
}

/// Flight state of a shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightState {
    Flying,
    /// Came within collision range of the `hit` slot
    Landed { hit: SlotKey },
    /// Left the playfield without touching anything
    OutOfBounds,
}

impl FlightState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlightState::Flying)
    }
}

/// Distance and speed parameters for a flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    pub collision_radius: f32,
    pub step_scale: f32,
}

/// One shot's path; the direction is fixed at launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub origin: Vec2,
    pub direction: Vec2,
    pub state: FlightState,
}

impl Trajectory {
    /// Launch from the gun origin along `direction`
    pub fn launch(direction: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            direction: direction.normalize_or(Vec2::Y),
            state: FlightState::Flying,
        }
    }

    /// Advance the bullet by one tick and return the new state
    pub fn step(
        &mut self,
        bullet: &mut Bullet,
        grid: &BubbleGrid,
        playfield: &Playfield,
        params: &FlightParams,
    ) -> FlightState {
        if self.state.is_terminal() {
            return self.state;
        }

        if let Some(hit) = find_collision(bullet.pos, grid, params.collision_radius) {
            self.state = FlightState::Landed { hit };
            return self.state;
        }

        if !playfield.in_flight_bounds(bullet.pos) {
            self.state = FlightState::OutOfBounds;
            return self.state;
        }

        bullet.steps += 1;
        bullet.pos = self.origin + self.direction * (bullet.steps as f32 * params.step_scale);
        self.state
    }
}

/// Closest occupied slot within `radius` of `pos`.
///
/// Equal distances keep the first slot in grid order.
pub fn find_collision(pos: Vec2, grid: &BubbleGrid, radius: f32) -> Option<SlotKey> {
    let mut best: Option<(SlotKey, f32)> = None;
    for (key, _) in grid.bubbles() {
        let distance = key.position().distance(pos);
        if distance > radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((key, distance)),
        }
    }
    best.map(|(key, _)| key)
}
