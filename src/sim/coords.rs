//! Coordinate transforms between simulation space and the slot lattice
//!
//! Simulation space is centered horizontally on the playfield with the gun at
//! the origin: x spans [-W/2, W/2] and y grows upward from 0 to H. Row 0 of
//! the lattice is the top row (y = H). Odd rows are shifted right by half a
//! unit, so every lattice x is a whole or half unit.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GUN_LENGTH;

/// Canonical identity of a lattice point.
///
/// Stores the lattice position in fixed point: `hx` is x in half units and
/// `y` is the whole-unit height, so equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub y: i32,
    pub hx: i32,
}

impl SlotKey {
    pub const fn new(hx: i32, y: i32) -> Self {
        Self { y, hx }
    }

    /// Decode back to the lattice point in simulation space
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.hx as f32 * 0.5, self.y as f32)
    }

    /// The six lattice points touching this one: (x±1, y) and (x±0.5, y±1).
    ///
    /// Order is fixed and used as the tie-break order for landing.
    pub fn adjacent(&self) -> [SlotKey; 6] {
        let Self { y, hx } = *self;
        [
            SlotKey::new(hx + 2, y),     // East
            SlotKey::new(hx - 2, y),     // West
            SlotKey::new(hx + 1, y + 1), // Up-right
            SlotKey::new(hx - 1, y + 1), // Up-left
            SlotKey::new(hx + 1, y - 1), // Down-right
            SlotKey::new(hx - 1, y - 1), // Down-left
        ]
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hx as f32 * 0.5, self.y)
    }
}

/// Playfield dimensions and the transforms that depend on them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: u32,
    pub height: u32,
}

impl Playfield {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Horizontal shift (in half units) of column 0 in a row of this parity
    #[inline]
    fn row_origin_hx(&self, row: i32) -> i32 {
        let offset = if row.rem_euclid(2) == 1 { 1 } else { 0 };
        offset - self.width as i32
    }

    /// Simulation position of the lattice point at `(row, col)`
    pub fn position_for_slot(&self, row: i32, col: i32) -> Vec2 {
        let offset = if row.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
        Vec2::new(
            col as f32 + offset - self.half_width(),
            (self.height as i32 - row) as f32,
        )
    }

    /// Key of the lattice point at `(row, col)`
    pub fn slot_key(&self, row: i32, col: i32) -> SlotKey {
        SlotKey::new(
            self.row_origin_hx(row) + 2 * col,
            self.height as i32 - row,
        )
    }

    /// Round a position to the nearest lattice point
    pub fn key_of(&self, pos: Vec2) -> SlotKey {
        let y = pos.y.round() as i32;
        let row = self.height as i32 - y;
        let origin_hx = self.row_origin_hx(row);
        let col = (pos.x - origin_hx as f32 * 0.5).round() as i32;
        SlotKey::new(origin_hx + 2 * col, y)
    }

    /// Decode a key back to its lattice point
    #[inline]
    pub fn slot_of(&self, key: SlotKey) -> Vec2 {
        key.position()
    }

    /// `(row, col)` of a key in this playfield
    pub fn row_col(&self, key: SlotKey) -> (i32, i32) {
        let row = self.height as i32 - key.y;
        let col = (key.hx - self.row_origin_hx(row)).div_euclid(2);
        (row, col)
    }

    /// Whether an in-flight bullet is still inside the playfield.
    ///
    /// Horizontal bounds get one unit of slack on each side.
    pub fn in_flight_bounds(&self, pos: Vec2) -> bool {
        let max_x = self.half_width() + 1.0;
        (-max_x..=max_x).contains(&pos.x) && (0.0..=self.height as f32).contains(&pos.y)
    }
}

/// Mapping between canvas pixels and simulation space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub playfield: Playfield,
    /// Pixels per half grid unit
    pub scale: f32,
}

impl Viewport {
    pub fn new(playfield: Playfield, scale: f32) -> Self {
        Self { playfield, scale }
    }

    /// Canvas dimensions in pixels
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(
            (self.playfield.width as f32 + 0.5) * 2.0 * self.scale,
            self.playfield.height as f32 * 2.0 * self.scale,
        )
    }

    pub fn sim_to_canvas(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * self.scale * (pos.x + self.playfield.half_width()),
            2.0 * self.scale * (self.playfield.height as f32 - pos.y),
        )
    }

    pub fn canvas_to_sim(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / (2.0 * self.scale) - self.playfield.half_width(),
            self.playfield.height as f32 - pixel.y / (2.0 * self.scale),
        )
    }

    /// End of the drawn gun barrel, in canvas pixels
    pub fn gun_tip(&self, direction: Vec2) -> Vec2 {
        self.sim_to_canvas(direction.normalize_or_zero() * GUN_LENGTH)
    }
}
