//! Bubble Shooter - A hex-lattice projectile matching puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, clusters, trajectory, game state)
//! - `renderer`: Renderer collaborator interface and a text renderer
//! - `platform`: Input/score collaborators and the fixed-step session driver
//! - `config`: Data-driven game configuration

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;

/// Game configuration constants
pub mod consts {
    /// Bubble radius in grid units
    pub const BUBBLE_RADIUS: f32 = 1.0;
    /// Collision happens slightly before bubbles touch
    pub const COLLISION_FACTOR: f32 = 0.85;
    /// Default collision radius (2 * radius * factor)
    pub const DEFAULT_COLLISION_RADIUS: f32 = 2.0 * BUBBLE_RADIUS * COLLISION_FACTOR;

    /// Default playfield dimensions (grid units)
    pub const PLAYFIELD_WIDTH: u32 = 40;
    pub const PLAYFIELD_HEIGHT: u32 = 30;
    /// Rows packed with bubbles at the start of a game
    pub const FILLED_ROWS: u32 = 5;

    /// Points per exploded bubble
    pub const REWARD: i64 = 10;
    /// Points lost when a shot leaves the playfield
    pub const PENALTY: i64 = 10;

    /// Simulation tick interval (ms)
    pub const TICK_INTERVAL_MS: u32 = 10;
    /// Distance travelled by a bullet per tick (grid units)
    pub const STEP_SCALE: f32 = 0.75;
    /// Maximum substeps per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas pixels per half grid unit
    pub const CANVAS_SCALE: f32 = 10.0;
    /// Drawn gun barrel length (grid units)
    pub const GUN_LENGTH: f32 = 5.0;
    /// Keyboard aim step (radians)
    pub const NUDGE_STEP: f32 = 0.05;
}
