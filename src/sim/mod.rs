//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (slots are kept in a `BTreeMap`)
//! - No rendering or platform dependencies

pub mod cluster;
pub mod coords;
pub mod grid;
pub mod gun;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use cluster::{explode, nearest_empty_slot, neighbors_of, same_color_cluster};
pub use coords::{Playfield, SlotKey, Viewport};
pub use grid::{BubbleGrid, Color, Occupant};
pub use gun::{Direction, Gun};
pub use state::{GameEvent, GamePhase, GameState, SessionStatus, ShotOutcome};
pub use tick::{TickInput, tick};
pub use trajectory::{Bullet, FlightParams, FlightState, Trajectory, find_collision};
