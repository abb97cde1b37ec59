//! Rendering collaborator interface
//!
//! The engine never draws. Each frame it hands a read-only `Frame` snapshot
//! to a `Renderer`; `shapes` turns that snapshot into canvas draw commands
//! and `text` prints it to a terminal.

pub mod shapes;
pub mod text;

use glam::Vec2;

pub use shapes::{CanvasRenderer, DrawCommand, frame_commands};
pub use text::TextRenderer;

use crate::sim::{BubbleGrid, Bullet, GamePhase, GameState, Playfield, SessionStatus};

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub playfield: Playfield,
    pub grid: &'a BubbleGrid,
    /// Unit aim direction
    pub gun: Vec2,
    pub bullet: &'a Bullet,
    /// Whether the bullet is currently in flight
    pub flying: bool,
    pub score: i64,
    pub status: SessionStatus,
    /// Shots resolved so far
    pub shots: u32,
}

impl<'a> Frame<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            playfield: state.playfield,
            grid: &state.grid,
            gun: state.gun.direction,
            bullet: &state.bullet,
            flying: state.phase == GamePhase::Flying,
            score: state.score,
            status: state.status(),
            shots: state.shots,
        }
    }
}

/// Paints frames
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}
