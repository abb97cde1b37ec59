//! Draw command generation for 2D canvas renderers
//!
//! `CanvasRenderer` is the host-side hook: it rebuilds the command list every
//! frame and the host replays it onto its canvas.

use glam::Vec2;

use super::{Frame, Renderer};
use crate::consts::BUBBLE_RADIUS;
use crate::sim::Viewport;

/// Gun barrel color
pub const GUN_COLOR: &str = "#ffffff";
/// Canvas background
pub const BACKGROUND: &str = "#0f0f23";

/// A single canvas primitive, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: &'static str },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: &'static str,
    },
}

/// Commands that paint one frame: background, bubbles, gun, then bullet
pub fn frame_commands(frame: &Frame<'_>, viewport: &Viewport) -> Vec<DrawCommand> {
    let radius = BUBBLE_RADIUS * viewport.scale;
    // Grid bubbles hang down and right from their lattice point so row 0 and
    // column 0 stay on the canvas; the launcher sits just above the bottom edge
    let grid_offset = Vec2::new(radius, radius);
    let launcher_offset = Vec2::new(radius, -radius);

    let mut commands = Vec::with_capacity(frame.grid.bubble_count() + 3);
    commands.push(DrawCommand::Clear { color: BACKGROUND });

    for (key, color) in frame.grid.bubbles() {
        commands.push(DrawCommand::Circle {
            center: viewport.sim_to_canvas(key.position()) + grid_offset,
            radius,
            color: color.hex(),
        });
    }

    commands.push(DrawCommand::Line {
        from: viewport.sim_to_canvas(Vec2::ZERO) + launcher_offset,
        to: viewport.gun_tip(frame.gun) + launcher_offset,
        color: GUN_COLOR,
    });

    commands.push(DrawCommand::Circle {
        center: viewport.sim_to_canvas(frame.bullet.pos) + launcher_offset,
        radius,
        color: frame.bullet.color.hex(),
    });

    commands
}

/// Renderer that keeps the draw commands of the latest frame
pub struct CanvasRenderer {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl CanvasRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Commands for the last drawn frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.commands = frame_commands(frame, &self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GameState;

    #[test]
    fn test_frame_commands_cover_every_bubble() {
        let state = GameState::new(GameConfig::default(), 3).unwrap();
        let frame = Frame::of(&state);
        let viewport = Viewport::new(state.playfield, 10.0);
        let commands = frame_commands(&frame, &viewport);

        let circles = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        // Every bubble plus the loaded bullet
        assert_eq!(circles, state.grid.bubble_count() + 1);
        assert_eq!(commands[0], DrawCommand::Clear { color: BACKGROUND });
    }

    #[test]
    fn test_canvas_renderer_replaces_commands() {
        let mut state = GameState::new(GameConfig::default(), 3).unwrap();
        let mut renderer = CanvasRenderer::new(Viewport::new(state.playfield, 10.0));
        assert!(renderer.commands().is_empty());

        renderer.draw(&Frame::of(&state));
        let first = renderer.commands().len();
        assert_eq!(first, state.grid.bubble_count() + 3);

        let key = state.grid.bubbles().next().unwrap().0;
        state.grid.set(key, crate::sim::Occupant::Empty).unwrap();
        renderer.draw(&Frame::of(&state));
        assert_eq!(renderer.commands().len(), first - 1);
    }

    #[test]
    fn test_bubbles_fit_on_canvas() {
        let state = GameState::new(GameConfig::default(), 3).unwrap();
        let viewport = Viewport::new(state.playfield, 10.0);
        let size = viewport.canvas_size();

        for command in frame_commands(&Frame::of(&state), &viewport) {
            if let DrawCommand::Circle { center, radius, .. } = command {
                assert!(center.x - radius >= -1e-3 && center.x + radius <= size.x + 1e-3);
                assert!(center.y - radius >= -1e-3 && center.y + radius <= size.y + 1e-3);
            }
        }
    }
}
