//! Fixed timestep simulation tick
//!
//! Core game loop step, advanced by an external scheduler.

use glam::Vec2;

use super::cluster::neighbors_of;
use super::grid::{Color, Occupant};
use super::gun::Direction;
use super::state::{GamePhase, GameState, ShotOutcome};
use crate::consts::NUDGE_STEP;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim target in simulation space (from mouse/touch position)
    pub aim: Option<Vec2>,
    /// Keyboard rotation
    pub nudge: Option<Direction>,
    /// Fire the loaded bullet (click/tap/space)
    pub fire: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<ShotOutcome> {
    // Won and Lost are final
    if state.is_over() {
        return None;
    }

    // Idle/demo mode - pick a target and shoot as soon as the gun is loaded
    let mut input = input.clone();
    if input.idle_mode && state.phase == GamePhase::Ready {
        if let Some(target) = autopilot_target(state) {
            input.aim = Some(target);
        }
        input.fire = true;
    }
    let input = &input;

    if let Some(target) = input.aim {
        state.aim(target);
    }
    if let Some(direction) = input.nudge {
        state.gun.nudge(direction, NUDGE_STEP);
    }
    if input.fire {
        state.fire();
    }

    state.advance_shot()
}

/// Lowest exposed bubble matching the loaded color, else the lowest exposed bubble.
///
/// Exposed means at least one neighbor is an empty slot to land in.
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let grid = &state.grid;
    let exposed = |color: Option<Color>| {
        grid.bubbles()
            .filter(|(_, c)| color.is_none_or(|wanted| *c == wanted))
            .filter(|(key, _)| {
                neighbors_of(*key, grid)
                    .into_iter()
                    .any(|n| grid.get(n) == Some(Occupant::Empty))
            })
            .map(|(key, _)| key.position())
            .min_by(|a, b| {
                a.y.total_cmp(&b.y)
                    .then_with(|| a.x.abs().total_cmp(&b.x.abs()))
            })
    };

    exposed(Some(state.bullet.color)).or_else(|| exposed(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::BubbleGrid;
    use crate::sim::state::SessionStatus;

    fn small_config() -> GameConfig {
        GameConfig {
            width: 3,
            height: 4,
            filled_rows: 0,
            palette: vec![Color::Red],
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_ready_to_flying() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(state.phase, GamePhase::Ready);

        // Tick without fire - should stay ready
        assert!(tick(&mut state, &TickInput::default()).is_none());
        assert_eq!(state.phase, GamePhase::Ready);

        // Fire
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Flying);
        assert_eq!(state.bullet.steps, 1);
    }

    #[test]
    fn test_tick_runs_shot_to_completion() {
        let mut state = GameState::new(GameConfig::default(), 4242).unwrap();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut outcome = tick(&mut state, &fire);
        let mut ticks = 1;
        while outcome.is_none() {
            // Holding fire while flying does not start a second shot
            outcome = tick(&mut state, &fire);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(state.shots, 1);
        assert!(matches!(state.phase, GamePhase::Ready | GamePhase::Won | GamePhase::Lost));
    }

    #[test]
    fn test_nudge_rotates_gun() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        let input = TickInput {
            nudge: Some(Direction::Right),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.gun.direction.x > 0.0);
        assert!((state.gun.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_idle_mode_clears_single_bubble() {
        let config = small_config();
        let mut grid = BubbleGrid::empty(config.playfield());
        grid.set_at(0, 1, Occupant::Bubble(Color::Red)).unwrap();
        let mut state = GameState::from_grid(config, grid, 9).unwrap();

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut outcome = None;
        for _ in 0..100 {
            outcome = tick(&mut state, &idle);
            if outcome.is_some() {
                break;
            }
        }

        assert!(matches!(outcome, Some(ShotOutcome::Landed { .. })));
        assert_eq!(state.status(), SessionStatus::Won);
        assert_eq!(state.score, state.config.reward);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut state = GameState::new(small_config(), 2).unwrap();
        state.play_shot();
        assert_eq!(state.phase, GamePhase::Won);

        let input = TickInput {
            aim: Some(Vec2::new(1.0, 0.0)),
            fire: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_none());
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.gun.direction, Vec2::Y);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(GameConfig::default(), 99999).unwrap();
        let mut state2 = GameState::new(GameConfig::default(), 99999).unwrap();

        let inputs = [
            TickInput {
                aim: Some(Vec2::new(-4.0, 20.0)),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                aim: Some(Vec2::new(7.0, 3.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                assert_eq!(tick(&mut state1, input), tick(&mut state2, input));
            }
        }

        assert_eq!(state1.shots, state2.shots);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.grid, state2.grid);
    }
}
