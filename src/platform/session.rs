//! Fixed-step session driver
//!
//! Owns the game state, turns wall-clock time into simulation ticks and
//! pushes results out to the renderer and score sink.

use crate::config::GameConfig;
use crate::consts::{CANVAS_SCALE, MAX_SUBSTEPS};
use crate::error::GameError;
use crate::renderer::{Frame, Renderer};
use crate::sim::{GameEvent, GameState, SessionStatus, ShotOutcome, TickInput, Viewport, tick};

use super::input::{InputEvent, InputSource};

/// Receives score and end-of-game notifications
pub trait ScoreSink {
    fn score_changed(&mut self, score: i64);
    fn session_over(&mut self, status: SessionStatus, score: i64);
}

/// Score sink that writes to the log
#[derive(Debug, Default)]
pub struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn score_changed(&mut self, score: i64) {
        log::info!("SCORE: {}", score);
    }

    fn session_over(&mut self, status: SessionStatus, score: i64) {
        match status {
            SessionStatus::Won => log::info!("YOU WON! Final score {}", score),
            SessionStatus::Lost => log::info!("Board jammed. Final score {}", score),
            SessionStatus::Playing => {}
        }
    }
}

/// A running game plus its scheduling state
pub struct Session {
    state: GameState,
    viewport: Viewport,
    input: TickInput,
    accumulator_ms: f32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::new(config, seed)?))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            viewport: Viewport::new(state.playfield, CANVAS_SCALE),
            state,
            input: TickInput::default(),
            accumulator_ms: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Queue one input event for the next tick
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Aim(target) => self.input.aim = Some(target),
            InputEvent::PointerMoved(pixel) => {
                self.input.aim = Some(self.viewport.canvas_to_sim(pixel));
            }
            InputEvent::Nudge(direction) => self.input.nudge = Some(direction),
            InputEvent::Fire => self.input.fire = true,
            InputEvent::ToggleIdle => {
                self.input.idle_mode = !self.input.idle_mode;
                log::info!("Idle mode {}", if self.input.idle_mode { "on" } else { "off" });
            }
        }
    }

    /// Drain every pending event from `source`
    pub fn pump(&mut self, source: &mut impl InputSource) -> usize {
        let mut count = 0;
        while let Some(event) = source.poll() {
            self.handle_input(event);
            count += 1;
        }
        count
    }

    /// Run simulation ticks for `dt_ms` of elapsed time, then notify collaborators
    pub fn update(
        &mut self,
        dt_ms: f32,
        renderer: &mut impl Renderer,
        sink: &mut impl ScoreSink,
    ) -> Vec<ShotOutcome> {
        let tick_ms = self.state.config.tick_interval_ms as f32;
        // NaN would poison the accumulator for good
        let dt_ms = if dt_ms.is_finite() { dt_ms } else { 0.0 };
        self.accumulator_ms += dt_ms.clamp(0.0, tick_ms * MAX_SUBSTEPS as f32);

        let mut outcomes = Vec::new();
        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < MAX_SUBSTEPS {
            if let Some(outcome) = tick(&mut self.state, &self.input) {
                outcomes.push(outcome);
            }
            self.accumulator_ms -= tick_ms;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.aim = None;
            self.input.nudge = None;
            self.input.fire = false;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => sink.score_changed(score),
                GameEvent::SessionOver { status } => sink.session_over(status, self.state.score),
                _ => {}
            }
        }

        renderer.draw(&Frame::of(&self.state));
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedInput;
    use crate::sim::{BubbleGrid, Color, GamePhase, Occupant};
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingSink {
        scores: Vec<i64>,
        over: Option<(SessionStatus, i64)>,
    }

    impl ScoreSink for RecordingSink {
        fn score_changed(&mut self, score: i64) {
            self.scores.push(score);
        }

        fn session_over(&mut self, status: SessionStatus, score: i64) {
            self.over = Some((status, score));
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, _frame: &Frame<'_>) {
            self.frames += 1;
        }
    }

    fn empty_config() -> GameConfig {
        GameConfig {
            width: 3,
            height: 4,
            filled_rows: 0,
            palette: vec![Color::Red],
            ..Default::default()
        }
    }

    fn run_until_settled(
        session: &mut Session,
        renderer: &mut CountingRenderer,
        sink: &mut RecordingSink,
    ) -> Vec<ShotOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..100 {
            outcomes.extend(session.update(50.0, renderer, sink));
            if session.state().phase != GamePhase::Flying {
                break;
            }
        }
        outcomes
    }

    #[test]
    fn test_pointer_aim_uses_viewport() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let pixel = session.viewport().sim_to_canvas(Vec2::new(3.0, 4.0));
        session.handle_input(InputEvent::PointerMoved(pixel));
        session.update(10.0, &mut CountingRenderer::default(), &mut RecordingSink::default());

        let dir = session.state().gun.direction;
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-3);
    }

    #[test]
    fn test_partial_tick_waits() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();
        session.handle_input(InputEvent::Fire);

        session.update(4.0, &mut renderer, &mut sink);
        assert_eq!(session.state().phase, GamePhase::Ready);
        session.update(6.0, &mut renderer, &mut sink);
        assert_eq!(session.state().phase, GamePhase::Flying);
        assert_eq!(renderer.frames, 2);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();

        session.update(f32::NAN, &mut renderer, &mut sink);
        session.update(f32::INFINITY, &mut renderer, &mut sink);
        assert_eq!(session.state().phase, GamePhase::Ready);

        session.handle_input(InputEvent::Fire);
        session.update(10.0, &mut renderer, &mut sink);
        assert_eq!(session.state().phase, GamePhase::Flying);
    }

    #[test]
    fn test_session_feeds_canvas_renderer() {
        use crate::renderer::{CanvasRenderer, DrawCommand};

        let mut session = Session::new(GameConfig::default(), 2).unwrap();
        let mut renderer = CanvasRenderer::new(*session.viewport());
        session.update(10.0, &mut renderer, &mut RecordingSink::default());

        let commands = renderer.commands();
        assert_eq!(commands.len(), session.state().grid.bubble_count() + 3);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_missed_shot_notifies_sink() {
        let mut session = Session::new(empty_config(), 1).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();

        let mut input = ScriptedInput::new([InputEvent::Aim(Vec2::Y), InputEvent::Fire]);
        assert_eq!(session.pump(&mut input), 2);
        let outcomes = run_until_settled(&mut session, &mut renderer, &mut sink);

        assert_eq!(outcomes, vec![ShotOutcome::Missed { points: -10 }]);
        assert_eq!(sink.scores, vec![-10]);
        assert_eq!(sink.over, Some((SessionStatus::Won, -10)));
    }

    #[test]
    fn test_fire_while_flying_is_dropped() {
        let config = GameConfig {
            width: 3,
            height: 4,
            filled_rows: 0,
            palette: vec![Color::Red],
            ..Default::default()
        };
        let mut grid = BubbleGrid::empty(config.playfield());
        grid.set_at(0, 0, Occupant::Bubble(Color::Blue)).unwrap();
        grid.set_at(0, 2, Occupant::Bubble(Color::Blue)).unwrap();
        let mut session = Session::from_state(GameState::from_grid(config, grid, 5).unwrap());
        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();

        session.handle_input(InputEvent::Fire);
        session.update(10.0, &mut renderer, &mut sink);
        assert_eq!(session.state().phase, GamePhase::Flying);

        // Second shot request mid-flight is ignored, not queued
        session.handle_input(InputEvent::Fire);
        run_until_settled(&mut session, &mut renderer, &mut sink);
        session.update(50.0, &mut renderer, &mut sink);

        assert_eq!(session.state().shots, 1);
        assert_eq!(session.state().phase, GamePhase::Ready);
    }

    #[test]
    fn test_idle_mode_plays_without_input() {
        let mut session = Session::new(GameConfig::default(), 21).unwrap();
        session.handle_input(InputEvent::ToggleIdle);
        let mut renderer = CountingRenderer::default();
        let mut sink = RecordingSink::default();

        for _ in 0..200 {
            session.update(80.0, &mut renderer, &mut sink);
        }
        assert!(session.state().shots > 0);
        assert_eq!(renderer.frames, 200);
    }
}
