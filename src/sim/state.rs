//! Game state and the round controller
//!
//! All state that defines a game lives here. The controller operations
//! (`fire`, `advance_shot`, `new_round`) are the only code that mutates the
//! grid and the score.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cluster::{explode, nearest_empty_slot};
use super::coords::{Playfield, SlotKey};
use super::grid::{BubbleGrid, Color, Occupant};
use super::gun::Gun;
use super::trajectory::{Bullet, FlightParams, FlightState, Trajectory};
use crate::config::GameConfig;
use crate::error::GameError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bullet loaded, waiting for a fire input
    Ready,
    /// A shot is in flight
    Flying,
    /// Field cleared
    Won,
    /// A shot had nowhere to land
    Lost,
}

/// Session status as seen by collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

/// How a shot ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Landed in `slot` and exploded `removed` slots (possibly including `slot`)
    Landed {
        slot: SlotKey,
        color: Color,
        removed: Vec<SlotKey>,
        points: i64,
    },
    /// Left the playfield
    Missed { points: i64 },
    /// Nothing to land next to; the session is lost
    Jammed { hit: SlotKey },
}

/// Notifications for collaborators, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A shot left the gun
    Fired { color: Color, direction: Vec2 },
    /// The bullet snapped into a slot
    Landed { slot: SlotKey, color: Color },
    /// A cluster was removed
    Exploded { slots: Vec<SlotKey>, color: Color },
    /// Score changed to `score`
    ScoreChanged { score: i64 },
    /// Session reached a terminal status
    SessionOver { status: SessionStatus },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub playfield: Playfield,
    rng: Pcg32,
    pub grid: BubbleGrid,
    pub gun: Gun,
    /// Loaded bullet, or the one in flight
    pub bullet: Bullet,
    /// Present while a shot is in flight
    pub flight: Option<Trajectory>,
    pub score: i64,
    pub phase: GamePhase,
    /// Shots resolved so far
    pub shots: u32,
    /// Pending notifications
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let playfield = config.playfield();
        let grid = BubbleGrid::create(playfield, config.filled_rows, &config.palette, &mut rng)?;
        Self::with_grid(config, grid, seed, rng)
    }

    /// Create a game around a prepared grid (custom layouts, tests)
    pub fn from_grid(config: GameConfig, grid: BubbleGrid, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        if grid.playfield() != config.playfield() {
            return Err(GameError::config(format!(
                "grid is {}x{} but config is {}x{}",
                grid.playfield().width,
                grid.playfield().height,
                config.width,
                config.height
            )));
        }
        Self::with_grid(config, grid, seed, Pcg32::seed_from_u64(seed))
    }

    fn with_grid(
        config: GameConfig,
        grid: BubbleGrid,
        seed: u64,
        mut rng: Pcg32,
    ) -> Result<Self, GameError> {
        let color = Color::sample(&config.palette, &mut rng)
            .ok_or_else(|| GameError::config("palette is empty"))?;
        log::info!(
            "New game: seed {}, {}x{} grid, {} bubbles",
            seed,
            config.width,
            config.height,
            grid.bubble_count()
        );
        Ok(Self {
            seed,
            playfield: config.playfield(),
            config,
            rng,
            grid,
            gun: Gun::default(),
            bullet: Bullet::new(color),
            flight: None,
            score: 0,
            phase: GamePhase::Ready,
            shots: 0,
            events: Vec::new(),
        })
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            GamePhase::Won => SessionStatus::Won,
            GamePhase::Lost => SessionStatus::Lost,
            GamePhase::Ready | GamePhase::Flying => SessionStatus::Playing,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Won | GamePhase::Lost)
    }

    fn flight_params(&self) -> FlightParams {
        FlightParams {
            collision_radius: self.config.collision_radius,
            step_scale: self.config.step_scale,
        }
    }

    /// Aim the gun at a point in simulation space.
    ///
    /// A shot already in flight keeps the direction it was fired with.
    pub fn aim(&mut self, target: Vec2) -> Vec2 {
        self.gun.rotate(target)
    }

    /// Launch the loaded bullet along the current aim.
    ///
    /// Returns `false` (and does nothing) unless the game is `Ready`.
    pub fn fire(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        let trajectory = Trajectory::launch(self.gun.direction);
        self.push_event(GameEvent::Fired {
            color: self.bullet.color,
            direction: trajectory.direction,
        });
        self.bullet.pos = trajectory.origin;
        self.bullet.steps = 0;
        self.flight = Some(trajectory);
        self.phase = GamePhase::Flying;
        true
    }

    /// Advance the shot in flight by one tick, resolving it when it ends
    pub fn advance_shot(&mut self) -> Option<ShotOutcome> {
        if self.flight.is_none() {
            return None;
        }
        let params = self.flight_params();
        let flight = self.flight.as_mut()?;
        let state = flight.step(&mut self.bullet, &self.grid, &self.playfield, &params);

        let outcome = match state {
            FlightState::Flying => return None,
            FlightState::Landed { hit } => self.land(hit),
            FlightState::OutOfBounds => self.miss(),
        };
        self.shots += 1;
        self.new_round();
        Some(outcome)
    }

    /// Fire and run the shot to completion
    pub fn play_shot(&mut self) -> Option<ShotOutcome> {
        if !self.fire() {
            return None;
        }
        loop {
            if let Some(outcome) = self.advance_shot() {
                return Some(outcome);
            }
        }
    }

    /// Snap the bullet next to `hit`, explode its cluster and score it
    fn land(&mut self, hit: SlotKey) -> ShotOutcome {
        let color = self.bullet.color;
        match self.place_and_explode(hit, color) {
            Ok((slot, removed)) => {
                // The bullet's own bubble never sat on the board, so it scores nothing
                let popped = removed.iter().filter(|key| **key != slot).count() as i64;
                let points = popped.saturating_mul(self.config.reward);
                self.bullet.pos = slot.position();
                self.push_event(GameEvent::Landed { slot, color });
                if !removed.is_empty() {
                    log::debug!("Exploded {} {:?} bubbles", removed.len(), color);
                    self.push_event(GameEvent::Exploded {
                        slots: removed.clone(),
                        color,
                    });
                }
                if points != 0 {
                    self.add_score(points);
                }
                ShotOutcome::Landed {
                    slot,
                    color,
                    removed,
                    points,
                }
            }
            Err(err) => {
                match err {
                    GameError::NoLandingSlot { .. } => log::warn!("Board jammed: {}", err),
                    _ => log::error!("Landing failed: {}", err),
                }
                self.phase = GamePhase::Lost;
                ShotOutcome::Jammed { hit }
            }
        }
    }

    fn place_and_explode(
        &mut self,
        hit: SlotKey,
        color: Color,
    ) -> Result<(SlotKey, Vec<SlotKey>), GameError> {
        let slot = nearest_empty_slot(self.bullet.pos, hit, &self.grid)?;
        log::debug!("Landing {:?} at {} (hit {})", color, slot, hit);
        self.grid.set(slot, Occupant::Bubble(color))?;
        let removed = explode(slot, color, &mut self.grid)?;
        Ok((slot, removed))
    }

    fn miss(&mut self) -> ShotOutcome {
        let points = self.config.penalty.saturating_neg();
        log::debug!("Shot left the playfield at {}", self.bullet.pos);
        self.add_score(points);
        ShotOutcome::Missed { points }
    }

    fn add_score(&mut self, points: i64) {
        self.score = self.score.saturating_add(points);
        self.push_event(GameEvent::ScoreChanged { score: self.score });
    }

    /// Reload the gun, or end the session if the field is clear or jammed
    pub fn new_round(&mut self) {
        self.flight = None;

        if self.phase == GamePhase::Lost {
            self.push_event(GameEvent::SessionOver {
                status: SessionStatus::Lost,
            });
            return;
        }

        if self.grid.is_cleared() {
            log::info!("Field cleared after {} shots, score {}", self.shots, self.score);
            self.phase = GamePhase::Won;
            self.push_event(GameEvent::SessionOver {
                status: SessionStatus::Won,
            });
            return;
        }

        // Palette was validated at construction
        let color = Color::sample(&self.config.palette, &mut self.rng).unwrap_or(self.bullet.color);
        self.bullet = Bullet::new(color);
        self.phase = GamePhase::Ready;
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// JSON snapshot of the full state
    pub fn snapshot_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}
