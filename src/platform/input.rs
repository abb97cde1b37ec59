//! Input events delivered to a session

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::Direction;

/// Discrete input from the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Aim at a point already in simulation space
    Aim(Vec2),
    /// Pointer moved, in canvas pixels
    PointerMoved(Vec2),
    /// Rotate the gun one keyboard step
    Nudge(Direction),
    /// Click/tap/space
    Fire,
    /// Toggle idle/demo mode
    ToggleIdle,
}

/// Source of input events, polled once per session update
pub trait InputSource {
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Replays a fixed list of events, one per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}
