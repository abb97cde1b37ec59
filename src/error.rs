//! Engine error type

use std::fmt;

use crate::sim::SlotKey;

/// Errors produced while configuring or running a game.
#[derive(Debug)]
pub enum GameError {
    /// Invalid configuration (dimensions, palette, tuning values).
    Config { reason: String },
    /// Reading a configuration file failed.
    ConfigIo(std::io::Error),
    /// JSON (de)serialization failed: a malformed config file or a snapshot.
    Json(serde_json::Error),
    /// A key that was never inserted into the grid. Indicates a transform bug.
    NoSuchSlot { key: SlotKey },
    /// The collided slot has no empty neighbor to land in.
    NoLandingSlot { key: SlotKey },
}

impl GameError {
    pub fn config(reason: impl Into<String>) -> Self {
        GameError::Config {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config { reason } => write!(f, "invalid configuration: {reason}"),
            GameError::ConfigIo(e) => write!(f, "failed to read configuration: {e}"),
            GameError::Json(e) => write!(f, "JSON error: {e}"),
            GameError::NoSuchSlot { key } => write!(f, "no such slot in grid: {key}"),
            GameError::NoLandingSlot { key } => {
                write!(f, "no empty slot to land next to {key}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigIo(e) => Some(e),
            GameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::ConfigIo(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}
