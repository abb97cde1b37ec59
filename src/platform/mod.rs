//! Platform abstraction layer
//!
//! Handles the collaborators around the simulation:
//! - Input events (pointer, keyboard, scripted)
//! - Score/status notifications
//! - Fixed-step scheduling of simulation ticks

pub mod input;
pub mod session;

pub use input::{InputEvent, InputSource, ScriptedInput};
pub use session::{LogScoreSink, ScoreSink, Session};
