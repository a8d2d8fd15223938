//! Session orchestration
//!
//! This module provides the `SessionController` state machine that drives a
//! guided session:
//! - Template selection and the optional journey preparation briefing
//! - Prompt/record/save cycles with text and video modalities
//! - Phase-completion evaluation and advisory phase transitions
//! - Guaranteed capture teardown on every exit path

mod controller;
mod state;

pub use controller::{JourneyAdvance, SaveOutcome, SessionController};
pub use state::{SessionState, Step, Template};
