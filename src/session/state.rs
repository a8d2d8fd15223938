use chrono::{DateTime, Utc};

use crate::progress::{Phase, PhaseCounters};
use crate::prompts::Prompt;
use crate::store::MediaPayload;

/// The session type chosen at the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Single-category connection session.
    DateNight,
    /// Single-category vulnerability session.
    DeepDive,
    /// Multi-phase guided journey (preparation → peak → integration).
    Journey,
}

impl Template {
    /// Identifier stored on artifacts produced by this template.
    pub fn slug(self) -> &'static str {
        match self {
            Template::DateNight => "date_night",
            Template::DeepDive => "deep_dive",
            Template::Journey => "journey",
        }
    }
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No template selected yet.
    Idle,
    /// Journey briefing before the phase loop.
    Preparation,
    /// A prompt is displayed; the user picks a response modality.
    PromptShown,
    /// The capture device is live.
    Recording,
    /// The user may annotate and confirm with save.
    Reviewing,
    /// The response was persisted; loop or exit.
    Submitted,
    /// The phase threshold is met; advancing is offered but staying is
    /// always allowed.
    PhaseTransition,
    /// The session is over; all resources released.
    Exited,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Step::Idle => "idle",
            Step::Preparation => "preparation",
            Step::PromptShown => "prompt_shown",
            Step::Recording => "recording",
            Step::Reviewing => "reviewing",
            Step::Submitted => "submitted",
            Step::PhaseTransition => "phase_transition",
            Step::Exited => "exited",
        }
    }
}

/// Ephemeral state owned by the controller, destroyed when the session
/// exits.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub step: Step,
    pub template: Option<Template>,
    /// Current journey phase; `None` for single-category templates.
    pub phase: Option<Phase>,
    /// Per-phase completed-artifact counters for this journey.
    pub counters: PhaseCounters,
    pub current_prompt: Option<Prompt>,
    /// Text annotation not yet submitted.
    pub note: String,
    /// Finalized recording not yet submitted.
    pub media: Option<MediaPayload>,
    /// Set when hardware acquisition failed for the current prompt; the
    /// text modality stays available.
    pub capture_failed: bool,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            step: Step::Idle,
            template: None,
            phase: None,
            counters: PhaseCounters::default(),
            current_prompt: None,
            note: String::new(),
            media: None,
            capture_failed: false,
            started_at: Utc::now(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
