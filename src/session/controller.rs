use std::sync::Arc;

use tracing::{info, warn};

use super::state::{SessionState, Step, Template};
use crate::capture::CaptureDevice;
use crate::error::{CaptureError, SessionError};
use crate::progress::{Phase, PhaseProgress, ProgressTracker};
use crate::prompts::{PromptCategory, PromptSelector};
use crate::store::{
    Artifact, ArtifactDraft, ArtifactKind, ArtifactStore, MediaPayload, MediaType,
    PLACEHOLDER_CONTENT,
};

/// Result of a successful save.
#[derive(Debug)]
pub struct SaveOutcome {
    pub artifact: Artifact,
    /// Journey sessions only: progress for the phase just logged to.
    pub progress: Option<PhaseProgress>,
    /// The phase threshold is met; `advance_phase` is now available.
    pub transition_available: bool,
}

/// Result of advancing past a completed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyAdvance {
    Advanced(Phase),
    /// The terminal phase was complete; the session has ended.
    Completed,
}

/// The session state machine.
///
/// Drives one user session through template selection, prompt/record/save
/// cycles, and phase transitions. All collaborators are injected, so tests
/// substitute scripted capture backends and in-memory stores.
///
/// Lifecycle: `choose_template`, then (journeys only) `begin_journey`, then
/// repeated cycles of shuffle/answer/save, with `next_prompt` looping within
/// a phase and `advance_phase` moving past a completed one. `exit` is legal
/// at any point and always releases the capture hardware.
pub struct SessionController {
    selector: PromptSelector,
    capture: CaptureDevice,
    store: Arc<dyn ArtifactStore>,
    tracker: ProgressTracker,
    state: SessionState,
}

impl SessionController {
    pub fn new(
        selector: PromptSelector,
        capture: CaptureDevice,
        store: Arc<dyn ArtifactStore>,
        tracker: ProgressTracker,
    ) -> Self {
        Self {
            selector,
            capture,
            store,
            tracker,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Seconds the current recording has been live.
    pub fn recording_elapsed_secs(&self) -> u64 {
        self.capture.elapsed_secs()
    }

    /// Whether the capture hardware indicator is on.
    pub fn capture_is_live(&self) -> bool {
        self.capture.is_live()
    }

    /// Pick the session template. Journeys route through the preparation
    /// briefing; single-category templates go straight to the first prompt.
    pub fn choose_template(&mut self, template: Template) -> Result<(), SessionError> {
        self.expect_step(Step::Idle, "choose_template")?;

        self.state.template = Some(template);
        match template {
            Template::Journey => {
                self.state.phase = Some(Phase::Preparation);
                self.state.step = Step::Preparation;
            }
            Template::DateNight | Template::DeepDive => {
                self.draw_prompt();
                self.state.step = Step::PromptShown;
            }
        }

        info!("template chosen: {}", template.slug());
        Ok(())
    }

    /// Leave the journey briefing and enter the phase loop.
    pub fn begin_journey(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::Preparation, "begin_journey")?;
        self.draw_prompt();
        self.state.step = Step::PromptShown;
        Ok(())
    }

    /// Draw a different prompt for the same category.
    pub fn shuffle_prompt(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::PromptShown, "shuffle_prompt")?;
        self.draw_prompt();
        Ok(())
    }

    /// Switch to the video modality and acquire the capture hardware.
    ///
    /// On capture failure the session stays on the current prompt with the
    /// text modality available; the error is returned for display only.
    pub async fn answer_with_video(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::PromptShown, "answer_with_video")?;

        match self.capture.begin().await {
            Ok(()) => {
                self.state.step = Step::Recording;
                Ok(())
            }
            Err(e) => {
                self.state.capture_failed = true;
                warn!("capture unavailable, text fallback offered: {}", e);
                Err(e.into())
            }
        }
    }

    /// Stop the active recording and move to review.
    ///
    /// An empty recording is treated as if the user had chosen the text
    /// modality. A device failure mid-recording also falls back to text;
    /// the hardware is released either way.
    pub async fn stop_recording(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::Recording, "stop_recording")?;

        match self.capture.stop().await {
            Ok(bytes) => {
                self.state.media = Some(MediaPayload {
                    media_type: MediaType::Video,
                    bytes,
                });
                self.state.step = Step::Reviewing;
                Ok(())
            }
            Err(CaptureError::Empty) => {
                warn!("nothing was recorded; continuing with a text response");
                self.state.media = None;
                self.state.step = Step::Reviewing;
                Ok(())
            }
            Err(e) => {
                self.state.media = None;
                self.state.capture_failed = true;
                self.state.step = Step::Reviewing;
                Err(e.into())
            }
        }
    }

    /// Answer the current prompt with text only.
    pub fn answer_with_text(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::PromptShown, "answer_with_text")?;
        self.state.media = None;
        self.state.step = Step::Reviewing;
        Ok(())
    }

    /// Set the text annotation for the response under review.
    pub fn set_note(&mut self, note: impl Into<String>) -> Result<(), SessionError> {
        self.expect_step(Step::Reviewing, "set_note")?;
        self.state.note = note.into();
        Ok(())
    }

    /// Submit the accumulated response to the store.
    ///
    /// On persistence failure the session stays in review with the response
    /// buffer intact for a manual retry; nothing is retried automatically.
    /// On success the phase counter is incremented and, if the phase
    /// threshold is now met, a transition is offered.
    pub async fn save(&mut self) -> Result<SaveOutcome, SessionError> {
        self.expect_step(Step::Reviewing, "save")?;

        let note = self.state.note.trim();
        if note.is_empty() && self.state.media.is_none() {
            return Err(SessionError::EmptySubmission);
        }
        let content = if note.is_empty() {
            PLACEHOLDER_CONTENT.to_string()
        } else {
            note.to_string()
        };

        let draft = ArtifactDraft {
            kind: ArtifactKind::Peak,
            content,
            prompt_text: self.state.current_prompt.as_ref().map(|p| p.text.clone()),
            template: self.state.template.map(|t| t.slug().to_string()),
            media: self.state.media.clone(),
        };

        let artifact = match self.store.submit(draft).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("artifact submission failed, response kept for retry: {}", e);
                return Err(e.into());
            }
        };

        self.state.note.clear();
        self.state.media = None;

        let mut progress = None;
        let mut transition_available = false;
        if self.state.template == Some(Template::Journey) {
            if let Some(phase) = self.state.phase {
                self.state.counters.bump(phase);
                let p = self.tracker.progress(phase, &self.state.counters);
                info!(
                    "phase {} progress: {}/{}",
                    phase.name(),
                    p.count,
                    p.goal
                );
                transition_available = p.is_complete();
                progress = Some(p);
            }
        }

        self.state.step = if transition_available {
            Step::PhaseTransition
        } else {
            Step::Submitted
        };

        info!("artifact saved: {}", artifact.id);
        Ok(SaveOutcome {
            artifact,
            progress,
            transition_available,
        })
    }

    /// Loop back to a fresh prompt in the current phase. Available after a
    /// save whether or not a transition is on offer: completion never blocks
    /// further logging.
    pub fn next_prompt(&mut self) -> Result<(), SessionError> {
        match self.state.step {
            Step::Submitted | Step::PhaseTransition => {}
            _ => {
                return Err(SessionError::InvalidAction {
                    action: "next_prompt",
                    state: self.state.step.name(),
                })
            }
        }
        self.draw_prompt();
        self.state.step = Step::PromptShown;
        Ok(())
    }

    /// Advance past the completed phase, or end the journey if the terminal
    /// phase is complete.
    pub fn advance_phase(&mut self) -> Result<JourneyAdvance, SessionError> {
        self.expect_step(Step::PhaseTransition, "advance_phase")?;

        let phase = match self.state.phase {
            Some(phase) => phase,
            None => {
                return Err(SessionError::InvalidAction {
                    action: "advance_phase",
                    state: self.state.step.name(),
                })
            }
        };

        match phase.next() {
            Some(next) => {
                info!("advancing journey: {} -> {}", phase.name(), next.name());
                self.state.phase = Some(next);
                self.draw_prompt();
                self.state.step = Step::PromptShown;
                Ok(JourneyAdvance::Advanced(next))
            }
            None => {
                info!("journey complete");
                self.capture.release();
                self.state.step = Step::Exited;
                Ok(JourneyAdvance::Completed)
            }
        }
    }

    /// End the session from any state. Releases the capture hardware and
    /// discards any response buffer; this is the only path that drops
    /// in-progress input.
    pub fn exit(&mut self) {
        self.capture.release();
        self.state.note.clear();
        self.state.media = None;
        self.state.step = Step::Exited;
        info!("session exited");
    }

    fn draw_prompt(&mut self) {
        let category = self.current_category();
        let exclude = self.state.current_prompt.as_ref().map(|p| p.id.clone());
        let prompt = self.selector.draw(category, exclude.as_deref());
        info!("prompt drawn: {}", prompt.id);
        self.state.current_prompt = Some(prompt);
        self.state.capture_failed = false;
    }

    fn current_category(&self) -> PromptCategory {
        match (self.state.template, self.state.phase) {
            (Some(Template::DeepDive), _) => PromptCategory::DeepDive,
            (Some(Template::Journey), Some(phase)) => phase.category(),
            _ => PromptCategory::Peak,
        }
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), SessionError> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidAction {
                action,
                state: self.state.step.name(),
            })
        }
    }
}
