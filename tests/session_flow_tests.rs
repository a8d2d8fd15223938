// End-to-end tests for the session state machine
//
// These drive full prompt/record/save cycles with a scripted capture
// backend and an in-memory store, covering the text and video modalities,
// capture fallback, persistence failure, and phase transitions.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use tandem_sessions::store::PLACEHOLDER_CONTENT;
use tandem_sessions::{
    Artifact, ArtifactDraft, ArtifactKind, ArtifactStore, CaptureDevice, CaptureError,
    JourneyAdvance, MediaType, PersistenceError, Phase, PhaseThresholds, ProgressTracker,
    PromptCatalog, PromptSelector, ScriptedBackend, SessionController, SessionError, Step,
    Template,
};

/// In-memory store that can be armed to fail the next N submissions.
struct TestStore {
    fail_remaining: AtomicU32,
    saved: Mutex<Vec<Artifact>>,
}

impl TestStore {
    fn new() -> Self {
        Self::failing(0)
    }

    fn failing(n: u32) -> Self {
        Self {
            fail_remaining: AtomicU32::new(n),
            saved: Mutex::new(Vec::new()),
        }
    }

    async fn artifacts(&self) -> Vec<Artifact> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl ArtifactStore for TestStore {
    async fn submit(&self, draft: ArtifactDraft) -> Result<Artifact, PersistenceError> {
        if self.fail_remaining.load(Ordering::SeqCst) > 0 {
            self.fail_remaining.fetch_sub(1, Ordering::SeqCst);
            return Err(PersistenceError::new("vault unreachable"));
        }

        let artifact = Artifact {
            id: uuid::Uuid::new_v4().to_string(),
            kind: draft.kind,
            content: draft.content.clone(),
            prompt_text: draft.prompt_text.clone(),
            timestamp: Utc::now(),
            media_type: draft.media_type(),
            media_url: draft.media.as_ref().map(|_| "memory://media".to_string()),
            template: draft.template.clone(),
        };

        self.saved.lock().await.push(artifact.clone());
        Ok(artifact)
    }
}

fn controller(
    backend: ScriptedBackend,
    store: Arc<TestStore>,
    thresholds: PhaseThresholds,
) -> SessionController {
    let selector = PromptSelector::with_seed(PromptCatalog::builtin(), 42);
    let capture = CaptureDevice::with_tick(Box::new(backend), Duration::from_millis(50));
    SessionController::new(selector, capture, store, ProgressTracker::new(thresholds))
}

#[tokio::test]
async fn test_date_night_text_response_persists() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    let start = session.state().started_at;

    session.choose_template(Template::DateNight).unwrap();
    assert_eq!(session.state().step, Step::PromptShown);
    assert!(session.state().current_prompt.is_some());

    session.answer_with_text().unwrap();
    session.set_note("I love your laugh").unwrap();

    let outcome = session.save().await.unwrap();
    assert_eq!(outcome.artifact.kind, ArtifactKind::Peak);
    assert_eq!(outcome.artifact.content, "I love your laugh");
    assert_eq!(outcome.artifact.media_type, MediaType::Text);
    assert_eq!(outcome.artifact.template.as_deref(), Some("date_night"));
    assert!(outcome.artifact.timestamp > start);
    assert!(outcome.progress.is_none());
    assert!(!outcome.transition_available);

    assert_eq!(session.state().step, Step::Submitted);
    session.next_prompt().unwrap();
    assert_eq!(session.state().step, Step::PromptShown);
}

#[tokio::test]
async fn test_video_response_uses_placeholder_content() {
    let store = Arc::new(TestStore::new());
    let backend = ScriptedBackend::with_chunks(vec![vec![1, 2], vec![3]]);
    let mut session = controller(backend, store.clone(), PhaseThresholds::default());

    session.choose_template(Template::DateNight).unwrap();
    session.answer_with_video().await.unwrap();
    assert_eq!(session.state().step, Step::Recording);
    assert!(session.capture_is_live());

    session.stop_recording().await.unwrap();
    assert_eq!(session.state().step, Step::Reviewing);
    assert!(!session.capture_is_live(), "hardware released on stop");

    // No note: media-only responses get the placeholder content.
    let outcome = session.save().await.unwrap();
    assert_eq!(outcome.artifact.content, PLACEHOLDER_CONTENT);
    assert_eq!(outcome.artifact.media_type, MediaType::Video);
    assert!(outcome.artifact.media_url.is_some());
}

#[tokio::test]
async fn test_empty_recording_degrades_to_text_response() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::DeepDive).unwrap();
    session.answer_with_video().await.unwrap();
    session.stop_recording().await.unwrap();

    assert_eq!(session.state().step, Step::Reviewing);
    assert!(session.state().media.is_none(), "no empty media is kept");

    session.set_note("wrote it down instead").unwrap();
    let outcome = session.save().await.unwrap();
    assert_eq!(outcome.artifact.media_type, MediaType::Text);
    assert_eq!(outcome.artifact.template.as_deref(), Some("deep_dive"));
}

#[tokio::test]
async fn test_capture_denial_falls_back_to_text() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::denied(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::DateNight).unwrap();

    let err = session.answer_with_video().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Capture(CaptureError::PermissionDenied)
    ));

    // Still on the prompt, with the failure flagged and text available.
    assert_eq!(session.state().step, Step::PromptShown);
    assert!(session.state().capture_failed);
    assert!(!session.capture_is_live());

    session.answer_with_text().unwrap();
    session.set_note("typing instead").unwrap();
    let outcome = session.save().await.unwrap();
    assert_eq!(outcome.artifact.media_type, MediaType::Text);
}

#[tokio::test]
async fn test_persistence_failure_keeps_response_for_retry() {
    let store = Arc::new(TestStore::failing(1));
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::DateNight).unwrap();
    session.answer_with_text().unwrap();
    session.set_note("precious words").unwrap();

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, SessionError::Persistence(_)));
    assert_eq!(session.state().step, Step::Reviewing);
    assert_eq!(session.state().note, "precious words");
    assert!(store.artifacts().await.is_empty());

    // Manual retry with the intact buffer succeeds exactly once.
    let outcome = session.save().await.unwrap();
    assert_eq!(outcome.artifact.content, "precious words");
    assert_eq!(store.artifacts().await.len(), 1);
    assert!(session.state().note.is_empty());
}

#[tokio::test]
async fn test_journey_phase_threshold_offers_transition() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::Journey).unwrap();
    assert_eq!(session.state().step, Step::Preparation);

    session.begin_journey().unwrap();
    assert_eq!(session.state().phase, Some(Phase::Preparation));

    session.answer_with_text().unwrap();
    session.set_note("first entry").unwrap();
    let first = session.save().await.unwrap();
    let progress = first.progress.unwrap();
    assert_eq!((progress.count, progress.goal), (1, 2));
    assert!(!first.transition_available);
    assert_eq!(session.state().step, Step::Submitted);

    session.next_prompt().unwrap();
    session.answer_with_text().unwrap();
    session.set_note("second entry").unwrap();
    let second = session.save().await.unwrap();
    assert!(second.progress.unwrap().is_complete());
    assert!(second.transition_available);
    assert_eq!(session.state().step, Step::PhaseTransition);

    // Staying is always allowed; the phase does not change.
    session.next_prompt().unwrap();
    assert_eq!(session.state().step, Step::PromptShown);
    assert_eq!(session.state().phase, Some(Phase::Preparation));
}

#[tokio::test]
async fn test_journey_runs_to_completion() {
    let store = Arc::new(TestStore::new());
    let thresholds = PhaseThresholds {
        preparation: 1,
        peak: 1,
        integration: 1,
    };
    let mut session = controller(ScriptedBackend::silent(), store.clone(), thresholds);

    session.choose_template(Template::Journey).unwrap();
    session.begin_journey().unwrap();

    for expected in [
        JourneyAdvance::Advanced(Phase::Peak),
        JourneyAdvance::Advanced(Phase::Integration),
        JourneyAdvance::Completed,
    ] {
        session.answer_with_text().unwrap();
        session.set_note("entry").unwrap();
        let outcome = session.save().await.unwrap();
        assert!(outcome.transition_available);

        let advance = session.advance_phase().unwrap();
        assert_eq!(advance, expected);
    }

    assert_eq!(session.state().step, Step::Exited);
    assert!(!session.capture_is_live());
    assert_eq!(store.artifacts().await.len(), 3);
}

#[tokio::test]
async fn test_exit_during_recording_releases_hardware() {
    let store = Arc::new(TestStore::new());
    let backend = ScriptedBackend::with_chunks(vec![vec![1]]);
    let mut session = controller(backend, store.clone(), PhaseThresholds::default());

    session.choose_template(Template::DateNight).unwrap();
    session.answer_with_video().await.unwrap();
    assert!(session.capture_is_live());

    session.exit();

    assert_eq!(session.state().step, Step::Exited);
    assert!(!session.capture_is_live(), "exit must release the hardware");
    assert!(session.state().media.is_none());
    assert!(store.artifacts().await.is_empty());
}

#[tokio::test]
async fn test_shuffle_rotates_visibly() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::DateNight).unwrap();

    let mut previous = session.state().current_prompt.clone().unwrap();
    for _ in 0..50 {
        session.shuffle_prompt().unwrap();
        let current = session.state().current_prompt.clone().unwrap();
        assert_ne!(current.id, previous.id, "shuffle repeated a prompt");
        previous = current;
    }
}

#[tokio::test]
async fn test_empty_submission_is_rejected() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    session.choose_template(Template::DateNight).unwrap();
    session.answer_with_text().unwrap();

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, SessionError::EmptySubmission));
    assert_eq!(session.state().step, Step::Reviewing);
    assert!(store.artifacts().await.is_empty());
}

#[tokio::test]
async fn test_actions_outside_their_state_are_rejected() {
    let store = Arc::new(TestStore::new());
    let mut session = controller(
        ScriptedBackend::silent(),
        store.clone(),
        PhaseThresholds::default(),
    );

    // Nothing but choose_template is legal from idle.
    assert!(matches!(
        session.answer_with_text(),
        Err(SessionError::InvalidAction { .. })
    ));
    assert!(matches!(
        session.save().await,
        Err(SessionError::InvalidAction { .. })
    ));

    session.choose_template(Template::DateNight).unwrap();

    // Stopping a recording that never started is rejected.
    assert!(matches!(
        session.stop_recording().await,
        Err(SessionError::InvalidAction { .. })
    ));

    // Phase transitions only exist for journeys past their threshold.
    assert!(matches!(
        session.advance_phase(),
        Err(SessionError::InvalidAction { .. })
    ));
}
