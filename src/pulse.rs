use std::sync::Arc;

use tracing::info;

use crate::error::SessionError;
use crate::prompts::{Prompt, PromptCatalog};
use crate::store::{Artifact, ArtifactDraft, ArtifactKind, ArtifactStore};

/// Result of logging a daily pulse.
#[derive(Debug)]
pub struct PulseOutcome {
    pub artifact: Artifact,
    /// New consecutive-day streak, for the profile collaborator to persist.
    pub streak: u32,
}

/// Daily check-in: one fixed prompt, text only, one entry per sitting.
///
/// The streak counter is owned by the external profile collaborator; the
/// check-in computes the new value but does not store it.
pub struct PulseCheckIn {
    store: Arc<dyn ArtifactStore>,
    prompt: Prompt,
}

impl PulseCheckIn {
    pub fn new(catalog: &PromptCatalog, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            prompt: catalog.daily_prompt(),
        }
    }

    /// Today's check-in prompt.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Persist a pulse entry. Empty entries are rejected before submission.
    pub async fn log(&self, entry: &str, current_streak: u32) -> Result<PulseOutcome, SessionError> {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(SessionError::EmptySubmission);
        }

        let mut draft = ArtifactDraft::text(ArtifactKind::Daily, entry);
        draft.prompt_text = Some(self.prompt.text.clone());

        let artifact = self.store.submit(draft).await?;
        let streak = current_streak + 1;

        info!("pulse logged: {} ({} day streak)", artifact.id, streak);
        Ok(PulseOutcome { artifact, streak })
    }
}
