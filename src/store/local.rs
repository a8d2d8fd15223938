use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use super::artifact::{Artifact, ArtifactDraft};
use super::ArtifactStore;
use crate::error::PersistenceError;

/// Disk-backed artifact store.
///
/// Writes media payloads under a spool directory and keeps artifact metadata
/// in memory. Stands in for the remote store in the demo driver and in
/// tests; it assigns ids, media URLs, and timestamps the same way the real
/// collaborator would, at submit time.
pub struct LocalArtifactStore {
    media_dir: PathBuf,
    saved: Mutex<Vec<Artifact>>,
}

impl LocalArtifactStore {
    pub fn new(media_dir: impl AsRef<Path>) -> Result<Self> {
        let media_dir = media_dir.as_ref().to_path_buf();
        fs::create_dir_all(&media_dir).context("Failed to create media directory")?;

        info!("local artifact store at {}", media_dir.display());

        Ok(Self {
            media_dir,
            saved: Mutex::new(Vec::new()),
        })
    }

    /// All artifacts persisted so far, in submission order.
    pub async fn artifacts(&self) -> Vec<Artifact> {
        self.saved.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn submit(&self, draft: ArtifactDraft) -> Result<Artifact, PersistenceError> {
        let id = uuid::Uuid::new_v4().to_string();
        let media_type = draft.media_type();

        let media_url = match &draft.media {
            Some(payload) => {
                let file = self
                    .media_dir
                    .join(format!("{id}.{}", payload.media_type.extension()));
                fs::write(&file, &payload.bytes).map_err(|e| {
                    PersistenceError::new(format!(
                        "failed to write media file {}: {e}",
                        file.display()
                    ))
                })?;
                Some(file.display().to_string())
            }
            None => None,
        };

        let artifact = Artifact {
            id,
            kind: draft.kind,
            content: draft.content,
            prompt_text: draft.prompt_text,
            timestamp: Utc::now(),
            media_type,
            media_url,
            template: draft.template,
        };

        info!(
            "artifact persisted: {} ({:?}, {:?})",
            artifact.id, artifact.kind, artifact.media_type
        );

        self.saved.lock().await.push(artifact.clone());

        Ok(artifact)
    }
}
