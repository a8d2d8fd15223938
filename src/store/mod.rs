//! Artifact persistence boundary
//!
//! The engine hands completed responses to an `ArtifactStore` and treats the
//! result as authoritative: the store assigns the durable id, the media URL,
//! and the timestamp. Submission failures are surfaced verbatim and never
//! retried automatically.

mod artifact;
mod local;

pub use artifact::{Artifact, ArtifactDraft, ArtifactKind, MediaPayload, MediaType, PLACEHOLDER_CONTENT};
pub use local::LocalArtifactStore;

use crate::error::PersistenceError;

/// Persists a completed artifact and returns its durable form.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn submit(&self, draft: ArtifactDraft) -> Result<Artifact, PersistenceError>;
}
