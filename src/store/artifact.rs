use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content stored when a response carries media but no text note.
pub const PLACEHOLDER_CONTENT: &str = "Response captured";

/// What kind of moment an artifact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Peak,
    Daily,
    CrisisRepair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Text,
    Audio,
    Video,
}

impl MediaType {
    pub fn extension(self) -> &'static str {
        match self {
            MediaType::Text => "txt",
            MediaType::Audio => "ogg",
            MediaType::Video => "webm",
        }
    }
}

/// Recorded media attached to a draft, kept separate from the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

/// A completed response on its way to the store.
#[derive(Debug, Clone)]
pub struct ArtifactDraft {
    pub kind: ArtifactKind,
    /// Always populated; the placeholder string when media-only.
    pub content: String,
    pub prompt_text: Option<String>,
    pub template: Option<String>,
    pub media: Option<MediaPayload>,
}

impl ArtifactDraft {
    /// Text-only draft.
    pub fn text(kind: ArtifactKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            prompt_text: None,
            template: None,
            media: None,
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media
            .as_ref()
            .map(|m| m.media_type)
            .unwrap_or(MediaType::Text)
    }
}

/// A persisted user response.
///
/// The id, media URL, and timestamp are assigned by the store at persistence
/// time; display ordering follows these timestamps, not capture order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub kind: ArtifactKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}
