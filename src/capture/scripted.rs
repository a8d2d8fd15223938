use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::backend::{CaptureBackend, MediaChunk};
use crate::error::CaptureError;

/// Script describing what a `ScriptedBackend` produces.
#[derive(Debug, Clone)]
pub struct CaptureScript {
    /// Chunk payloads delivered in order once recording starts.
    pub chunks: Vec<Vec<u8>>,
    /// Spacing between synthetic chunk timestamps.
    pub chunk_interval_ms: u64,
    /// Fail `open` with this error instead of acquiring.
    pub fail_open: Option<CaptureError>,
    /// Deliver at most this many chunks, then end the stream early
    /// (simulates a device dropping out mid-recording).
    pub deliver_at_most: Option<usize>,
}

impl Default for CaptureScript {
    fn default() -> Self {
        Self {
            chunks: Vec::new(),
            chunk_interval_ms: 100,
            fail_open: None,
            deliver_at_most: None,
        }
    }
}

/// Capture backend that replays a predefined script.
///
/// Used for tests, the demo driver, and batch processing; no hardware is
/// touched. Honors the same lifecycle contract as a real backend, including
/// the in-use indicator.
pub struct ScriptedBackend {
    script: CaptureScript,
    live: bool,
    feeder: Option<JoinHandle<()>>,
}

impl ScriptedBackend {
    pub fn new(script: CaptureScript) -> Self {
        Self {
            script,
            live: false,
            feeder: None,
        }
    }

    /// Backend that records the given chunk payloads.
    pub fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(CaptureScript {
            chunks,
            ..CaptureScript::default()
        })
    }

    /// Backend whose `open` fails with a permission denial.
    pub fn denied() -> Self {
        Self::new(CaptureScript {
            fail_open: Some(CaptureError::PermissionDenied),
            ..CaptureScript::default()
        })
    }

    /// Backend that acquires fine but produces no chunks at all.
    pub fn silent() -> Self {
        Self::new(CaptureScript::default())
    }
}

#[async_trait::async_trait]
impl CaptureBackend for ScriptedBackend {
    async fn open(&mut self) -> Result<(), CaptureError> {
        if let Some(err) = self.script.fail_open.clone() {
            warn!("scripted backend refusing to open: {}", err);
            return Err(err);
        }
        self.live = true;
        info!("scripted backend opened ({} chunks queued)", self.script.chunks.len());
        Ok(())
    }

    async fn start(&mut self) -> Result<mpsc::Receiver<MediaChunk>, CaptureError> {
        if !self.live {
            return Err(CaptureError::Unavailable("stream is not open".to_string()));
        }

        let (tx, rx) = mpsc::channel(64);

        let mut chunks = self.script.chunks.clone();
        if let Some(limit) = self.script.deliver_at_most {
            chunks.truncate(limit);
        }
        let interval_ms = self.script.chunk_interval_ms;

        self.feeder = Some(tokio::spawn(async move {
            for (i, data) in chunks.into_iter().enumerate() {
                let chunk = MediaChunk {
                    data,
                    timestamp_ms: i as u64 * interval_ms,
                };
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
            // Sender drops here, ending the stream.
        }));

        Ok(rx)
    }

    fn release(&mut self) {
        if let Some(feeder) = self.feeder.take() {
            feeder.abort();
        }
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
