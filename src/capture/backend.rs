use tokio::sync::mpsc;

use crate::error::CaptureError;

/// One recorded piece of media, ordered by capture time.
#[derive(Debug, Clone)]
pub struct MediaChunk {
    /// Raw encoded media bytes.
    pub data: Vec<u8>,
    /// Milliseconds since recording started.
    pub timestamp_ms: u64,
}

/// Capture hardware contract.
///
/// The engine depends only on these operations, not on any device-specific
/// API. Implementations map platform failures (permission denied, device
/// busy, disconnect) onto `CaptureError`; the controller treats all of them
/// as "fall back to text", never as fatal.
#[async_trait::async_trait]
pub trait CaptureBackend: Send {
    /// Acquire the camera and microphone. The hardware-in-use indicator is
    /// on from a successful `open` until `release`.
    async fn open(&mut self) -> Result<(), CaptureError>;

    /// Begin recording on the open stream.
    ///
    /// Returns a channel receiver that delivers chunks in capture order. The
    /// sender side is dropped when the stream ends or the backend is
    /// released.
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaChunk>, CaptureError>;

    /// Stop all underlying tracks and free the hardware. Idempotent; safe to
    /// call at any point in the lifecycle, including after a failure.
    fn release(&mut self);

    /// Whether the hardware-in-use indicator is currently on.
    fn is_live(&self) -> bool;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
