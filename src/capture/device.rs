use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::backend::{CaptureBackend, MediaChunk};
use crate::error::CaptureError;

/// Managed capture lifecycle: acquire, record, finalize, guaranteed release.
///
/// Owns the hardware backend and the transient recording state. At most one
/// recording may be active at a time; `begin` refuses a second acquisition
/// while one is live. Every exit path (`stop`, `release`, drop) stops the
/// underlying tracks, so the hardware-in-use indicator is never left on
/// after the recording UI is dismissed.
pub struct CaptureDevice {
    backend: Box<dyn CaptureBackend>,
    tick: Duration,
    active: Option<ActiveCapture>,
}

/// Transient state owned by the device while a recording is live.
struct ActiveCapture {
    chunks: Arc<Mutex<Vec<MediaChunk>>>,
    recording: Arc<AtomicBool>,
    elapsed_secs: Arc<AtomicU64>,
    collector: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl CaptureDevice {
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self::with_tick(backend, Duration::from_secs(1))
    }

    /// Device with a custom elapsed-time tick interval.
    pub fn with_tick(backend: Box<dyn CaptureBackend>, tick: Duration) -> Self {
        Self {
            backend,
            tick,
            active: None,
        }
    }

    /// Acquire the hardware and start recording.
    ///
    /// Spawns a collector task that appends incoming chunks in capture order
    /// and a ticker that advances the elapsed-seconds counter while the
    /// recording is live. On failure the backend is released before the
    /// error is returned.
    pub async fn begin(&mut self) -> Result<(), CaptureError> {
        if self.active.is_some() {
            return Err(CaptureError::Unavailable(
                "a capture is already active".to_string(),
            ));
        }

        self.backend.open().await?;

        let mut chunk_rx = match self.backend.start().await {
            Ok(rx) => rx,
            Err(e) => {
                self.backend.release();
                return Err(e);
            }
        };

        info!("recording started on backend: {}", self.backend.name());

        let chunks = Arc::new(Mutex::new(Vec::new()));
        let recording = Arc::new(AtomicBool::new(true));
        let elapsed_secs = Arc::new(AtomicU64::new(0));

        let collector = {
            let chunks = Arc::clone(&chunks);
            let recording = Arc::clone(&recording);
            tokio::spawn(async move {
                while let Some(chunk) = chunk_rx.recv().await {
                    if !recording.load(Ordering::SeqCst) {
                        break;
                    }
                    chunks.lock().await.push(chunk);
                }
            })
        };

        let ticker = {
            let recording = Arc::clone(&recording);
            let elapsed_secs = Arc::clone(&elapsed_secs);
            let tick = self.tick;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick);
                // First tick completes immediately; consume it.
                interval.tick().await;
                while recording.load(Ordering::SeqCst) {
                    interval.tick().await;
                    if !recording.load(Ordering::SeqCst) {
                        break;
                    }
                    elapsed_secs.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        self.active = Some(ActiveCapture {
            chunks,
            recording,
            elapsed_secs,
            collector,
            ticker,
        });

        Ok(())
    }

    /// Stop recording and finalize the chunk sequence.
    ///
    /// Releases the hardware, waits for the collector to drain, and returns
    /// the concatenation of all chunks in capture order. Zero captured
    /// chunks yields `CaptureError::Empty`; the hardware is released in that
    /// case too.
    pub async fn stop(&mut self) -> Result<Vec<u8>, CaptureError> {
        let active = self
            .active
            .take()
            .ok_or_else(|| CaptureError::Unavailable("no active capture".to_string()))?;

        active.recording.store(false, Ordering::SeqCst);
        self.backend.release();
        active.ticker.abort();

        // Drain completes once the backend drops its sender.
        if let Err(e) = active.collector.await {
            if !e.is_cancelled() {
                error!("chunk collector task panicked: {}", e);
            }
        }

        let chunks = active.chunks.lock().await;
        if chunks.is_empty() {
            info!("recording stopped with no captured data");
            return Err(CaptureError::Empty);
        }

        let bytes: Vec<u8> = chunks
            .iter()
            .flat_map(|c| c.data.iter().copied())
            .collect();

        info!(
            "recording finalized: {} chunks, {} bytes, {}s elapsed",
            chunks.len(),
            bytes.len(),
            active.elapsed_secs.load(Ordering::SeqCst)
        );

        Ok(bytes)
    }

    /// Tear down any active recording and free the hardware.
    ///
    /// Idempotent; safe to call at any point, on any exit path. Captured
    /// chunks are discarded.
    pub fn release(&mut self) {
        if let Some(active) = self.active.take() {
            active.recording.store(false, Ordering::SeqCst);
            active.collector.abort();
            active.ticker.abort();
            info!("active recording discarded");
        }
        self.backend.release();
    }

    /// Seconds the current recording has been live. Zero when idle; resets
    /// for each new recording.
    pub fn elapsed_secs(&self) -> u64 {
        self.active
            .as_ref()
            .map(|a| a.elapsed_secs.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Whether the hardware-in-use indicator is on.
    pub fn is_live(&self) -> bool {
        self.backend.is_live()
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for CaptureDevice {
    fn drop(&mut self) {
        self.release();
    }
}
