//! Camera/microphone capture lifecycle
//!
//! This module manages the audio-video recording lifecycle:
//! - The `CaptureBackend` hardware contract (open, record, release)
//! - `ScriptedBackend` for tests, demos, and batch processing
//! - `CaptureDevice`, the managed acquire/record/finalize/release wrapper
//!   that guarantees release on every exit path

mod backend;
mod device;
mod scripted;

pub use backend::{CaptureBackend, MediaChunk};
pub use device::CaptureDevice;
pub use scripted::{CaptureScript, ScriptedBackend};
