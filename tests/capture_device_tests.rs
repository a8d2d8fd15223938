// Integration tests for the managed capture lifecycle
//
// These verify chunk ordering, the empty-recording error, and the
// resource-release invariant: no exit path may leave the hardware-in-use
// indicator on.

use std::time::Duration;

use tandem_sessions::{CaptureDevice, CaptureError, CaptureScript, ScriptedBackend};

#[tokio::test]
async fn test_stop_concatenates_chunks_in_capture_order() {
    let backend = ScriptedBackend::with_chunks(vec![vec![1, 2], vec![3], vec![4, 5]]);
    let mut device = CaptureDevice::new(Box::new(backend));

    device.begin().await.expect("begin should succeed");
    assert!(device.is_live());
    assert!(device.is_recording());

    let bytes = device.stop().await.expect("stop should finalize");
    assert_eq!(bytes, vec![1, 2, 3, 4, 5]);
    assert!(!device.is_live(), "hardware must be released after stop");
    assert!(!device.is_recording());
}

#[tokio::test]
async fn test_stop_with_zero_chunks_is_empty_error() {
    let mut device = CaptureDevice::new(Box::new(ScriptedBackend::silent()));

    device.begin().await.expect("begin should succeed");
    let result = device.stop().await;

    assert_eq!(result.unwrap_err(), CaptureError::Empty);
    assert!(
        !device.is_live(),
        "hardware must be released even when nothing was recorded"
    );
}

#[tokio::test]
async fn test_open_failure_leaves_indicator_off() {
    let mut device = CaptureDevice::new(Box::new(ScriptedBackend::denied()));

    let result = device.begin().await;

    assert_eq!(result.unwrap_err(), CaptureError::PermissionDenied);
    assert!(!device.is_live());
    assert!(!device.is_recording());
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let backend = ScriptedBackend::with_chunks(vec![vec![9]]);
    let mut device = CaptureDevice::new(Box::new(backend));

    device.begin().await.expect("begin should succeed");
    device.release();
    device.release();
    assert!(!device.is_live());

    // The device is reusable after release.
    device.begin().await.expect("begin again should succeed");
    let bytes = device.stop().await.expect("stop should finalize");
    assert_eq!(bytes, vec![9]);
}

#[tokio::test]
async fn test_second_begin_while_active_is_rejected() {
    let backend = ScriptedBackend::with_chunks(vec![vec![1]]);
    let mut device = CaptureDevice::new(Box::new(backend));

    device.begin().await.expect("begin should succeed");
    let second = device.begin().await;

    assert!(matches!(second, Err(CaptureError::Unavailable(_))));
    assert!(device.is_live(), "first capture must be unaffected");

    device.stop().await.expect("stop should still finalize");
}

#[tokio::test]
async fn test_truncated_stream_yields_partial_capture() {
    // Simulates a device dropping out after two chunks.
    let backend = ScriptedBackend::new(CaptureScript {
        chunks: vec![vec![1], vec![2], vec![3], vec![4]],
        deliver_at_most: Some(2),
        ..CaptureScript::default()
    });
    let mut device = CaptureDevice::new(Box::new(backend));

    device.begin().await.expect("begin should succeed");
    let bytes = device.stop().await.expect("partial capture still finalizes");

    assert_eq!(bytes, vec![1, 2]);
    assert!(!device.is_live());
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_counter_ticks_and_resets() {
    let backend = ScriptedBackend::with_chunks(vec![vec![1]]);
    let mut device = CaptureDevice::with_tick(Box::new(backend), Duration::from_millis(100));

    assert_eq!(device.elapsed_secs(), 0);

    device.begin().await.expect("begin should succeed");
    tokio::time::sleep(Duration::from_millis(550)).await;
    assert!(
        device.elapsed_secs() >= 1,
        "elapsed counter should tick while recording"
    );

    device.stop().await.expect("stop should finalize");
    assert_eq!(device.elapsed_secs(), 0, "elapsed resets when recording ends");
}
