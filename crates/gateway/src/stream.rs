use crate::state::{AppState, FrameMessage, FramePacket};
use crate::wire;
use alert::AlertEvent;
use capture::{CaptureConfig, Frame, Webcam};
use std::ops::ControlFlow;
use std::sync::atomic::Ordering;

/// Start the webcam capture loop the first time a live client connects.
/// Frames are processed strictly sequentially at the capture pace.
pub fn ensure_started(state: AppState) {
    if state.webcam_started.swap(true, Ordering::SeqCst) {
        return;
    }

    tokio::task::spawn_blocking(move || {
        match run_webcam(&state) {
            Ok(()) => tracing::info!("Webcam capture stopped"),
            Err(e) => tracing::error!(error = %e, "Webcam capture failed"),
        }
        broadcast_status(&state, "camera_stopped");
        state.webcam_started.store(false, Ordering::SeqCst);
    });
}

fn run_webcam(state: &AppState) -> anyhow::Result<()> {
    let config = CaptureConfig::from_env()?;
    let mut webcam = Webcam::open(&config)?;

    let (width, height) = webcam.dimensions();
    tracing::info!(width, height, "Live detection started");

    webcam.run(|frame| {
        if let Err(e) = process_frame(state, &frame) {
            tracing::error!(error = %e, "Failed to process frame");
        }
        ControlFlow::Continue(())
    })
}

fn process_frame(state: &AppState, frame: &Frame) -> anyhow::Result<()> {
    let result = state
        .detector
        .lock()
        .map_err(|_| anyhow::anyhow!("detector lock poisoned"))?
        .detect(&frame.pixels, frame.width, frame.height)?;

    if result.detection.label.is_danger() {
        let event = AlertEvent {
            label: result.detection.label.as_str().to_string(),
            confidence: result.detection.confidence,
        };
        state
            .dispatcher
            .lock()
            .map_err(|_| anyhow::anyhow!("dispatcher lock poisoned"))?
            .dispatch(&event);
    }

    let jpeg_data = wire::rgb_to_jpeg(&result.annotated)?;

    let packet = FramePacket {
        metadata: FrameMessage {
            frame_number: frame.frame_number,
            width: frame.width,
            height: frame.height,
            label: result.detection.label.as_str().to_string(),
            confidence: result.detection.confidence,
            status: "live".to_string(),
        },
        jpeg_data,
    };

    // Nobody listening is fine; frames are simply dropped
    let _ = state.tx.send(packet);

    Ok(())
}

fn broadcast_status(state: &AppState, status: &str) {
    let packet = FramePacket {
        metadata: FrameMessage {
            frame_number: 0,
            width: 0,
            height: 0,
            label: String::new(),
            confidence: 0.0,
            status: status.to_string(),
        },
        jpeg_data: Vec::new(),
    };
    let _ = state.tx.send(packet);
}
