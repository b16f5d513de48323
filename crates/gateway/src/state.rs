use crate::ModelBackend;
use alert::AlertDispatcher;
use classifier::Detector;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMessage {
    pub frame_number: u64,
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub confidence: f32,
    pub status: String,
}

#[derive(Clone)]
pub struct FramePacket {
    pub metadata: FrameMessage,
    pub jpeg_data: Vec<u8>,
}

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Mutex<Detector<ModelBackend>>>,
    pub dispatcher: Arc<Mutex<AlertDispatcher>>,
    pub tx: Arc<broadcast::Sender<FramePacket>>,
    pub webcam_started: Arc<AtomicBool>,
}
