use crate::annotate::annotate_frame;
use crate::backend::ClassifierBackend;
use crate::postprocess::{probabilities, top_class};
use crate::preprocess::rgb_to_input;
use anyhow::Result;
use image::{ImageBuffer, RgbImage};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    FireSmoke,
    Normal,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::FireSmoke => "Fire/Smoke",
            Label::Normal => "Normal",
        }
    }

    pub fn is_danger(&self) -> bool {
        matches!(self, Label::FireSmoke)
    }
}

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub model_path: String,
    pub input_size: u32,
    /// Class index the model assigns to fire/smoke. Class directories are
    /// sorted at training time, so "fire" lands at index 0 by default.
    pub fire_class_index: usize,
}

impl DetectorConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Result<Self> {
        let model_path =
            env::var("MODEL_PATH").unwrap_or_else(|_| "models/fire_detection.onnx".to_string());

        let input_size = env::var("INPUT_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(224);

        let fire_class_index = env::var("FIRE_CLASS_INDEX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        Ok(Self {
            model_path,
            input_size,
            fire_class_index,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Detection {
    pub label: Label,
    pub confidence: f32,
    pub scores: Vec<f32>,
}

pub struct DetectionResult {
    pub detection: Detection,
    pub annotated: RgbImage,
}

pub struct Detector<B: ClassifierBackend> {
    backend: B,
    config: DetectorConfig,
}

impl<B: ClassifierBackend> Detector<B> {
    pub fn new(backend: B, config: DetectorConfig) -> Self {
        Self { backend, config }
    }

    /// Load the model named by the config and build a detector around it.
    pub fn from_config(config: DetectorConfig) -> Result<Self> {
        let backend = B::load_model(&config.model_path)?;
        Ok(Self { backend, config })
    }

    /// Classify one RGB frame and return the label, confidence and an
    /// annotated copy of the frame.
    pub fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
        let input = rgb_to_input(pixels, width, height, self.config.input_size)?;

        let output = self.backend.classify(&input)?;
        let probs = probabilities(&output.scores);
        let top = top_class(&probs).ok_or_else(|| anyhow::anyhow!("Model produced no scores"))?;

        let label = if top.class_index == self.config.fire_class_index {
            Label::FireSmoke
        } else {
            Label::Normal
        };

        let mut annotated: RgbImage = ImageBuffer::from_raw(width, height, pixels.to_vec())
            .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;
        annotate_frame(&mut annotated, label.is_danger());

        tracing::debug!(
            label = label.as_str(),
            confidence = top.confidence,
            "Frame classified"
        );

        Ok(DetectionResult {
            detection: Detection {
                label,
                confidence: top.confidence.clamp(0.0, 1.0),
                scores: probs,
            },
            annotated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixed::FixedBackend;

    fn test_config() -> DetectorConfig {
        DetectorConfig {
            model_path: "unused".to_string(),
            input_size: 8,
            fire_class_index: 0,
        }
    }

    fn gray_frame(width: u32, height: u32) -> Vec<u8> {
        vec![100u8; (width * height * 3) as usize]
    }

    #[test]
    fn fire_scores_yield_danger_label() {
        let mut detector = Detector::new(FixedBackend::new(vec![0.9, 0.1]), test_config());
        let result = detector.detect(&gray_frame(16, 16), 16, 16).unwrap();

        assert_eq!(result.detection.label, Label::FireSmoke);
        assert!((result.detection.confidence - 0.9).abs() < 1e-5);
        assert_eq!(result.detection.label.as_str(), "Fire/Smoke");
    }

    #[test]
    fn normal_scores_yield_normal_label() {
        let mut detector = Detector::new(FixedBackend::new(vec![0.1, 0.9]), test_config());
        let result = detector.detect(&gray_frame(16, 16), 16, 16).unwrap();

        assert_eq!(result.detection.label, Label::Normal);
        assert!(!result.detection.label.is_danger());
    }

    #[test]
    fn annotated_frame_keeps_input_dimensions() {
        let mut detector = Detector::new(FixedBackend::new(vec![0.9, 0.1]), test_config());
        let result = detector.detect(&gray_frame(32, 24), 32, 24).unwrap();

        assert_eq!(result.annotated.dimensions(), (32, 24));
    }

    #[test]
    fn corrupt_input_is_an_error() {
        let mut detector = Detector::new(FixedBackend::new(vec![0.9, 0.1]), test_config());
        assert!(detector.detect(&[1, 2, 3], 16, 16).is_err());
    }

    #[test]
    fn logit_scores_are_normalized() {
        let mut detector = Detector::new(FixedBackend::new(vec![5.0, -1.0]), test_config());
        let result = detector.detect(&gray_frame(16, 16), 16, 16).unwrap();

        assert_eq!(result.detection.label, Label::FireSmoke);
        assert!(result.detection.confidence <= 1.0);
        let sum: f32 = result.detection.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}
