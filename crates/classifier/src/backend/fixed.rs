use super::{ClassifierBackend, ClassifierOutput};
use ndarray::{Array, IxDyn};

/// Backend returning a fixed score vector regardless of input.
///
/// Used by tests and by demos that run without a model artifact.
pub struct FixedBackend {
    scores: Vec<f32>,
}

impl FixedBackend {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }
}

impl ClassifierBackend for FixedBackend {
    fn load_model(_path: &str) -> anyhow::Result<Self> {
        Ok(Self {
            scores: vec![0.0, 1.0],
        })
    }

    fn classify(&mut self, _input: &Array<f32, IxDyn>) -> anyhow::Result<ClassifierOutput> {
        Ok(ClassifierOutput {
            scores: self.scores.clone(),
        })
    }
}
