use ndarray::{Array, IxDyn};

#[cfg(feature = "burn-backend")]
pub mod burn;

#[cfg(feature = "ort-backend")]
pub mod ort;

pub mod fixed;

pub trait ClassifierBackend {
    fn load_model(path: &str) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run one forward pass over an NCHW float input.
    ///
    /// Returns one raw score per class. Depending on how the model was
    /// exported these are either probabilities or logits; postprocessing
    /// normalizes them.
    fn classify(&mut self, input: &Array<f32, IxDyn>) -> anyhow::Result<ClassifierOutput>;
}

pub struct ClassifierOutput {
    pub scores: Vec<f32>,
}
