use super::{ClassifierBackend, ClassifierOutput};
use ndarray::{Array, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};

const INPUT_NAME: &str = "input";
const OUTPUT_NAME: &str = "output";

pub struct OrtBackend {
    session: Session,
}

impl ClassifierBackend for OrtBackend {
    fn load_model(path: &str) -> anyhow::Result<Self> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(path)?;

        tracing::info!("Model loaded from {}", path);
        Ok(Self { session })
    }

    fn classify(&mut self, input: &Array<f32, IxDyn>) -> anyhow::Result<ClassifierOutput> {
        let outputs = self.session.run(ort::inputs![
            INPUT_NAME => TensorRef::from_array_view(input.view())?
        ])?;

        let scores = outputs[OUTPUT_NAME].try_extract_array::<f32>()?;

        Ok(ClassifierOutput {
            scores: scores.iter().copied().collect(),
        })
    }
}
