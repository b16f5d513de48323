use super::{ClassifierBackend, ClassifierOutput};
use crate::metadata::ModelMetadata;
use crate::model::{FireNet, FireNetConfig};
use burn::backend::NdArray;
use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::{Tensor, TensorData, backend::Backend};
use ndarray::{Array, IxDyn};
use std::path::Path;

type B = NdArray<f32>;

/// CPU backend loading the record written by the trainer.
///
/// Expects a metadata sidecar (`<artifact>.json`) next to the artifact,
/// carrying the class list and input size the model was trained with.
pub struct BurnBackend {
    model: FireNet<B>,
    device: <B as Backend>::Device,
}

impl ClassifierBackend for BurnBackend {
    fn load_model(path: &str) -> anyhow::Result<Self> {
        let device = <B as Backend>::Device::default();

        let metadata = ModelMetadata::load(&ModelMetadata::sidecar_path(Path::new(path)))?;

        let model = FireNetConfig::new()
            .with_num_classes(metadata.class_names.len())
            .with_input_size(metadata.input_size as usize)
            .init::<B>(&device)
            .load_file(path, &CompactRecorder::new(), &device)
            .map_err(|e| anyhow::anyhow!("Failed to load model record from {path}: {e}"))?;

        tracing::info!(
            classes = metadata.class_names.len(),
            input_size = metadata.input_size,
            "Model loaded from {}",
            path
        );

        Ok(Self { model, device })
    }

    fn classify(&mut self, input: &Array<f32, IxDyn>) -> anyhow::Result<ClassifierOutput> {
        let shape = input.shape().to_vec();
        let data = TensorData::new(input.iter().copied().collect::<Vec<f32>>(), shape);
        let tensor = Tensor::<B, 4>::from_data(data, &self.device);

        let logits = self.model.forward(tensor);

        let scores = logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Failed to read model output: {e:?}"))?;

        Ok(ClassifierOutput { scores })
    }
}
