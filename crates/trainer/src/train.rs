//! Training loop: Adam over cross-entropy with a held-out validation pass
//! per epoch, then a record plus metadata sidecar on disk.

use crate::dataset::{self, Dataset, Sample};
use anyhow::Result;
use burn::backend::{Autodiff, NdArray};
use burn::module::{AutodiffModule, Module};
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::record::CompactRecorder;
use burn::tensor::ElementConversion;
use burn::tensor::backend::Backend;
use classifier::ModelMetadata;
use classifier::model::{FireNet, FireNetConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

type B = Autodiff<NdArray<f32>>;
type Inner = NdArray<f32>;

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub validation_split: f32,
    pub image_size: u32,
    pub seed: u64,
}

/// Train a classifier on the labeled images under `data_dir` and write the
/// artifact to `output` (`.mpk` record plus `.json` metadata sidecar).
pub fn train(data_dir: &Path, output: &Path, options: &TrainOptions) -> Result<()> {
    let device = Default::default();

    let dataset = Dataset::load(data_dir)?;
    let class_names = dataset.class_names.clone();
    let (mut training, validation) = dataset.split(options.validation_split, options.seed);

    tracing::info!(
        training = training.len(),
        validation = validation.len(),
        "Dataset split"
    );

    let mut model = FireNetConfig::new()
        .with_num_classes(class_names.len())
        .with_input_size(options.image_size as usize)
        .init::<B>(&device);
    let mut optimizer = AdamConfig::new().init();

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);

    for epoch in 1..=options.epochs {
        training.shuffle(&mut rng);

        let (loss, accuracy) =
            train_epoch(&mut model, &mut optimizer, &training, options, &device, epoch)?;

        if validation.is_empty() {
            tracing::info!(
                epoch,
                loss = format!("{loss:.4}"),
                accuracy = format!("{:.2}%", accuracy * 100.0),
                "Epoch complete"
            );
        } else {
            let val_accuracy = evaluate(&model.valid(), &validation, options)?;
            tracing::info!(
                epoch,
                loss = format!("{loss:.4}"),
                accuracy = format!("{:.2}%", accuracy * 100.0),
                validation = format!("{:.2}%", val_accuracy * 100.0),
                "Epoch complete"
            );
        }
    }

    save_artifact(model.valid(), output, class_names, options.image_size)
}

fn train_epoch(
    model: &mut FireNet<B>,
    optimizer: &mut impl Optimizer<FireNet<B>, B>,
    samples: &[Sample],
    options: &TrainOptions,
    device: &<B as Backend>::Device,
    epoch: usize,
) -> Result<(f64, f64)> {
    let batches: Vec<&[Sample]> = samples.chunks(options.batch_size).collect();

    let progress = ProgressBar::new(batches.len() as u64);
    progress.set_style(ProgressStyle::with_template(
        "{msg} [{wide_bar}] {pos}/{len}",
    )?);
    progress.set_message(format!("epoch {epoch}"));

    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for chunk in &batches {
        let batch = dataset::load_batch::<B>(chunk, options.image_size, device)?;

        let logits = model.forward(batch.images);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), batch.targets.clone());

        let loss_value: f64 = loss.clone().into_scalar().elem();
        total_loss += loss_value;

        let predictions = logits.argmax(1).squeeze::<1>(1);
        let batch_correct: i64 = predictions
            .equal(batch.targets)
            .int()
            .sum()
            .into_scalar()
            .elem();
        correct += batch_correct as usize;

        let grads = GradientsParams::from_grads(loss.backward(), model);
        *model = optimizer.step(options.learning_rate, model.clone(), grads);

        progress.inc(1);
    }
    progress.finish_and_clear();

    let avg_loss = total_loss / batches.len().max(1) as f64;
    let accuracy = correct as f64 / samples.len().max(1) as f64;
    Ok((avg_loss, accuracy))
}

/// Accuracy over the validation set, on the non-autodiff model.
fn evaluate(model: &FireNet<Inner>, samples: &[Sample], options: &TrainOptions) -> Result<f64> {
    let device = Default::default();
    let mut correct = 0usize;

    for chunk in samples.chunks(options.batch_size) {
        let batch = dataset::load_batch::<Inner>(chunk, options.image_size, &device)?;

        let predictions = model.forward(batch.images).argmax(1).squeeze::<1>(1);
        let batch_correct: i64 = predictions
            .equal(batch.targets)
            .int()
            .sum()
            .into_scalar()
            .elem();
        correct += batch_correct as usize;
    }

    Ok(correct as f64 / samples.len().max(1) as f64)
}

fn save_artifact(
    model: FireNet<Inner>,
    output: &Path,
    class_names: Vec<String>,
    image_size: u32,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // The recorder replaces the extension with .mpk
    model
        .save_file(output, &CompactRecorder::new())
        .map_err(|e| anyhow::anyhow!("Failed to save model record to {}: {e}", output.display()))?;

    let artifact = output.with_extension("mpk");
    let metadata = ModelMetadata {
        class_names,
        input_size: image_size,
    };
    metadata.save(&ModelMetadata::sidecar_path(&artifact))?;

    tracing::info!("Model saved to {}", artifact.display());
    Ok(())
}
