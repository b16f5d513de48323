//! Directory-per-class dataset loading and deterministic train/validation splits.
//!
//! Class indices follow the sorted class directory names, so label order is
//! stable across runs and machines and matches the metadata sidecar written
//! at the end of training.

use anyhow::{Context, Result, bail};
use burn::tensor::{Int, Tensor, TensorData, backend::Backend};
use image::imageops::FilterType;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Debug, Clone)]
pub struct Sample {
    pub path: PathBuf,
    pub label: usize,
}

#[derive(Debug)]
pub struct Dataset {
    pub class_names: Vec<String>,
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Scan a dataset root laid out as one subdirectory per class:
    ///
    /// ```text
    /// root/
    /// ├── fire/
    /// │   ├── 0001.jpg
    /// │   └── ...
    /// └── normal/
    ///     └── ...
    /// ```
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            bail!("Dataset directory does not exist: {}", root.display());
        }

        let mut class_names: Vec<String> = Vec::new();
        for entry in
            std::fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    class_names.push(name.to_string());
                }
            }
        }
        class_names.sort();

        if class_names.len() < 2 {
            bail!(
                "Expected at least two class directories under {}, found {}",
                root.display(),
                class_names.len()
            );
        }

        let mut samples = Vec::new();
        for (label, class_name) in class_names.iter().enumerate() {
            for entry in WalkDir::new(root.join(class_name))
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path().to_path_buf();
                if is_image(&path) {
                    samples.push(Sample { path, label });
                }
            }
        }

        if samples.is_empty() {
            bail!("No images found under {}", root.display());
        }

        tracing::info!(
            classes = class_names.len(),
            samples = samples.len(),
            "Dataset loaded"
        );

        Ok(Self {
            class_names,
            samples,
        })
    }

    /// Seeded shuffle followed by a split into (training, validation).
    pub fn split(&self, validation_split: f32, seed: u64) -> (Vec<Sample>, Vec<Sample>) {
        let mut samples = self.samples.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        samples.shuffle(&mut rng);

        let validation_len = (samples.len() as f32 * validation_split) as usize;
        let training = samples.split_off(validation_len);
        (training, samples)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// One batch as channel-first tensors: images [n, 3, size, size], targets [n].
pub struct Batch<B: Backend> {
    pub images: Tensor<B, 4>,
    pub targets: Tensor<B, 1, Int>,
}

/// Load a batch of samples from disk, resized and scaled to [0, 1].
pub fn load_batch<B: Backend>(
    samples: &[Sample],
    image_size: u32,
    device: &B::Device,
) -> Result<Batch<B>> {
    let size = image_size as usize;
    let mut pixels = Vec::with_capacity(samples.len() * 3 * size * size);
    let mut labels = Vec::with_capacity(samples.len());

    for sample in samples {
        let img = image::open(&sample.path)
            .with_context(|| format!("Failed to open {}", sample.path.display()))?
            .to_rgb8();
        let resized = image::imageops::resize(&img, image_size, image_size, FilterType::Triangle);

        for channel in 0..3 {
            for pixel in resized.pixels() {
                pixels.push(pixel[channel] as f32 / 255.0);
            }
        }
        labels.push(sample.label as i64);
    }

    let images = Tensor::from_data(
        TensorData::new(pixels, [samples.len(), 3, size, size]),
        device,
    );
    let targets = Tensor::from_data(TensorData::new(labels, [samples.len()]), device);

    Ok(Batch { images, targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_class(root: &Path, class: &str, color: Rgb<u8>, count: usize) {
        let dir = root.join(class);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            RgbImage::from_pixel(8, 8, color)
                .save(dir.join(format!("{i}.png")))
                .unwrap();
        }
    }

    #[test]
    fn labels_follow_sorted_class_directories() {
        let root = tempdir().unwrap();
        write_class(root.path(), "normal", Rgb([0, 0, 255]), 2);
        write_class(root.path(), "fire", Rgb([255, 0, 0]), 3);

        let dataset = Dataset::load(root.path()).unwrap();

        assert_eq!(dataset.class_names, vec!["fire", "normal"]);
        assert_eq!(
            dataset
                .samples
                .iter()
                .filter(|sample| sample.label == 0)
                .count(),
            3
        );
        assert_eq!(
            dataset
                .samples
                .iter()
                .filter(|sample| sample.label == 1)
                .count(),
            2
        );
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let root = tempdir().unwrap();
        write_class(root.path(), "fire", Rgb([255, 0, 0]), 5);
        write_class(root.path(), "normal", Rgb([0, 0, 255]), 5);

        let dataset = Dataset::load(root.path()).unwrap();
        let (train_a, val_a) = dataset.split(0.2, 42);
        let (train_b, val_b) = dataset.split(0.2, 42);

        assert_eq!(train_a.len(), 8);
        assert_eq!(val_a.len(), 2);

        let paths = |samples: &[Sample]| {
            samples
                .iter()
                .map(|s| s.path.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(paths(&train_a), paths(&train_b));
        assert_eq!(paths(&val_a), paths(&val_b));
    }

    #[test]
    fn rejects_a_single_class_directory() {
        let root = tempdir().unwrap();
        write_class(root.path(), "fire", Rgb([255, 0, 0]), 2);

        assert!(Dataset::load(root.path()).is_err());
    }

    #[test]
    fn batches_are_channel_first_and_scaled() {
        let root = tempdir().unwrap();
        write_class(root.path(), "fire", Rgb([255, 0, 0]), 1);
        write_class(root.path(), "normal", Rgb([0, 0, 255]), 1);

        let dataset = Dataset::load(root.path()).unwrap();
        let device = Default::default();
        let batch = load_batch::<NdArray<f32>>(&dataset.samples, 8, &device).unwrap();

        assert_eq!(batch.images.dims(), [2, 3, 8, 8]);
        assert_eq!(batch.targets.dims(), [2]);

        // First sample is pure red: red channel 1.0, blue channel 0.0
        let data = batch.images.into_data().to_vec::<f32>().unwrap();
        assert!((data[0] - 1.0).abs() < 1e-6);
        assert!(data[2 * 8 * 8].abs() < 1e-6);
    }
}
