use clap::Parser;
use common::{Environment, setup_logging};
use std::path::PathBuf;
use trainer::{TrainOptions, train};

#[derive(Parser, Debug)]
#[command(
    name = "trainer",
    about = "Train the fire/smoke classifier on a directory of labeled images"
)]
struct Args {
    /// Dataset root with one subdirectory per class
    #[arg(long)]
    data_dir: PathBuf,

    /// Output artifact path; a .mpk record and .json sidecar are written
    #[arg(long, default_value = "models/fire_detection")]
    output: PathBuf,

    #[arg(long, default_value_t = 10)]
    epochs: usize,

    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Fraction of samples held out for validation
    #[arg(long, default_value_t = 0.2)]
    validation_split: f32,

    /// Square input size images are resized to
    #[arg(long, default_value_t = 224)]
    image_size: u32,

    #[arg(long, default_value_t = 1e-3)]
    learning_rate: f64,

    /// Seed for the shuffled split and epoch ordering
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    setup_logging(Environment::from_env());

    let args = Args::parse();

    let options = TrainOptions {
        epochs: args.epochs,
        batch_size: args.batch_size,
        learning_rate: args.learning_rate,
        validation_split: args.validation_split,
        image_size: args.image_size,
        seed: args.seed,
    };

    train(&args.data_dir, &args.output, &options)
}
