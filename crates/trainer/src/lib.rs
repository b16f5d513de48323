pub mod dataset;
pub mod train;

pub use dataset::{Batch, Dataset, Sample};
pub use train::{TrainOptions, train};
