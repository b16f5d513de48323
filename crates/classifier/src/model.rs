//! CNN model definition shared by the trainer and the burn inference backend.
//!
//! The topology mirrors the original fire-detection network: two small
//! convolutional blocks followed by a dropout-regularized dense head.

use burn::{
    config::Config,
    module::Module,
    nn::{
        Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
    },
    tensor::{Tensor, backend::Backend},
};

const CONV1_FILTERS: usize = 16;
const CONV2_FILTERS: usize = 32;
const KERNEL_SIZE: usize = 3;
const HIDDEN_UNITS: usize = 64;

#[derive(Config, Debug)]
pub struct FireNetConfig {
    /// Number of output classes
    #[config(default = "2")]
    pub num_classes: usize,

    /// Input image size (assumes square images)
    #[config(default = "224")]
    pub input_size: usize,

    /// Dropout rate for the dense head
    #[config(default = "0.3")]
    pub dropout: f64,
}

impl FireNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FireNet<B> {
        // Two stride-2 pools halve the spatial size twice
        let side = self.input_size / 4;
        let flat_features = CONV2_FILTERS * side * side;

        FireNet {
            block1: ConvBlock::new(3, CONV1_FILTERS, device),
            block2: ConvBlock::new(CONV1_FILTERS, CONV2_FILTERS, device),
            dropout: DropoutConfig::new(self.dropout).init(),
            fc1: LinearConfig::new(flat_features, HIDDEN_UNITS).init(device),
            relu: Relu::new(),
            fc2: LinearConfig::new(HIDDEN_UNITS, self.num_classes).init(device),
        }
    }
}

/// Conv2d + ReLU + 2x2 max-pool block
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv: Conv2d<B>,
    relu: Relu,
    pool: MaxPool2d,
}

impl<B: Backend> ConvBlock<B> {
    fn new(in_channels: usize, out_channels: usize, device: &B::Device) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [KERNEL_SIZE, KERNEL_SIZE])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        Self {
            conv,
            relu: Relu::new(),
            pool,
        }
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.relu.forward(x);
        self.pool.forward(x)
    }
}

#[derive(Module, Debug)]
pub struct FireNet<B: Backend> {
    block1: ConvBlock<B>,
    block2: ConvBlock<B>,
    dropout: Dropout,
    fc1: Linear<B>,
    relu: Relu,
    fc2: Linear<B>,
}

impl<B: Backend> FireNet<B> {
    /// Forward pass: [batch, 3, size, size] -> [batch, num_classes] logits.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.block1.forward(x);
        let x = self.block2.forward(x);
        let x = x.flatten(1, 3);
        let x = self.dropout.forward(x);
        let x = self.fc1.forward(x);
        let x = self.relu.forward(x);
        self.fc2.forward(x)
    }
}
