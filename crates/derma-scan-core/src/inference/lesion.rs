//! Skin-lesion classifier.
//!
//! A small CNN binary classifier over 224x224 RGB lesion photos. The
//! output is a single malignancy probability.

// Allow common ML code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use anyhow::Result;
use candle_core::{Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

use super::sigmoid;

/// Input edge length for lesion photos.
pub const INPUT_SIZE: usize = 224;

/// Lesion classifier model.
///
/// Architecture: 4 conv layers with max pooling, followed by 2 FC layers.
/// Input: `(1, 3, 224, 224)` RGB tensor
/// Output: malignancy probability (0.0 = benign, 1.0 = malignant)
pub struct LesionClassifier {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    conv4: Conv2d,
    fc1: Linear,
    fc2: Linear,
}

impl LesionClassifier {
    /// Creates a new lesion classifier from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if model weights cannot be loaded or are invalid.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let pad1 = Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        };

        let conv1 = conv2d(3, 16, 3, pad1, vb.pp("conv1"))?;
        let conv2 = conv2d(16, 32, 3, pad1, vb.pp("conv2"))?;
        let conv3 = conv2d(32, 64, 3, pad1, vb.pp("conv3"))?;
        let conv4 = conv2d(64, 64, 3, pad1, vb.pp("conv4"))?;

        // After 4 max pools of 2x2:
        // 224 -> 112 -> 56 -> 28 -> 14
        // Flattened: 64 * 14 * 14 = 12544
        let fc1 = linear(12544, 128, vb.pp("fc1"))?;
        let fc2 = linear(128, 1, vb.pp("fc2"))?;

        Ok(Self {
            conv1,
            conv2,
            conv3,
            conv4,
            fc1,
            fc2,
        })
    }

    /// Runs the model on a preprocessed input tensor and returns the
    /// malignancy probability.
    ///
    /// The input tensor is borrowed; both it and the output tensor are
    /// released by ownership when they go out of scope, on every path.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    pub fn classify(&self, input: &Tensor) -> Result<f32> {
        let output = self.forward(input)?;
        let logit = output.squeeze(0)?.squeeze(0)?.to_scalar::<f32>()?;
        Ok(sigmoid(logit))
    }
}

impl Module for LesionClassifier {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let x = self.conv1.forward(x)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv4.forward(&x)?.relu()?.max_pool2d(2)?;

        let x = x.flatten_from(1)?;
        let x = self.fc1.forward(&x)?.relu()?;

        // Logit output; sigmoid is applied in classify().
        self.fc2.forward(&x)
    }
}
