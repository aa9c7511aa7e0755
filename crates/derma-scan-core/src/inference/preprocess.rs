//! Image preprocessing for the lesion classifier.

// Allow common ML code patterns
#![allow(clippy::cast_possible_truncation)]

use anyhow::{Context, Result};
use candle_core::{Device, Tensor};
use image::imageops::FilterType;

use super::INPUT_SIZE;

/// Converts a decoded lesion photo into the classifier's input tensor.
///
/// Resizes with nearest-neighbor interpolation to exactly 224x224, converts
/// to RGB, and maps each channel byte to `f32` without rescaling. The
/// result is a rank-4 `(1, 3, 224, 224)` tensor on the given device.
///
/// Every intermediate buffer is a scoped local dropped on return; only the
/// returned tensor survives, on success and error paths alike.
/// Deterministic: the same image always yields the same tensor.
///
/// # Errors
///
/// Returns an error if tensor creation fails.
pub fn preprocess(image: &image::DynamicImage, device: &Device) -> Result<Tensor> {
    let side = INPUT_SIZE as u32;
    let resized = image.resize_exact(side, side, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    // Raw 0-255 channel values, matching the weights' training input.
    let data: Vec<f32> = rgb
        .pixels()
        .flat_map(|p| p.0.into_iter().map(f32::from))
        .collect();

    let tensor = Tensor::from_vec(data, (INPUT_SIZE, INPUT_SIZE, 3), device)
        .context("Failed to create input tensor")?;

    // HWC -> NCHW for the convolution stack.
    Ok(tensor.permute((2, 0, 1))?.unsqueeze(0)?.contiguous()?)
}
