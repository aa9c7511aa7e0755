//! ML inference engine using Candle.
//!
//! Provides device selection, lazy safetensors model loading, image
//! preprocessing, and the lesion classifier itself.

mod device;
mod lesion;
mod loader;
mod preprocess;

pub use candle_core::Device;
pub use device::get_device;
pub use lesion::{LesionClassifier, INPUT_SIZE};
pub use loader::{load_safetensors, LazyModel};
pub use preprocess::preprocess;

/// Sigmoid activation function.
#[inline]
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
