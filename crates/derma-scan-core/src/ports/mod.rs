//! Ports (trait seams) between the core pipeline and the outside world.

mod advice;
mod image_source;
mod progress;
mod result_output;

pub use advice::AdviceProvider;
pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
