//! Core domain types for skin-lesion screening.

mod classification;
mod image_info;
mod record;

pub use classification::{interpret, ClassificationResult, Label, MALIGNANT_THRESHOLD};
pub use image_info::LesionImage;
pub use record::ScreeningRecord;
