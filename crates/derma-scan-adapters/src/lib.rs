//! `DermaScan` Adapters - External adapters for derma-scan.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Model weight downloading and caching
//! - The remote advice endpoint

pub mod advice;
pub mod fs;
pub mod models;

pub use advice::HttpAdviceProvider;
pub use fs::FsImageSource;
pub use models::{model_path, models_dir, set_models_dir};
