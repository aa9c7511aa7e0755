//! Test support utilities for derma-scan.
//!
//! Provides mocks for the core ports and synthetic lesion image builders
//! for testing the screening pipeline without real photos or weights.
//!
//! # Example
//!
//! ```
//! use derma_scan_test_support::{MockImageSource, SyntheticLesionBuilder};
//!
//! // Create synthetic test images
//! let dark = SyntheticLesionBuilder::dark_spot(128, 128);
//! let clear = SyntheticLesionBuilder::clear_skin(128, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![dark, clear]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticLesionBuilder;
pub use mocks::{FailingImageSource, MockAdviceProvider, MockImageSource, MockResultOutput};
