//! Progress reporting port for UI integration.

use crate::domain::ScreeningRecord;

/// Events emitted during a screening batch for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Screening started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Screening completed for an image.
    Completed {
        /// The screening record.
        record: ScreeningRecord,
    },
    /// Prediction failed for an image.
    Failed {
        /// Path to the image.
        path: String,
        /// Failure message shown to the user.
        message: String,
    },
    /// An image was skipped because it could not be loaded.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images screened successfully.
        processed: usize,
        /// Total images that failed prediction.
        failed: usize,
        /// Total images skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
