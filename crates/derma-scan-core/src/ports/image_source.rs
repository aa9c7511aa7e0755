//! Image source port for loading lesion photos from various sources.

use crate::domain::LesionImage;

/// Port for loading lesion images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// Each item carries the image path alongside the load outcome, so
    /// consumers can report which file was skipped when a load fails.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image fails to load; one bad
    /// file must not abort the rest of the batch.
    fn images(&self) -> Box<dyn Iterator<Item = (String, anyhow::Result<LesionImage>)> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
