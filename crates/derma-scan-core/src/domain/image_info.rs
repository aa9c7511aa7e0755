//! Decoded lesion image handed from ingest to preprocessing.

/// A decoded lesion photo.
///
/// Owned by the ingest-to-preprocessing handoff; dropped once the input
/// tensor has been built.
#[derive(Debug, Clone)]
pub struct LesionImage {
    /// Path or synthetic identifier of the image.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub image: image::DynamicImage,
}

impl LesionImage {
    /// Creates a new lesion image, deriving dimensions from the pixel data.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Returns the pixel data as 8-bit RGB.
    #[must_use]
    pub fn to_rgb8(&self) -> image::RgbImage {
        self.image.to_rgb8()
    }
}
