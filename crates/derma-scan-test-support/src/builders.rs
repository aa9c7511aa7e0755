//! Synthetic lesion image builders for testing.

use derma_scan_core::LesionImage;
use image::{DynamicImage, Rgb, RgbImage};

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating skin-like images with or
/// without a lesion-like dark region. These exercise decode, resize, and
/// tensor plumbing; they carry no diagnostic meaning.
pub struct SyntheticLesionBuilder;

impl SyntheticLesionBuilder {
    /// Skin-tone base color used by all builders.
    const SKIN: Rgb<u8> = Rgb([224, 172, 138]);

    /// Creates a uniform skin-tone image with no lesion.
    #[must_use]
    pub fn clear_skin(width: u32, height: u32) -> LesionImage {
        let img = RgbImage::from_fn(width, height, |_, _| Self::SKIN);
        LesionImage::new("synthetic://clear_skin", DynamicImage::ImageRgb8(img))
    }

    /// Creates a skin-tone image with a centered dark circular spot.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn dark_spot(width: u32, height: u32) -> LesionImage {
        let cx = (width / 2) as i32;
        let cy = (height / 2) as i32;
        let radius = (width.min(height) / 5) as i32;

        let img = RgbImage::from_fn(width, height, |x, y| {
            let dx = x as i32 - cx;
            let dy = y as i32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                Rgb([54, 33, 28])
            } else {
                Self::SKIN
            }
        });
        LesionImage::new("synthetic://dark_spot", DynamicImage::ImageRgb8(img))
    }

    /// Creates a skin-tone image with an irregular, asymmetric dark region.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn irregular_spot(width: u32, height: u32) -> LesionImage {
        let cx = (width / 3) as i32;
        let cy = (height / 2) as i32;
        let radius = (width.min(height) / 4) as i32;

        let img = RgbImage::from_fn(width, height, |x, y| {
            let dx = x as i32 - cx;
            let dy = y as i32 - cy;
            // Elongated, off-center blob.
            if dx * dx + 3 * dy * dy <= radius * radius {
                Rgb([38, 22, 20])
            } else {
                Self::SKIN
            }
        });
        LesionImage::new("synthetic://irregular_spot", DynamicImage::ImageRgb8(img))
    }

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(r: u8, g: u8, b: u8) -> LesionImage {
        let img = RgbImage::from_fn(1, 1, |_, _| Rgb([r, g, b]));
        LesionImage::new("synthetic://1x1", DynamicImage::ImageRgb8(img))
    }

    /// Creates a grayscale image (exercises RGB conversion).
    #[must_use]
    pub fn grayscale(width: u32, height: u32, value: u8) -> LesionImage {
        let img = image::GrayImage::from_fn(width, height, |_, _| image::Luma([value]));
        LesionImage::new("synthetic://grayscale", DynamicImage::ImageLuma8(img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_skin_is_uniform() {
        let img = SyntheticLesionBuilder::clear_skin(64, 64);
        let rgb = img.to_rgb8();
        let first = *rgb.get_pixel(0, 0);
        assert!(rgb.pixels().all(|p| *p == first));
    }

    #[test]
    fn test_dark_spot_center_differs_from_edge() {
        let img = SyntheticLesionBuilder::dark_spot(128, 128);
        let rgb = img.to_rgb8();
        assert_ne!(*rgb.get_pixel(64, 64), *rgb.get_pixel(0, 0));
    }

    #[test]
    fn test_single_pixel_dimensions() {
        let img = SyntheticLesionBuilder::single_pixel(10, 20, 30);
        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
    }
}
