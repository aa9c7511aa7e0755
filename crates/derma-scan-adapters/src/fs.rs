//! Filesystem adapter for loading lesion images.

use anyhow::{Context, Result};
use derma_scan_core::{ImageSource, LesionImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions for lesion photos.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif"];

/// Filesystem image source adapter.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all image files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported_image(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = (String, Result<LesionImage>)> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} image files", files.len());

        Box::new(files.into_iter().map(|path| {
            let loaded = load_image(&path);
            (path.to_string_lossy().into_owned(), loaded)
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Loads and decodes an image from the filesystem.
///
/// There is no size or format pre-validation beyond the extension filter;
/// anything the decoder rejects surfaces here as an error item.
fn load_image(path: &Path) -> Result<LesionImage> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;

    Ok(LesionImage::new(path.to_string_lossy().into_owned(), image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("lesion.jpg")));
        assert!(is_supported_image(Path::new("lesion.JPEG")));
        assert!(is_supported_image(Path::new("lesion.png")));
        assert!(is_supported_image(Path::new("lesion.webp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("lesion")));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::DynamicImage::new_rgb8(32, 32);
        img.save(dir.path().join("a.png")).unwrap();
        img.save(dir.path().join("b.png")).unwrap();
        std::fs::write(dir.path().join("ignored.txt"), b"not an image").unwrap();

        let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
        assert_eq!(source.count_hint(), Some(2));

        let loaded: Vec<_> = source.images().collect();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|(_, result)| result.is_ok()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_corrupt_file_is_an_error_item_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
        let loaded: Vec<_> = source.images().collect();
        assert_eq!(loaded.len(), 1);
        let (path, result) = &loaded[0];
        assert!(path.ends_with("broken.png"));
        assert!(result.is_err());
    }
}
