//! Integration tests for lesion image loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use derma_scan_adapters::FsImageSource;
use derma_scan_core::ImageSource;
use derma_scan_test_support::SyntheticLesionBuilder;
use std::path::Path;

fn save_synthetic(path: &Path, width: u32, height: u32) {
    SyntheticLesionBuilder::dark_spot(width, height)
        .image
        .save(path)
        .expect("save synthetic image");
}

#[test]
fn test_load_jpeg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    save_synthetic(&dir.path().join("lesion.jpg"), 64, 48);
    save_synthetic(&dir.path().join("lesion.png"), 32, 32);

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    for (path, result) in source.images() {
        let image = result.expect("all synthetic images should load");
        assert!(image.width > 0);
        assert!(image.height > 0);
        assert_eq!(image.path, path);
    }
}

#[test]
fn test_dimensions_survive_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lesion.png");
    save_synthetic(&path, 123, 77);

    let source = FsImageSource::new(vec![path.clone()], false);
    let (_, result) = source.images().next().expect("one item");
    let image = result.expect("should load PNG");

    assert_eq!(image.width, 123);
    assert_eq!(image.height, 77);
    assert!(image.path.ends_with("lesion.png"));
}

#[test]
fn test_recursive_scan_finds_nested_images() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("batch").join("2026-01");
    std::fs::create_dir_all(&nested).unwrap();
    save_synthetic(&nested.join("lesion.png"), 16, 16);

    let flat = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(0));

    let recursive = FsImageSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(1));
}
