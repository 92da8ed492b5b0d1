//! Tests for image decoding, tile naming and tile encoding

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilesplit::PartitionError;
    use tilesplit::io::image::{load_image, save_tile, tile_file_name, tile_output_path};
    use tilesplit::log::NoOpLogger;

    // Tests tile names keep the stem and the dotted extension
    // Verified by dropping the extension dot
    #[test]
    fn test_tile_file_name() {
        assert_eq!(tile_file_name(Path::new("rb.jpg"), 0, 1), "rb_r0c1.jpg");
        assert_eq!(
            tile_file_name(Path::new("photos/aerial.tif"), 12, 3),
            "aerial_r12c3.tif"
        );
    }

    #[test]
    fn test_tile_file_name_edge_cases() {
        assert_eq!(tile_file_name(Path::new("raw"), 2, 2), "raw_r2c2");
        assert_eq!(
            tile_file_name(Path::new("archive.tar.gz"), 0, 0),
            "archive.tar_r0c0.gz"
        );
        assert_eq!(tile_file_name(Path::new(".hidden"), 1, 0), ".hidden_r1c0");
    }

    // Tests the input directory is not carried into the output path
    // Verified by joining the full input path
    #[test]
    fn test_tile_output_path() {
        let path = tile_output_path(Path::new("out"), Path::new("/data/in/scan.png"), 4, 5);
        assert_eq!(path, PathBuf::from("out/scan_r4c5.png"));
    }

    #[test]
    fn test_save_and_load_tile() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tile_r0c0.png");
        let tile = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            7,
            5,
            image::Rgba([10, 20, 30, 255]),
        ));

        save_tile(&tile, &path).unwrap();
        let loaded = load_image(&path, &NoOpLogger).unwrap();

        assert_eq!(loaded.width(), 7);
        assert_eq!(loaded.height(), 5);
        assert_eq!(loaded.to_rgba8(), tile.to_rgba8());
    }

    // Tests an unknown extension fails as a tile export error
    // Verified by mapping encoder errors to SourceUnavailable
    #[test]
    fn test_save_tile_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tile_r0c0.unknownformat");
        let tile = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));

        match save_tile(&tile, &path) {
            Err(PartitionError::TileExport { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected TileExport, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_image() {
        let result = load_image(Path::new("missing/nowhere.png"), &NoOpLogger);

        match result {
            Err(PartitionError::SourceUnavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("missing/nowhere.png"));
            }
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }
    }
}
