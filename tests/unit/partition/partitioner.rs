//! Tests for the partition driver over decoded and on-disk images

#[cfg(test)]
mod tests {
    use crate::unit::log::RecordingLogger;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
    use std::error::Error;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tilesplit::log::{LogLevel, TracingLogger};
    use tilesplit::partition::{ImageSource, PartitionConfig, Partitioner, Tile};
    use tilesplit::spatial::{Dimensions, GridShape, HeightCheck, TileBox};
    use tilesplit::PartitionError;

    // Pixel values encode their own coordinates so crops can be checked
    fn coordinate_image(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256) + (y / 256) * 16) as u8])
        });
        DynamicImage::ImageRgb8(buffer)
    }

    // Tests a missing overlap defaults to zero
    // Verified by defaulting the overlap to the tile size
    #[test]
    fn test_config_defaults_overlap_to_zero() {
        let config = PartitionConfig::new(Dimensions::new(64, 32), None);

        assert_eq!(config.overlap_size, Dimensions::zero());
        assert_eq!(config.height_check, HeightCheck::AgainstImageHeight);

        let legacy = config.with_height_check(HeightCheck::AgainstImageWidth);
        assert_eq!(legacy.height_check, HeightCheck::AgainstImageWidth);
        assert_eq!(legacy.tile_size, Dimensions::new(64, 32));
    }

    #[test]
    fn test_partitioner_accessors() {
        let partitioner = Partitioner::new(Dimensions::new(256, 128), Some(Dimensions::new(8, 4)));

        assert_eq!(partitioner.size(), Dimensions::new(256, 128));
        assert_eq!(partitioner.overlap(), Dimensions::new(8, 4));
        assert_eq!(partitioner.config().tile_size, Dimensions::new(256, 128));
        assert_eq!(partitioner.log_name(), None);

        let named = partitioner.with_logger(Arc::new(TracingLogger::new("batch")));
        assert_eq!(named.log_name(), Some("batch"));
    }

    // Tests tiles of a decoded image carry the pixels of their box
    // Verified by cropping from the untrimmed box
    #[test]
    fn test_partition_decoded_image() {
        let source = coordinate_image(500, 300);
        let partitioner = Partitioner::new(Dimensions::new(256, 256), None);

        let tiles: Vec<Tile> = partitioner.partition(&source, false).unwrap().collect();

        assert_eq!(tiles.len(), 4);
        let grid: Vec<(u32, u32)> = tiles.iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(grid, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

        for tile in &tiles {
            assert_eq!(tile.image.width(), tile.tile_box.width());
            assert_eq!(tile.image.height(), tile.tile_box.height());
            assert_eq!(
                tile.image.get_pixel(0, 0),
                source.get_pixel(tile.tile_box.left, tile.tile_box.upper)
            );
            assert_eq!(
                tile.image
                    .get_pixel(tile.tile_box.width() - 1, tile.tile_box.height() - 1),
                source.get_pixel(tile.tile_box.right - 1, tile.tile_box.lower - 1)
            );
        }

        let last = tiles.last().map(|t| t.tile_box);
        assert_eq!(last, Some(TileBox::new(256, 256, 500, 300)));
    }

    #[test]
    fn test_partition_reports_shape_and_count() {
        let source = coordinate_image(100, 60);
        let partitioner = Partitioner::new(Dimensions::new(40, 40), Some(Dimensions::new(10, 10)));

        let mut tiles = partitioner.partition(&source, false).unwrap();
        assert_eq!(tiles.shape(), GridShape { rows: 2, cols: 4 });
        assert_eq!(tiles.len(), 8);
        assert_eq!(tiles.source_image().width(), 100);

        assert_eq!(tiles.by_ref().take(3).count(), 3);
        assert_eq!(tiles.produced(), 3);
        assert_eq!(tiles.len(), 5);

        assert_eq!(tiles.by_ref().count(), 5);
        assert_eq!(tiles.produced(), 8);
        assert!(tiles.next().is_none());
    }

    // Tests images on disk are decoded before partitioning
    // Verified by skipping the path branch
    #[test]
    fn test_partition_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("source.png");
        coordinate_image(64, 48).save(&path).unwrap();

        let partitioner = Partitioner::new(Dimensions::new(32, 32), None);
        let tiles = partitioner.partition(path.as_path(), false).unwrap();

        assert!(tiles.label().ends_with("source.png"));
        let sizes: Vec<Dimensions> = tiles.map(|t| t.tile_box.dimensions()).collect();
        assert_eq!(
            sizes,
            vec![
                Dimensions::new(32, 32),
                Dimensions::new(32, 32),
                Dimensions::new(32, 16),
                Dimensions::new(32, 16),
            ]
        );
    }

    // Tests an unreadable source is a hard error carrying its cause
    // Verified by returning an empty sequence for missing files
    #[test]
    fn test_missing_source_is_unavailable() {
        let partitioner = Partitioner::new(Dimensions::new(32, 32), None);
        let result = partitioner.partition(Path::new("does/not/exist.png"), false);

        match result {
            Err(err @ PartitionError::SourceUnavailable { .. }) => {
                assert!(err.source().is_some());
                assert!(err.to_string().contains("exist.png"));
            }
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_source_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let partitioner = Partitioner::new(Dimensions::new(32, 32), None);
        let result = partitioner.partition(path.as_path(), false);

        assert!(matches!(
            result,
            Err(PartitionError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_configuration_fails_before_cropping() {
        let source = coordinate_image(200, 200);
        let partitioner = Partitioner::new(Dimensions::new(300, 100), None);

        assert!(matches!(
            partitioner.partition(&source, false),
            Err(PartitionError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_overhang_is_unsupported() {
        let source = coordinate_image(200, 200);
        let partitioner = Partitioner::new(Dimensions::new(100, 100), None);

        assert!(matches!(
            partitioner.partition(&source, true),
            Err(PartitionError::UnsupportedFeature { .. })
        ));
    }

    // Tests the boxes of a partitioner follow its configuration
    // Verified by ignoring the configured overlap
    #[test]
    fn test_boxes_use_configuration() {
        let partitioner = Partitioner::new(Dimensions::new(100, 100), Some(Dimensions::new(50, 0)));
        let lefts: Vec<u32> = partitioner
            .boxes(Dimensions::new(200, 100), false)
            .unwrap()
            .map(|r| r.tile_box.left)
            .collect();

        assert_eq!(lefts, vec![0, 50, 100, 150]);
    }

    // Tests the start and completion summary are logged once
    // Verified by logging the summary on every exhausted pull
    #[test]
    fn test_partition_logging() {
        let logger = Arc::new(RecordingLogger::default());
        let partitioner = Partitioner::new(Dimensions::new(50, 50), None).with_logger(logger.clone());
        let source = coordinate_image(100, 100);

        let mut tiles = partitioner.partition(ImageSource::Decoded(&source), false).unwrap();
        assert_eq!(tiles.by_ref().count(), 4);
        assert!(tiles.next().is_none());

        assert!(logger.contains(LogLevel::Info, "Partitioning '<decoded 100x100 image>'"));
        let summaries: Vec<String> = logger
            .messages_at(LogLevel::Info)
            .into_iter()
            .filter(|m| m.starts_with("Sliced and diced"))
            .collect();
        assert_eq!(
            summaries,
            vec!["Sliced and diced '<decoded 100x100 image>' into 4 partitions".to_string()]
        );
        assert!(logger.contains(LogLevel::Debug, "Cropping row 1 col 1"));
        assert!(logger.contains(LogLevel::Debug, "Initializing logger"));
    }

    #[test]
    fn test_image_source_display() {
        let source = coordinate_image(8, 4);

        assert_eq!(ImageSource::from(&source).to_string(), "<decoded 8x4 image>");
        assert_eq!(
            ImageSource::from(Path::new("dir/photo.jpg")).to_string(),
            "dir/photo.jpg"
        );
    }
}
