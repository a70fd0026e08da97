//! Tests for image decoding, background trimming and export

#[cfg(test)]
mod tests {
    use genblend::BlendError;
    use genblend::evolution::individual::{ImageHeader, Individual};
    use genblend::io::image::{
        BoundingBox, DecodedImage, FileImageLoader, ImageLoader, export_individual,
        foreground_bounds, trim_background, write_rgb_image,
    };
    use image::{GrayImage, ImageFormat, ImageReader, Luma, Rgb, RgbImage};
    use ndarray::ArrayView3;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// White 5x4 canvas with a dark 2x2 block at rows 1..=2, columns 2..=3
    fn framed() -> RgbImage {
        RgbImage::from_fn(5, 4, |x, y| {
            if (2..=3).contains(&x) && (1..=2).contains(&y) {
                Rgb([10, 20, 30])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    fn decoded(image: &RgbImage) -> DecodedImage {
        DecodedImage {
            width: image.width(),
            height: image.height(),
            pixels: image.as_raw().clone(),
            header: ImageHeader::default(),
        }
    }

    // Tests a PNG decodes to row-major RGB bytes with its header
    // Verified by transposing rows and columns
    #[test]
    fn test_load_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("framed.png");
        framed().save(&path).unwrap();

        let image = FileImageLoader::new(false).load(&path).unwrap();

        assert_eq!((image.width, image.height), (5, 4));
        assert_eq!(image.pixels.len(), 5 * 4 * 3);
        let offset = (5 + 2) * 3;
        assert_eq!(&image.pixels[offset..offset + 3], &[10, 20, 30]);
        assert_eq!(image.header.source, path);
        assert_eq!(image.header.format, Some(ImageFormat::Png));
    }

    // Tests grayscale sources are widened to three channels
    // Verified by keeping the single luma channel
    #[test]
    fn test_load_converts_to_rgb() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gray.png");
        GrayImage::from_pixel(3, 2, Luma([77])).save(&path).unwrap();

        let image = FileImageLoader::default().load(&path).unwrap();

        assert_eq!(image.pixels, vec![77; 3 * 2 * 3]);
    }

    // Tests trimming on load crops to the foreground
    // Verified by ignoring the trim flag
    #[test]
    fn test_load_with_trim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("framed.png");
        framed().save(&path).unwrap();

        let image = FileImageLoader::new(true).load(&path).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels, [10, 20, 30].repeat(4));
    }

    // Tests unreadable files report the offending path
    // Verified by mapping decode failures to an empty image
    #[test]
    fn test_load_failures() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.png");
        let corrupt = temp_dir.path().join("corrupt.png");
        fs::write(&corrupt, b"not an image").unwrap();

        for path in [&missing, &corrupt] {
            match FileImageLoader::default().load(path) {
                Err(error @ BlendError::ImageLoad { .. }) => {
                    assert_eq!(error.to_string(), format!("Invalid filename - {}", path.display()));
                }
                other => panic!("expected load error, got {other:?}"),
            }
        }
    }

    // Tests the bounding box covers exactly the differing pixels
    // Verified by using exclusive bounds
    #[test]
    fn test_foreground_bounds() {
        let image = framed();
        let view = ArrayView3::from_shape((4, 5, 3), image.as_raw().as_slice()).unwrap();

        assert_eq!(
            foreground_bounds(&view),
            Some(BoundingBox {
                top: 1,
                bottom: 2,
                left: 2,
                right: 3,
            })
        );
    }

    // Tests small channel differences stay background
    // Verified by treating any difference as foreground
    #[test]
    fn test_foreground_tolerance() {
        let near = RgbImage::from_fn(3, 3, |x, _| Rgb([200, 200, if x == 1 { 100 } else { 200 }]));
        let far = RgbImage::from_fn(3, 3, |x, _| Rgb([200, 200, if x == 1 { 99 } else { 200 }]));

        let near_view = ArrayView3::from_shape((3, 3, 3), near.as_raw().as_slice()).unwrap();
        let far_view = ArrayView3::from_shape((3, 3, 3), far.as_raw().as_slice()).unwrap();

        assert_eq!(foreground_bounds(&near_view), None);
        assert_eq!(
            foreground_bounds(&far_view),
            Some(BoundingBox {
                top: 0,
                bottom: 2,
                left: 1,
                right: 1,
            })
        );
    }

    // Tests a uniform image survives trimming unchanged
    // Verified by cropping to an empty image
    #[test]
    fn test_trim_uniform_image() {
        let uniform = decoded(&RgbImage::from_pixel(4, 3, Rgb([9, 9, 9])));
        assert_eq!(trim_background(uniform.clone()).unwrap(), uniform);
    }

    // Tests images without pixels have no foreground and survive trimming
    // Verified by reading the top-left pixel unconditionally
    #[test]
    fn test_trim_empty_image() {
        let empty = DecodedImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            header: ImageHeader::default(),
        };
        let view = ArrayView3::from_shape((0, 0, 3), empty.pixels.as_slice()).unwrap();
        assert_eq!(foreground_bounds(&view), None);

        let wide = DecodedImage {
            width: 4,
            ..empty.clone()
        };
        assert_eq!(trim_background(wide.clone()).unwrap(), wide);
        assert_eq!(trim_background(empty.clone()).unwrap(), empty);
    }

    // Tests mismatched pixel buffers are rejected
    // Verified by truncating the view silently
    #[test]
    fn test_trim_rejects_bad_geometry() {
        let mut image = decoded(&framed());
        image.pixels.pop();
        assert!(trim_background(image).is_err());
    }

    // Tests written colors round-trip through PNG
    // Verified by swapping red and blue on export
    #[test]
    fn test_write_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/blend.png");

        write_rgb_image(
            &[0xFF_0000, 0x00_FF00, 0x00_00FF, 0x12_3456],
            2,
            2,
            &ImageHeader::default(),
            &path,
        )
        .unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([0, 255, 0]));
        assert_eq!(image.get_pixel(0, 1), &Rgb([0, 0, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([0x12, 0x34, 0x56]));
    }

    // Tests out-of-range colors are written as white
    // Verified by masking the high bits instead of clamping
    #[test]
    fn test_write_clamps_colors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clamped.png");

        write_rgb_image(&[0x0100_0000], 1, 1, &ImageHeader::default(), &path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    // Tests an unknown extension falls back to the source format
    // Verified by always requiring a known extension
    #[test]
    fn test_write_falls_back_to_header_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("result.out");
        let header = ImageHeader::from_path(Path::new("source.png"));

        write_rgb_image(&[0x00_FF00], 1, 1, &header, &path).unwrap();

        let reader = ImageReader::open(&path)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Png));
        assert_eq!(reader.decode().unwrap().to_rgb8().get_pixel(0, 0), &Rgb([0, 255, 0]));
    }

    // Tests writing fails when no format can be determined
    // Verified by defaulting to PNG
    #[test]
    fn test_write_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("result.out");

        let result = write_rgb_image(&[0], 1, 1, &ImageHeader::default(), &path);

        assert!(matches!(result, Err(BlendError::InvalidParameter { .. })));
        assert!(!path.exists());
    }

    // Tests color counts must match the geometry
    // Verified by accepting oversized buffers
    #[test]
    fn test_write_rejects_bad_geometry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.png");

        assert!(write_rgb_image(&[0; 5], 2, 2, &ImageHeader::default(), &path).is_err());
        assert!(write_rgb_image(&[0; 3], 2, 2, &ImageHeader::default(), &path).is_err());
        assert!(!path.exists());
    }

    // Tests an individual is exported with its own dimensions
    // Verified by exporting as a single row
    #[test]
    fn test_export_individual() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("best.bmp");
        let individual = Individual::new(
            vec![0x00_0000; 6],
            1.0,
            3,
            2,
            ImageHeader::from_path(Path::new("a.png")),
        )
        .unwrap();

        export_individual(&individual, &path).unwrap();

        let image = image::open(&path).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }
}
