//! Image decoding, background trimming and export of evolved individuals

use crate::evolution::individual::{ImageHeader, Individual};
use crate::io::configuration::TRIM_TOLERANCE;
use crate::io::error::{BlendError, Result, invalid_parameter};
use crate::math::color::unpack_to_rgb_bytes;
use image::{ImageFormat, RgbImage};
use ndarray::{ArrayView3, Axis};
use std::path::Path;

/// A decoded image as row-major RGB bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `width * height * 3` channel bytes
    pub pixels: Vec<u8>,
    /// Origin metadata passed through to the writer
    pub header: ImageHeader,
}

/// Source of decoded images for population construction
pub trait ImageLoader {
    /// Decode the image at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded
    fn load(&self, path: &Path) -> Result<DecodedImage>;
}

/// Loads images from the filesystem through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader {
    /// Crop each image to the bounding box of its non-background pixels
    pub trim: bool,
}

impl FileImageLoader {
    /// Create a loader, optionally trimming uniform borders
    pub const fn new(trim: bool) -> Self {
        Self { trim }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage> {
        let rgb = image::open(path)
            .map_err(|e| BlendError::ImageLoad {
                path: path.to_path_buf(),
                source: e,
            })?
            .to_rgb8();

        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(BlendError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        let decoded = DecodedImage {
            width: rgb.width(),
            height: rgb.height(),
            pixels: rgb.into_raw(),
            header: ImageHeader::from_path(path),
        };

        if self.trim {
            trim_background(decoded)
        } else {
            Ok(decoded)
        }
    }
}

/// Inclusive pixel bounds of the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// First foreground row
    pub top: usize,
    /// Last foreground row
    pub bottom: usize,
    /// First foreground column
    pub left: usize,
    /// Last foreground column
    pub right: usize,
}

/// Find pixels that differ from the top-left color by more than the tolerance
///
/// Returns `None` when every pixel matches the background or the image has no
/// pixels at all.
pub fn foreground_bounds(pixels: &ArrayView3<'_, u8>) -> Option<BoundingBox> {
    let (height, width, _) = pixels.dim();
    if height == 0 || width == 0 {
        return None;
    }
    let background = pixels.index_axis(Axis(0), 0).index_axis_move(Axis(0), 0);
    let mut bounds: Option<BoundingBox> = None;

    for (row, line) in pixels.outer_iter().enumerate() {
        for (col, pixel) in line.outer_iter().enumerate() {
            let differs = pixel
                .iter()
                .zip(background.iter())
                .any(|(&p, &bg)| p.abs_diff(bg) > TRIM_TOLERANCE);
            if !differs {
                continue;
            }
            bounds = Some(bounds.map_or(
                BoundingBox {
                    top: row,
                    bottom: row,
                    left: col,
                    right: col,
                },
                |b| BoundingBox {
                    top: b.top.min(row),
                    bottom: b.bottom.max(row),
                    left: b.left.min(col),
                    right: b.right.max(col),
                },
            ));
        }
    }

    bounds
}

/// Crop an image to the bounding box of its non-background pixels
///
/// A uniform image has no foreground and is returned unchanged.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the image geometry
pub fn trim_background(image: DecodedImage) -> Result<DecodedImage> {
    let shape = (image.height as usize, image.width as usize, 3);
    let view = ArrayView3::from_shape(shape, image.pixels.as_slice()).map_err(|e| {
        invalid_parameter(
            "pixels",
            &image.pixels.len(),
            &format!("does not match {}x{} RGB: {e}", image.width, image.height),
        )
    })?;

    let Some(bounds) = foreground_bounds(&view) else {
        tracing::warn!(
            path = %image.header.source.display(),
            "no foreground found, keeping image untrimmed"
        );
        return Ok(image);
    };

    let height = bounds.bottom - bounds.top + 1;
    let width = bounds.right - bounds.left + 1;
    let mut pixels = Vec::with_capacity(height * width * 3);
    for line in view.outer_iter().skip(bounds.top).take(height) {
        for pixel in line.outer_iter().skip(bounds.left).take(width) {
            pixels.extend(pixel.iter().copied());
        }
    }

    tracing::debug!(
        path = %image.header.source.display(),
        original_width = image.width,
        original_height = image.height,
        width,
        height,
        "trimmed background"
    );

    Ok(DecodedImage {
        width: width as u32,
        height: height as u32,
        pixels,
        header: image.header,
    })
}

/// Write packed colors as an image file
///
/// Colors beyond the 24-bit range are clamped to white, so every channel written
/// lies in `[0, 255]`. The format follows the extension of `output_path`, falling
/// back to the source format recorded in `header`.
///
/// # Errors
///
/// Returns an error if:
/// - `colors` does not hold exactly `width * height` pixels
/// - Neither the output extension nor the header names a known format
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved
pub fn write_rgb_image(
    colors: &[u32],
    width: u32,
    height: u32,
    header: &ImageHeader,
    output_path: &Path,
) -> Result<()> {
    let geometry_error = || {
        invalid_parameter(
            "colors",
            &colors.len(),
            &format!("expected {width}x{height} pixels"),
        )
    };
    if colors.len() != width as usize * height as usize {
        return Err(geometry_error());
    }
    let img = RgbImage::from_raw(width, height, unpack_to_rgb_bytes(colors))
        .ok_or_else(geometry_error)?;

    let format = ImageFormat::from_path(output_path)
        .ok()
        .or(header.format)
        .ok_or_else(|| {
            invalid_parameter(
                "output",
                &output_path.display(),
                &"unknown image format",
            )
        })?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BlendError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, format)
        .map_err(|e| BlendError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Write an individual with its own geometry and header
///
/// # Errors
///
/// Returns an error under the same conditions as [`write_rgb_image`]
pub fn export_individual(individual: &Individual, output_path: &Path) -> Result<()> {
    write_rgb_image(
        individual.colors(),
        individual.width(),
        individual.height(),
        individual.header(),
        output_path,
    )
}
