//! Image conversions: png/jpg/jpeg sources.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::format::Extension;
use crate::routines::pdfout;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Decode and re-encode in the target pixel format, preserving visual
/// content.
pub fn transcode(
    input: &Path,
    staged: &Path,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    let img = image::open(input)?;
    debug!("Decoded {} ({}x{})", input.display(), img.width(), img.height());
    write_image(&img, staged, target, config)
}

/// Embed the image as the entire content of a single PDF page sized to the
/// image, mapping pixels to points at 96 px/inch.
pub fn to_pdf(input: &Path, staged: &Path) -> Result<(), ConvertError> {
    let img = image::open(input)?;
    let width = img.width() as f32 * 72.0 / 96.0;
    let height = img.height() as f32 * 72.0 / 96.0;
    pdfout::write_image_pdf(&img, width, height, staged)
}

/// Encode `img` at `staged` in the target format.
///
/// JPEG cannot carry an alpha channel, so the pixels are flattened to RGB8
/// before encoding.
pub(crate) fn write_image(
    img: &DynamicImage,
    staged: &Path,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    match target {
        Extension::Png => img.save_with_format(staged, ImageFormat::Png)?,
        Extension::Jpg => {
            let file = File::create(staged)?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, config.jpeg_quality);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
            writer.flush()?;
        }
        other => {
            return Err(ConvertError::failed(format!(
                "'{other}' is not an image target"
            )))
        }
    }
    Ok(())
}
