//! The conversion dispatcher.
//!
//! [`convert`] is the dispatcher proper: its caller has already validated
//! the pair against the compatibility table, and behavior is re-derived
//! purely from the extension pair by an ordered pattern match. First match
//! wins; the asymmetries in the case list are intentional and mirror the
//! table. A pair with no matching arm fails with
//! [`ConvertError::UnsupportedConversion`].
//!
//! [`convert_checked`] is the caller-side wrapper that performs the table
//! check first; use it when no earlier layer has.
//!
//! ## Atomic output
//!
//! Routines never write to the destination directly. Each request gets its
//! own staging directory beside the output path; the routine writes there
//! and the finished file is renamed into place. A failed conversion leaves
//! nothing at the output path, not even a truncated file.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::format::Extension;
use crate::matrix;
use crate::routines::{docx, image, pdf, sheet, text};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info};

/// Convert the file at `input` into `output`.
///
/// # Preconditions
/// The caller has confirmed `matrix::is_permitted(source, target)`; it is
/// not re-checked here.
///
/// # Errors
/// [`ConvertError::UnsupportedConversion`] when no routine matches the
/// pair; [`ConvertError::ConversionFailed`] for anything that goes wrong
/// inside the matched routine.
pub fn convert(
    input: &Path,
    output: &Path,
    source: Extension,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    let start = Instant::now();
    info!(
        "Converting {} -> {} ({source} -> {target})",
        input.display(),
        output.display()
    );

    // Stage in a request-scoped temp dir beside the output so the final
    // rename stays on one filesystem.
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let staging_dir = TempDir::new_in(parent)?;
    let staged = staging_dir.path().join(format!("staged.{target}"));

    dispatch(input, &staged, source, target, config)?;

    fs::rename(&staged, output)?;
    debug!("Converted in {}ms", start.elapsed().as_millis());
    Ok(())
}

/// Table-validating wrapper around [`convert`] for callers that have not
/// checked the pair themselves.
pub fn convert_checked(
    input: &Path,
    output: &Path,
    source: Extension,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    if !matrix::is_permitted(source, target) {
        return Err(ConvertError::DisallowedConversion { source, target });
    }
    convert(input, output, source, target, config)
}

/// The ordered case list. First match wins.
fn dispatch(
    input: &Path,
    staged: &Path,
    source: Extension,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    use Extension::*;

    match (source, target) {
        (Pdf, Txt) => pdf::to_text(input, staged),
        (Pdf, Png | Jpg) => pdf::first_page_to_image(input, staged, target, config),
        (Pdf, Docx) => pdf::to_docx(input, staged),

        (Docx, Txt) => docx::to_text(input, staged),
        (Docx, Pdf) => docx::to_pdf(input, staged, config),

        (Txt, Docx) => docx::from_text(input, staged),
        (Txt, Pdf) => text::to_pdf(input, staged, config),

        (Csv | Xlsx, Csv | Xlsx | Txt | Pdf) => {
            sheet::convert(input, staged, source, target, config)
        }

        (Png | Jpg | Jpeg, Png | Jpg) => image::transcode(input, staged, target, config),
        (Png | Jpg | Jpeg, Pdf) => image::to_pdf(input, staged),

        (source, target) => Err(ConvertError::UnsupportedConversion { source, target }),
    }
}
