//! PDF-source conversions: text extraction, first-page rasterisation, and
//! the paragraph-per-page docx rendition.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::format::Extension;
use crate::routines::{image as image_out, pdfout};
use docx_rs::{Docx, Paragraph, Run};
use pdfium_render::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Whether a pdfium library can be loaded in this environment.
///
/// Lets callers (and the test suite) probe for the runtime library without
/// attempting a conversion.
pub fn pdfium_available() -> bool {
    pdfout::bind().is_ok()
}

fn load<'a>(pdfium: &'a Pdfium, input: &Path) -> Result<PdfDocument<'a>, ConvertError> {
    pdfium.load_pdf_from_file(input, None).map_err(|e| {
        ConvertError::failed(format!("could not open PDF '{}': {e:?}", input.display()))
    })
}

/// Extract text from every page in order.
///
/// Each page contributing text is terminated with a newline; a page with no
/// extractable text contributes nothing, not even a blank line.
pub fn to_text(input: &Path, staged: &Path) -> Result<(), ConvertError> {
    let pdfium = pdfout::bind()?;
    let document = load(&pdfium, input)?;

    let mut out = String::new();
    for page in document.pages().iter() {
        let text = page.text()?.all().replace("\r\n", "\n");
        let text = text.trim_end();
        if text.is_empty() {
            continue;
        }
        out.push_str(text);
        out.push('\n');
    }

    info!(
        "Extracted {} bytes of text from {} pages",
        out.len(),
        document.pages().len()
    );
    fs::write(staged, out)?;
    Ok(())
}

/// Rasterise only the first page; later pages are silently discarded.
pub fn first_page_to_image(
    input: &Path,
    staged: &Path,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    let pdfium = pdfout::bind()?;
    let document = load(&pdfium, input)?;

    let page = document.pages().first()?;
    let render_config = PdfRenderConfig::new()
        .set_target_width(config.max_raster_pixels as i32)
        .set_maximum_height(config.max_raster_pixels as i32);

    let bitmap = page.render_with_config(&render_config)?;
    let img = bitmap.as_image();
    debug!("Rendered page 1 at {}x{} px", img.width(), img.height());

    image_out::write_image(&img, staged, target, config)
}

/// Produce a document whose paragraphs are the page texts, one paragraph
/// per page. Layout, images and tables are not preserved.
pub fn to_docx(input: &Path, staged: &Path) -> Result<(), ConvertError> {
    let pdfium = pdfout::bind()?;
    let document = load(&pdfium, input)?;

    let mut out = Docx::new();
    for page in document.pages().iter() {
        // A docx paragraph holds a single flow of text; page-internal line
        // breaks collapse to spaces.
        let text = page.text()?.all();
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        out = out.add_paragraph(Paragraph::new().add_run(Run::new().add_text(flat)));
    }

    let file = File::create(staged)?;
    out.build().pack(file).map_err(ConvertError::failed)?;
    Ok(())
}
