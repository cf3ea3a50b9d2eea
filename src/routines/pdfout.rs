//! Shared pdfium-backed PDF helpers.
//!
//! pdfium is already the crate's backend for reading and rasterising PDFs;
//! authoring goes through the same bindings so there is exactly one PDF
//! stack. The writer here is deliberately line-oriented: the routines that
//! use it (txt to pdf, sheet to pdf) lay text out one baseline at a time
//! with page breaks at the bottom margin, nothing more.

use crate::error::ConvertError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;

/// A4 portrait, in PDF points.
pub(crate) const PAGE_WIDTH: f32 = 595.0;
pub(crate) const PAGE_HEIGHT: f32 = 842.0;

/// Average glyph advance as a fraction of the font size for the built-in
/// Helvetica faces. An approximation: wrapping and centering do not warrant
/// a font-metrics dependency in a lossy converter.
pub(crate) const GLYPH_ASPECT: f32 = 0.5;

/// Bind to a pdfium library: the directory named by `PDFIUM_LIB_PATH` if
/// set, otherwise the system library search path.
pub(crate) fn bind() -> Result<Pdfium, ConvertError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(dir) if !dir.is_empty() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
        }
        _ => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| {
        ConvertError::failed(format!(
            "could not load the pdfium library: {e:?}\n\
             Set PDFIUM_LIB_PATH to a directory containing libpdfium."
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// One positioned piece of text on a page.
///
/// `x`/`y` are PDF coordinates: origin at the bottom-left, `y` is the
/// baseline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

/// The spans of one page.
pub(crate) type PageSpans = Vec<TextSpan>;

/// Maximum characters that fit on one line at `font_size` inside `margin`.
pub(crate) fn chars_per_line(font_size: f32, margin: f32) -> usize {
    (((PAGE_WIDTH - 2.0 * margin) / (font_size * GLYPH_ASPECT)) as usize).max(1)
}

/// Greedy word wrap to `width` characters; words longer than a full line
/// are split hard.
pub(crate) fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current.is_empty() {
            current.push_str(word);
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
        // Split words that cannot fit a line on their own.
        while current.chars().count() > width {
            let head: String = current.chars().take(width).collect();
            let tail: String = current.chars().skip(width).collect();
            out.push(head);
            current = tail;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Write pre-laid-out text spans, one `Vec` per A4 page, to `staged`.
pub(crate) fn write_text_pdf(pages: &[PageSpans], staged: &Path) -> Result<(), ConvertError> {
    let pdfium = bind()?;
    let mut document = pdfium.create_new_pdf()?;
    let regular = document.fonts_mut().helvetica();
    let bold = document.fonts_mut().helvetica_bold();

    for spans in pages {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::a4())?;
        for span in spans {
            let font = if span.bold { bold } else { regular };
            page.objects_mut().create_text_object(
                PdfPoints::new(span.x),
                PdfPoints::new(span.y),
                &span.text,
                font,
                PdfPoints::new(span.size),
            )?;
        }
    }

    document.save_to_file(&staged)?;
    Ok(())
}

/// Write `image` as the sole content of a single page of exactly
/// `width` x `height` points.
pub(crate) fn write_image_pdf(
    image: &DynamicImage,
    width: f32,
    height: f32,
    staged: &Path,
) -> Result<(), ConvertError> {
    let pdfium = bind()?;
    let mut document = pdfium.create_new_pdf()?;
    let mut page = document.pages_mut().create_page_at_end(
        PdfPagePaperSize::Custom(PdfPoints::new(width), PdfPoints::new(height)),
    )?;

    let object = PdfPageImageObject::new_with_size(
        &document,
        image,
        PdfPoints::new(width),
        PdfPoints::new(height),
    )?;
    page.objects_mut().add_image_object(object)?;

    document.save_to_file(&staged)?;
    Ok(())
}
