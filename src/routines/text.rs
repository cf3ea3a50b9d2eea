//! Plain-text to PDF: line-oriented layout.
//!
//! Blank lines insert vertical spacing. Lines that are fully upper-case and
//! at most 60 characters render centered in bold at the heading size;
//! everything else renders left-aligned at the body size, wrapped to the
//! page width. Pages break at the bottom margin.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::routines::pdfout::{
    self, chars_per_line, wrap, PageSpans, TextSpan, GLYPH_ASPECT, PAGE_HEIGHT, PAGE_WIDTH,
};
use std::fs;
use std::path::Path;

/// Baseline-to-baseline distance as a multiple of the font size.
const LEADING: f32 = 1.4;

pub fn to_pdf(input: &Path, staged: &Path, config: &ConversionConfig) -> Result<(), ConvertError> {
    let text = fs::read_to_string(input)?;
    let pages = layout(&text, config);
    pdfout::write_text_pdf(&pages, staged)
}

/// Heading rule: at most 60 characters, at least one upper-case character,
/// and no lower-case ones. Digit- or punctuation-only lines are body text.
fn is_heading(line: &str) -> bool {
    line.chars().count() <= 60
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

fn layout(text: &str, config: &ConversionConfig) -> Vec<PageSpans> {
    let margin = config.margin_pts;
    let body = config.body_font_size;
    let heading = config.heading_font_size;
    let body_width = chars_per_line(body, margin);

    let mut pages: Vec<PageSpans> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - margin;

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() {
            y -= body * LEADING;
            continue;
        }

        if is_heading(line) {
            advance(&mut pages, &mut y, heading * LEADING, margin);
            let text_width = line.chars().count() as f32 * heading * GLYPH_ASPECT;
            let x = ((PAGE_WIDTH - text_width) / 2.0).max(margin);
            pages.last_mut().expect("at least one page").push(TextSpan {
                text: line.to_string(),
                x,
                y,
                size: heading,
                bold: true,
            });
            // Breathing room below a heading.
            y -= heading * 0.4;
        } else {
            for piece in wrap(line, body_width) {
                advance(&mut pages, &mut y, body * LEADING, margin);
                pages.last_mut().expect("at least one page").push(TextSpan {
                    text: piece,
                    x: margin,
                    y,
                    size: body,
                    bold: false,
                });
            }
        }
    }

    pages
}

/// Move the cursor down by `needed`, opening a fresh page when the next
/// baseline would fall below the bottom margin.
fn advance(pages: &mut Vec<PageSpans>, y: &mut f32, needed: f32, margin: f32) {
    if *y - needed < margin {
        pages.push(Vec::new());
        *y = PAGE_HEIGHT - margin;
    }
    *y -= needed;
}
