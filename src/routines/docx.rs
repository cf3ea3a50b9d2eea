//! Word-document conversions: docx to txt, txt to docx, and the
//! external-renderer docx to pdf path.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use docx_rs::{read_docx, Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

/// Concatenate paragraph texts with newline separators, preserving
/// paragraph order. Empty paragraphs produce empty lines.
pub fn to_text(input: &Path, staged: &Path) -> Result<(), ConvertError> {
    let buf = fs::read(input)?;
    let parsed = read_docx(&buf)?;

    let mut lines = Vec::new();
    for child in &parsed.document.children {
        if let DocumentChild::Paragraph(p) = child {
            lines.push(paragraph_text(p));
        }
    }

    debug!("Read {} paragraphs from {}", lines.len(), input.display());
    fs::write(staged, lines.join("\n"))?;
    Ok(())
}

/// Each line of the source text becomes one paragraph, in order, blank
/// lines included.
pub fn from_text(input: &Path, staged: &Path) -> Result<(), ConvertError> {
    let text = fs::read_to_string(input)?;

    let mut doc = Docx::new();
    for line in text.lines() {
        doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }

    let file = File::create(staged)?;
    doc.build().pack(file).map_err(ConvertError::failed)?;
    Ok(())
}

/// Render via the configured external renderer into a request-scoped
/// directory, then move the produced file onto the staging path.
pub fn to_pdf(input: &Path, staged: &Path, config: &ConversionConfig) -> Result<(), ConvertError> {
    // A fresh out-dir per request: concurrent renders never share paths.
    let out_dir = TempDir::new()?;
    let produced = config.renderer.render_pdf(input, out_dir.path())?;

    // The renderer's out-dir and the staging dir can sit on different
    // filesystems, where rename is not available.
    if fs::rename(&produced, staged).is_err() {
        fs::copy(&produced, staged)?;
    }
    Ok(())
}

fn paragraph_text(p: &Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        if let ParagraphChild::Run(run) = child {
            for part in &run.children {
                if let RunChild::Text(t) = part {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
