//! External renderer boundary for docx to pdf.
//!
//! Rendering a Word document with print fidelity is a word processor's job,
//! not a library call, so this conversion shells out to one. The trait keeps
//! the invocation behind an interface that returns the produced file handle
//! directly; the dispatcher never scans directories or guesses filenames.
//!
//! Callers must pass a request-scoped `out_dir` (a fresh temp dir per call)
//! so concurrent renders cannot collide on intermediate artifacts.

use crate::error::ConvertError;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Renders a DOCX file to PDF inside a caller-supplied output directory.
pub trait DocxRenderer: Send + Sync {
    /// Render `input` to a PDF inside `out_dir` and return the path of the
    /// produced file.
    fn render_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError>;
}

/// LibreOffice in headless mode.
///
/// The contract with LibreOffice is a filename convention: a successful run
/// leaves `<out_dir>/<input basename>.pdf`. A clean exit without that exact
/// file is still a failure.
#[derive(Debug, Clone)]
pub struct LibreOfficeRenderer {
    program: PathBuf,
    timeout: Duration,
}

impl LibreOfficeRenderer {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for LibreOfficeRenderer {
    fn default() -> Self {
        Self::new("soffice", Duration::from_secs(120))
    }
}

impl DocxRenderer for LibreOfficeRenderer {
    fn render_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        debug!(
            "Rendering {} via {} into {}",
            input.display(),
            self.program.display(),
            out_dir.display()
        );

        let mut child = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ConvertError::failed(format!(
                    "could not launch renderer '{}': {e}",
                    self.program.display()
                ))
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                pipe.read_to_string(&mut stderr).ok();
            }
            return Err(ConvertError::failed(format!(
                "renderer exited with {status}: {}",
                stderr.trim()
            )));
        }

        let stem = input.file_stem().unwrap_or_default();
        let produced = out_dir.join(stem).with_extension("pdf");
        if !produced.is_file() {
            return Err(ConvertError::failed(format!(
                "renderer reported success but produced no file at {}",
                produced.display()
            )));
        }

        Ok(produced)
    }
}

/// Poll for exit; kill the child if `limit` elapses first.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<ExitStatus, ConvertError> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= limit {
            child.kill().ok();
            child.wait().ok();
            return Err(ConvertError::failed(format!(
                "renderer timed out after {}s",
                limit.as_secs()
            )));
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_renderer_binary_fails_with_cause() {
        let renderer = LibreOfficeRenderer::new(
            "/definitely/not/a/real/soffice",
            Duration::from_secs(1),
        );
        let tmp = tempfile::tempdir().unwrap();
        let err = renderer
            .render_pdf(Path::new("input.docx"), tmp.path())
            .unwrap_err();
        assert!(matches!(err, ConvertError::ConversionFailed { .. }));
        assert!(err.to_string().contains("could not launch"), "got: {err}");
    }
}
