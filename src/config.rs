//! Configuration for conversions.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across worker threads and to diff two runs
//! to understand why their outputs differ.

use crate::error::ConvertError;
use crate::renderer::{DocxRenderer, LibreOfficeRenderer};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for a conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use filemorph::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .max_raster_pixels(1200)
///     .jpeg_quality(90)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Directory the caller stores incoming files in. Default: `uploads`.
    ///
    /// Consumed by callers (the CLI resolves bare input filenames here), not
    /// by the dispatcher itself, which only ever sees explicit paths.
    pub upload_dir: PathBuf,

    /// Directory converted files are placed in when the caller does not name
    /// an explicit output path. Default: `converted`.
    pub converted_dir: PathBuf,

    /// Longest-edge cap in pixels when rasterising a PDF page. Default: 2000.
    ///
    /// Page sizes vary wildly; capping the longest edge rather than fixing a
    /// DPI keeps memory bounded for outsized pages while leaving ordinary
    /// pages sharp.
    pub max_raster_pixels: u32,

    /// JPEG encode quality, 1 to 100. Default: 85.
    pub jpeg_quality: u8,

    /// Body text size in points for generated PDFs. Default: 12.0.
    pub body_font_size: f32,

    /// Heading text size in points for generated PDFs. Default: 14.0.
    ///
    /// Applied to lines the txt-to-pdf layout classifies as headings
    /// (fully upper-case, at most 60 characters).
    pub heading_font_size: f32,

    /// Page margin in points for generated PDFs. Default: 48.0.
    pub margin_pts: f32,

    /// External renderer used for docx to pdf. Default: LibreOffice
    /// (`soffice`) with a 120 second limit.
    ///
    /// Injectable so embedding services and tests can substitute their own
    /// implementation without a LibreOffice install.
    pub renderer: Arc<dyn DocxRenderer>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            converted_dir: PathBuf::from("converted"),
            max_raster_pixels: 2000,
            jpeg_quality: 85,
            body_font_size: 12.0,
            heading_font_size: 14.0,
            margin_pts: 48.0,
            renderer: Arc::new(LibreOfficeRenderer::default()),
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("upload_dir", &self.upload_dir)
            .field("converted_dir", &self.converted_dir)
            .field("max_raster_pixels", &self.max_raster_pixels)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("body_font_size", &self.body_font_size)
            .field("heading_font_size", &self.heading_font_size)
            .field("margin_pts", &self.margin_pts)
            .field("renderer", &"<dyn DocxRenderer>")
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn converted_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.converted_dir = dir.into();
        self
    }

    pub fn max_raster_pixels(mut self, px: u32) -> Self {
        self.config.max_raster_pixels = px.max(100);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn body_font_size(mut self, pts: f32) -> Self {
        self.config.body_font_size = pts.max(4.0);
        self
    }

    pub fn heading_font_size(mut self, pts: f32) -> Self {
        self.config.heading_font_size = pts.max(4.0);
        self
    }

    pub fn margin_pts(mut self, pts: f32) -> Self {
        self.config.margin_pts = pts.max(0.0);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn DocxRenderer>) -> Self {
        self.config.renderer = renderer;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        // A4 portrait is 595 pt wide; the margins must leave a usable area.
        if c.margin_pts * 2.0 >= 595.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "margin of {} pt leaves no usable page area",
                c.margin_pts
            )));
        }
        if c.heading_font_size < c.body_font_size {
            return Err(ConvertError::InvalidConfig(format!(
                "heading size {} pt is smaller than body size {} pt",
                c.heading_font_size, c.body_font_size
            )));
        }
        Ok(self.config)
    }
}
