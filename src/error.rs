//! Error type for the filemorph library.
//!
//! One enum covers the four failure kinds the converter distinguishes:
//!
//! * [`ConvertError::UnknownExtension`] - the token is outside the allowed
//!   set; rejected before any dispatch.
//! * [`ConvertError::DisallowedConversion`] - both tokens are known but the
//!   pair is absent from the compatibility table.
//! * [`ConvertError::UnsupportedConversion`] - the pair passed validation
//!   but no dispatch arm matches it. This is a gap between the advertised
//!   table and the implemented routines, surfaced loudly instead of being
//!   swallowed as a no-op.
//! * [`ConvertError::ConversionFailed`] - anything that goes wrong inside a
//!   routine: unreadable or corrupt input, a format library rejecting the
//!   file, the external renderer producing no output, plain I/O trouble.
//!   All of these collapse into one kind carrying a human-readable cause.
//!
//! Nothing is retried. A failed conversion never leaves a usable-looking
//! partial file at the output path (see [`crate::convert`]).

use crate::format::Extension;
use std::fmt;
use thiserror::Error;

/// All errors returned by the filemorph library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The token is not in the allowed extension set.
    #[error("Unknown file extension '{token}'\nSupported: pdf, csv, xlsx, txt, png, jpg, jpeg, docx.")]
    UnknownExtension { token: String },

    /// The pair is not offered by the compatibility table.
    #[error("Conversion {source} -> {target} is not offered")]
    DisallowedConversion {
        source: Extension,
        target: Extension,
    },

    /// The pair is advertised but no routine implements it.
    #[error("Conversion {source} -> {target} is advertised but not implemented")]
    UnsupportedConversion {
        source: Extension,
        target: Extension,
    },

    /// A routine failed while converting.
    #[error("Conversion failed: {detail}")]
    ConversionFailed { detail: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConvertError {
    /// Collapse an arbitrary cause into [`ConvertError::ConversionFailed`].
    pub fn failed(detail: impl fmt::Display) -> Self {
        Self::ConversionFailed {
            detail: detail.to_string(),
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        Self::failed(e)
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        Self::failed(format!("image: {e}"))
    }
}

impl From<csv::Error> for ConvertError {
    fn from(e: csv::Error) -> Self {
        Self::failed(format!("csv: {e}"))
    }
}

impl From<calamine::XlsxError> for ConvertError {
    fn from(e: calamine::XlsxError) -> Self {
        Self::failed(format!("xlsx: {e}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ConvertError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::failed(format!("xlsx: {e}"))
    }
}

impl From<docx_rs::DocxError> for ConvertError {
    fn from(e: docx_rs::DocxError) -> Self {
        Self::failed(format!("docx: {e}"))
    }
}

impl From<docx_rs::ReaderError> for ConvertError {
    fn from(e: docx_rs::ReaderError) -> Self {
        Self::failed(format!("docx: {e}"))
    }
}

impl From<pdfium_render::prelude::PdfiumError> for ConvertError {
    fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
        Self::failed(format!("pdfium: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_display() {
        let e = ConvertError::UnknownExtension {
            token: "gif".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'gif'"), "got: {msg}");
        assert!(msg.contains("Supported"), "got: {msg}");
    }

    #[test]
    fn disallowed_display_names_both_sides() {
        let e = ConvertError::DisallowedConversion {
            source: Extension::Png,
            target: Extension::Docx,
        };
        let msg = e.to_string();
        assert!(msg.contains("png"), "got: {msg}");
        assert!(msg.contains("docx"), "got: {msg}");
    }

    #[test]
    fn unsupported_display_mentions_not_implemented() {
        let e = ConvertError::UnsupportedConversion {
            source: Extension::Txt,
            target: Extension::Csv,
        };
        assert!(e.to_string().contains("not implemented"));
    }

    #[test]
    fn io_errors_collapse_into_conversion_failed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let e = ConvertError::from(io);
        assert!(matches!(e, ConvertError::ConversionFailed { .. }));
        assert!(e.to_string().contains("missing.csv"));
    }
}
