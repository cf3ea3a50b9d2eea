//! Extension tokens: the closed set of formats the converter understands.
//!
//! The lowercase extension token is the sole format discriminator; there is
//! no content sniffing. Anything outside the set below is rejected with
//! [`ConvertError::UnknownExtension`] before a conversion is attempted.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A recognised file-format token.
///
/// `jpg` and `jpeg` are deliberately distinct variants: the compatibility
/// table lists them as separate sources with their own target lists, and
/// `jpeg` never appears as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Pdf,
    Csv,
    Xlsx,
    Txt,
    Png,
    Jpg,
    Jpeg,
    Docx,
}

impl Extension {
    /// Every recognised token, in table order.
    pub const ALL: [Extension; 8] = [
        Extension::Pdf,
        Extension::Csv,
        Extension::Xlsx,
        Extension::Txt,
        Extension::Png,
        Extension::Jpg,
        Extension::Jpeg,
        Extension::Docx,
    ];

    /// The lowercase token.
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Pdf => "pdf",
            Extension::Csv => "csv",
            Extension::Xlsx => "xlsx",
            Extension::Txt => "txt",
            Extension::Png => "png",
            Extension::Jpg => "jpg",
            Extension::Jpeg => "jpeg",
            Extension::Docx => "docx",
        }
    }

    /// Parse a token, case-insensitively.
    pub fn parse(token: &str) -> Result<Self, ConvertError> {
        match token.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Extension::Pdf),
            "csv" => Ok(Extension::Csv),
            "xlsx" => Ok(Extension::Xlsx),
            "txt" => Ok(Extension::Txt),
            "png" => Ok(Extension::Png),
            "jpg" => Ok(Extension::Jpg),
            "jpeg" => Ok(Extension::Jpeg),
            "docx" => Ok(Extension::Docx),
            _ => Err(ConvertError::UnknownExtension {
                token: token.to_string(),
            }),
        }
    }

    /// Derive the token from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let token = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConvertError::UnknownExtension {
                token: path.display().to_string(),
            })?;
        Self::parse(token)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `ConvertError` embeds `Extension` in fields named `source`, which the
// `thiserror` derive treats as an error source; that requires the type to
// implement `std::error::Error`.
impl std::error::Error for Extension {}

impl FromStr for Extension {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
