//! # filemorph
//!
//! Convert between document, spreadsheet and image formats.
//!
//! The crate is a conversion core in three parts: a static compatibility
//! table gating which (source, target) extension pairs are offered, a
//! dispatcher selecting exactly one routine per pair, and the routines
//! themselves, each a thin call into a dedicated format library.
//!
//! ## Pipeline Overview
//!
//! ```text
//! (source ext, target ext)
//!  │
//!  ├─ 1. Table     is the pair offered? (static compatibility matrix)
//!  ├─ 2. Dispatch  ordered pattern match selects one routine
//!  ├─ 3. Routine   one call into the format library (pdfium, docx-rs,
//!  │               calamine / rust_xlsxwriter, csv, image)
//!  └─ 4. Commit    staging file renamed onto the output path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filemorph::{convert_checked, ConversionConfig, Extension};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     convert_checked(
//!         "report.pdf".as_ref(),
//!         "report.txt".as_ref(),
//!         Extension::Pdf,
//!         Extension::Txt,
//!         &config,
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `filemorph` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! filemorph = { version = "0.1", default-features = false }
//! ```
//!
//! ## The table is the contract
//!
//! Which conversions are offered is static data ([`matrix`]), deliberately
//! separate from which routines exist ([`convert`]). An advertised pair
//! with no routine fails loudly with
//! [`ConvertError::UnsupportedConversion`] instead of silently doing
//! nothing, and a conversion that fails part-way leaves nothing at the
//! output path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod matrix;
pub mod renderer;
pub mod routines;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_checked};
pub use error::ConvertError;
pub use format::Extension;
pub use renderer::{DocxRenderer, LibreOfficeRenderer};
