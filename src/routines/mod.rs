//! Conversion routines: one stateless transformation per submodule.
//!
//! ## Data flow
//!
//! ```text
//! input path ──▶ routine (format library) ──▶ staging path
//!                                             (renamed onto the output
//!                                              path by the dispatcher)
//! ```
//!
//! Every routine reads exactly one file and writes exactly one file at the
//! staging path it is given. No routine touches the final output path, keeps
//! state between calls, or shares intermediate filenames with another
//! request.
//!
//! * [`pdf`]   - PDF sources: text extraction, first-page rasterisation,
//!   paragraph-per-page docx
//! * [`docx`]  - Word documents: to text, from text, external-renderer pdf
//! * [`text`]  - plain text to pdf, line-oriented layout
//! * [`sheet`] - csv/xlsx tables to csv/xlsx/txt/pdf
//! * [`image`] - image transcoding and image-on-a-page pdf

pub mod docx;
pub mod image;
pub mod pdf;
pub mod sheet;
pub mod text;

pub(crate) mod pdfout;
