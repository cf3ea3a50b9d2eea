//! End-to-end integration tests for filemorph.
//!
//! Conversions among txt/csv/xlsx/docx and the image codecs run entirely
//! in-process and always execute. Conversions that touch PDF content need
//! the pdfium runtime library and skip when it cannot be loaded (set
//! PDFIUM_LIB_PATH to a directory containing libpdfium to run them).
//! docx -> pdf goes through an injected test renderer, so no LibreOffice
//! install is required.

use filemorph::routines::pdf::pdfium_available;
use filemorph::{
    convert, convert_checked, matrix, ConversionConfig, ConvertError, DocxRenderer, Extension,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip tests that need the pdfium runtime library.
macro_rules! skip_unless_pdfium {
    () => {
        if !pdfium_available() {
            println!("SKIP — no pdfium library (set PDFIUM_LIB_PATH to run)");
            return;
        }
    };
}

/// A renderer that honours the real filename convention without LibreOffice:
/// it writes `<out_dir>/<basename>.pdf` whose body names the input path.
struct FakeRenderer {
    delay: Duration,
}

impl DocxRenderer for FakeRenderer {
    fn render_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        std::thread::sleep(self.delay);
        let stem = input.file_stem().expect("input has a basename");
        let produced = out_dir.join(stem).with_extension("pdf");
        fs::write(&produced, format!("%PDF-fake rendered from {}", input.display()))?;
        Ok(produced)
    }
}

fn config() -> ConversionConfig {
    ConversionConfig::builder()
        .renderer(Arc::new(FakeRenderer {
            delay: Duration::from_millis(0),
        }))
        .build()
        .expect("valid config")
}

fn write_sample_image(path: &Path) {
    let img = image::RgbImage::from_fn(8, 8, |x, y| {
        image::Rgb([(x * 32) as u8, (y * 32) as u8, 128])
    });
    img.save(path).expect("sample image should encode");
}

// ── Text and Word documents ─────────────────────────────────────────────────

#[test]
fn txt_to_docx_to_txt_preserves_lines() {
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("notes.txt");
    let docx = tmp.path().join("notes.docx");
    let back = tmp.path().join("back.txt");
    fs::write(&txt, "alpha\n\ngamma").unwrap();

    convert_checked(&txt, &docx, Extension::Txt, Extension::Docx, &config()).unwrap();
    convert_checked(&docx, &back, Extension::Docx, Extension::Txt, &config()).unwrap();

    // One paragraph per line, blank line included; joined back with \n.
    assert_eq!(fs::read_to_string(&back).unwrap(), "alpha\n\ngamma");
}

#[test]
fn docx_to_pdf_moves_the_renderer_artifact_into_place() {
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("memo.txt");
    let docx = tmp.path().join("memo.docx");
    let pdf = tmp.path().join("memo.pdf");
    fs::write(&txt, "memo body").unwrap();

    convert_checked(&txt, &docx, Extension::Txt, Extension::Docx, &config()).unwrap();
    convert_checked(&docx, &pdf, Extension::Docx, Extension::Pdf, &config()).unwrap();

    let body = fs::read_to_string(&pdf).unwrap();
    assert!(body.contains("memo.docx"), "got: {body}");
}

#[test]
fn concurrent_docx_to_pdf_requests_do_not_interfere() {
    // Two inputs with the SAME basename in different directories: with a
    // shared intermediate directory they would collide on report.pdf.
    let tmp_a = TempDir::new().unwrap();
    let tmp_b = TempDir::new().unwrap();

    let mut jobs = Vec::new();
    for dir in [&tmp_a, &tmp_b] {
        let txt = dir.path().join("source.txt");
        let docx = dir.path().join("report.docx");
        fs::write(&txt, "body").unwrap();
        convert_checked(&txt, &docx, Extension::Txt, Extension::Docx, &config()).unwrap();
        jobs.push((docx, dir.path().join("report.pdf")));
    }

    let slow_config = ConversionConfig::builder()
        .renderer(Arc::new(FakeRenderer {
            delay: Duration::from_millis(100),
        }))
        .build()
        .unwrap();

    std::thread::scope(|scope| {
        for (docx, pdf) in &jobs {
            let cfg = slow_config.clone();
            scope.spawn(move || {
                convert_checked(docx, pdf, Extension::Docx, Extension::Pdf, &cfg).unwrap();
            });
        }
    });

    for (docx, pdf) in &jobs {
        let body = fs::read_to_string(pdf).unwrap();
        assert!(
            body.contains(&docx.display().to_string()),
            "output {} does not belong to {}",
            pdf.display(),
            docx.display()
        );
    }
}

// ── Spreadsheets ────────────────────────────────────────────────────────────

#[test]
fn csv_to_xlsx_to_csv_round_trip_is_exact() {
    let tmp = TempDir::new().unwrap();
    let csv = tmp.path().join("people.csv");
    let xlsx = tmp.path().join("people.xlsx");
    let back = tmp.path().join("back.csv");
    fs::write(&csv, "name,age\nAl,30\nBo,40\n").unwrap();

    convert_checked(&csv, &xlsx, Extension::Csv, Extension::Xlsx, &config()).unwrap();
    convert_checked(&xlsx, &back, Extension::Xlsx, Extension::Csv, &config()).unwrap();

    assert_eq!(fs::read_to_string(&back).unwrap(), "name,age\nAl,30\nBo,40\n");
}

#[test]
fn csv_to_txt_is_tab_separated() {
    let tmp = TempDir::new().unwrap();
    let csv = tmp.path().join("people.csv");
    let txt = tmp.path().join("people.txt");
    fs::write(&csv, "name,age\nAl,30\n").unwrap();

    convert_checked(&csv, &txt, Extension::Csv, Extension::Txt, &config()).unwrap();

    assert_eq!(fs::read_to_string(&txt).unwrap(), "name\tage\nAl\t30\n");
}

#[test]
fn xlsx_to_txt_serialises_the_same_rows() {
    let tmp = TempDir::new().unwrap();
    let csv = tmp.path().join("in.csv");
    let xlsx = tmp.path().join("in.xlsx");
    let txt = tmp.path().join("out.txt");
    fs::write(&csv, "city,pop\nOslo,717710\n").unwrap();

    convert_checked(&csv, &xlsx, Extension::Csv, Extension::Xlsx, &config()).unwrap();
    convert_checked(&xlsx, &txt, Extension::Xlsx, Extension::Txt, &config()).unwrap();

    assert_eq!(fs::read_to_string(&txt).unwrap(), "city\tpop\nOslo\t717710\n");
}

// ── Images ──────────────────────────────────────────────────────────────────

#[test]
fn png_to_jpg_to_png_preserves_dimensions() {
    let tmp = TempDir::new().unwrap();
    let png = tmp.path().join("pixel.png");
    let jpg = tmp.path().join("pixel.jpg");
    let back = tmp.path().join("back.png");
    write_sample_image(&png);

    convert_checked(&png, &jpg, Extension::Png, Extension::Jpg, &config()).unwrap();
    convert_checked(&jpg, &back, Extension::Jpg, Extension::Png, &config()).unwrap();

    let img = image::open(&back).unwrap();
    assert_eq!((img.width(), img.height()), (8, 8));
}

#[test]
fn jpeg_source_is_accepted_for_png_target() {
    let tmp = TempDir::new().unwrap();
    let jpeg = tmp.path().join("photo.jpeg");
    let png = tmp.path().join("photo.png");
    write_sample_image(&jpeg);

    convert_checked(&jpeg, &png, Extension::Jpeg, Extension::Png, &config()).unwrap();
    assert!(image::open(&png).is_ok());
}

// ── Validation semantics ────────────────────────────────────────────────────

#[test]
fn pairs_outside_the_table_are_disallowed() {
    let tmp = TempDir::new().unwrap();
    let err = convert_checked(
        Path::new("photo.png"),
        &tmp.path().join("photo.docx"),
        Extension::Png,
        Extension::Docx,
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::DisallowedConversion { .. }));
}

#[test]
fn dispatcher_surfaces_unimplemented_pairs() {
    let tmp = TempDir::new().unwrap();
    // Bypass the table check on purpose: the dispatcher itself must refuse.
    let err = convert(
        Path::new("notes.txt"),
        &tmp.path().join("notes.xlsx"),
        Extension::Txt,
        Extension::Xlsx,
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));
}

// ── PDF content (needs the pdfium runtime library) ──────────────────────────

fn bind_pdfium() -> pdfium_render::prelude::Pdfium {
    use pdfium_render::prelude::Pdfium;
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(dir) if !dir.is_empty() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
        }
        _ => Pdfium::bind_to_system_library(),
    }
    .expect("pdfium_available() said the library loads");
    Pdfium::new(bindings)
}

/// Write a PDF whose pages carry the given texts; an empty text makes an
/// empty page.
fn write_pdf_with_pages(path: &Path, page_texts: &[&str]) {
    use pdfium_render::prelude::*;

    let pdfium = bind_pdfium();
    let mut document = pdfium.create_new_pdf().unwrap();
    let font = document.fonts_mut().helvetica();
    for text in page_texts {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::a4())
            .unwrap();
        if !text.is_empty() {
            page.objects_mut()
                .create_text_object(
                    PdfPoints::new(72.0),
                    PdfPoints::new(700.0),
                    *text,
                    font,
                    PdfPoints::new(12.0),
                )
                .unwrap();
        }
    }
    document.save_to_file(&path).unwrap();
}

#[test]
fn txt_to_pdf_writes_a_pdf_document() {
    skip_unless_pdfium!();
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("doc.txt");
    let pdf = tmp.path().join("doc.pdf");
    fs::write(&txt, "TITLE\n\nbody line").unwrap();

    convert_checked(&txt, &pdf, Extension::Txt, Extension::Pdf, &config()).unwrap();

    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
}

#[test]
fn pdf_to_txt_skips_pages_with_no_text() {
    skip_unless_pdfium!();
    let tmp = TempDir::new().unwrap();
    let pdf = tmp.path().join("three.pdf");
    let txt = tmp.path().join("three.txt");
    write_pdf_with_pages(&pdf, &["A", "", "C"]);

    convert_checked(&pdf, &txt, Extension::Pdf, Extension::Txt, &config()).unwrap();

    assert_eq!(fs::read_to_string(&txt).unwrap(), "A\nC\n");
}

#[test]
fn pdf_to_png_takes_only_the_first_page() {
    skip_unless_pdfium!();
    let tmp = TempDir::new().unwrap();
    let pdf = tmp.path().join("multi.pdf");
    let png = tmp.path().join("first.png");
    write_pdf_with_pages(&pdf, &["first page", "second page"]);

    convert_checked(&pdf, &png, Extension::Pdf, Extension::Png, &config()).unwrap();

    let img = image::open(&png).unwrap();
    assert!(img.width() > 0 && img.height() > 0);
    // A4 portrait: the rendered page must be taller than wide.
    assert!(img.height() > img.width());
}

#[test]
fn image_to_pdf_embeds_the_picture_on_one_page() {
    skip_unless_pdfium!();
    let tmp = TempDir::new().unwrap();
    let png = tmp.path().join("pixel.png");
    let pdf = tmp.path().join("pixel.pdf");
    write_sample_image(&png);

    convert_checked(&png, &pdf, Extension::Png, Extension::Pdf, &config()).unwrap();

    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

/// Sweep the whole table: every advertised pair converts a minimal valid
/// input into a non-empty output file.
#[test]
fn every_advertised_pair_has_a_working_routine() {
    skip_unless_pdfium!();
    let tmp = TempDir::new().unwrap();
    let config = config();

    // Minimal fixture per source format.
    let mut fixtures: Vec<(Extension, PathBuf)> = Vec::new();
    let txt = tmp.path().join("fixture.txt");
    fs::write(&txt, "HEADING\n\nplain body text").unwrap();
    fixtures.push((Extension::Txt, txt.clone()));

    let csv = tmp.path().join("fixture.csv");
    fs::write(&csv, "name,age\nAl,30\nBo,40\n").unwrap();
    fixtures.push((Extension::Csv, csv.clone()));

    let xlsx = tmp.path().join("fixture.xlsx");
    convert_checked(&csv, &xlsx, Extension::Csv, Extension::Xlsx, &config).unwrap();
    fixtures.push((Extension::Xlsx, xlsx));

    let docx = tmp.path().join("fixture.docx");
    convert_checked(&txt, &docx, Extension::Txt, Extension::Docx, &config).unwrap();
    fixtures.push((Extension::Docx, docx));

    for ext in [Extension::Png, Extension::Jpg, Extension::Jpeg] {
        let path = tmp.path().join(format!("fixture.{ext}"));
        write_sample_image(&path);
        fixtures.push((ext, path));
    }

    let pdf = tmp.path().join("fixture.pdf");
    convert_checked(&txt, &pdf, Extension::Txt, Extension::Pdf, &config).unwrap();
    fixtures.push((Extension::Pdf, pdf));

    for (source, input) in &fixtures {
        for target in matrix::permitted_targets(*source) {
            let output = tmp.path().join(format!("out_{source}_{target}.{target}"));
            convert_checked(input, &output, *source, *target, &config)
                .unwrap_or_else(|e| panic!("{source} -> {target} failed: {e}"));
            let size = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            assert!(size > 0, "{source} -> {target} produced an empty file");
        }
    }
}
