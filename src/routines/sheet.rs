//! Tabular conversions: csv/xlsx sources to csv/xlsx/txt/pdf targets.
//!
//! Both sources load into the same rows-by-named-columns [`Table`]; the
//! target picks the serialisation. csv and xlsx are structural round-trips,
//! txt is a tab-separated rendition of the same rows, and pdf is a real
//! tabular rendering (not HTML bytes wearing a `.pdf` extension).

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::format::Extension;
use crate::routines::pdfout::{
    self, PageSpans, TextSpan, GLYPH_ASPECT, PAGE_HEIGHT, PAGE_WIDTH,
};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Baseline-to-baseline distance as a multiple of the font size.
const LEADING: f32 = 1.4;

/// Rows by named columns, the common shape of every tabular source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Pad or clip every row to the header width so writers can rely on
    /// rectangular data.
    fn normalize(mut self) -> Self {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        self
    }
}

pub fn convert(
    input: &Path,
    staged: &Path,
    source: Extension,
    target: Extension,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    let table = match source {
        Extension::Csv => read_csv(input)?,
        Extension::Xlsx => read_xlsx(input)?,
        other => {
            return Err(ConvertError::UnsupportedConversion {
                source: other,
                target,
            })
        }
    };
    debug!(
        "Loaded table: {} columns x {} rows",
        table.headers.len(),
        table.rows.len()
    );

    match target {
        Extension::Csv => write_csv(&table, staged),
        Extension::Xlsx => write_xlsx(&table, staged),
        Extension::Txt => write_tsv(&table, staged),
        Extension::Pdf => write_pdf(&table, staged, config),
        other => Err(ConvertError::UnsupportedConversion {
            source,
            target: other,
        }),
    }
}

fn read_csv(input: &Path) -> Result<Table, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows }.normalize())
}

fn read_xlsx(input: &Path) -> Result<Table, ConvertError> {
    let mut workbook: Xlsx<_> = open_workbook(input)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConvertError::failed("workbook has no sheets"))??;

    let mut row_iter = range.rows();
    let headers = row_iter
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let rows = row_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table { headers, rows }.normalize())
}

/// Render a cell the way it will be typed back in: empty cells as empty
/// strings, whole floats without a fraction part.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn write_csv(table: &Table, staged: &Path) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_path(staged)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(table: &Table, staged: &Path) -> Result<(), ConvertError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            // Numeric-looking cells become real numbers so the sheet sorts
            // and sums like one.
            match cell.parse::<f64>() {
                Ok(n) if n.is_finite() => {
                    sheet.write_number((r + 1) as u32, c as u16, n)?;
                }
                _ => {
                    sheet.write_string((r + 1) as u32, c as u16, cell.as_str())?;
                }
            }
        }
    }

    workbook.save(staged)?;
    Ok(())
}

/// Tab-separated rendition: header line first, every line newline-terminated.
fn write_tsv(table: &Table, staged: &Path) -> Result<(), ConvertError> {
    let mut out = String::new();
    out.push_str(&table.headers.join("\t"));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    fs::write(staged, out)?;
    Ok(())
}

/// Tabular PDF: bold header row, then every data row, columns evenly
/// divided across the usable width, page breaks as needed.
fn write_pdf(table: &Table, staged: &Path, config: &ConversionConfig) -> Result<(), ConvertError> {
    let pages = layout(table, config);
    pdfout::write_text_pdf(&pages, staged)
}

fn layout(table: &Table, config: &ConversionConfig) -> Vec<PageSpans> {
    let margin = config.margin_pts;
    let size = config.body_font_size;
    let columns = table.headers.len().max(1);
    let column_width = (PAGE_WIDTH - 2.0 * margin) / columns as f32;
    // Clip cells a glyph short of the column edge so neighbours stay apart.
    let column_chars = ((column_width / (size * GLYPH_ASPECT)) as usize)
        .saturating_sub(1)
        .max(1);

    let mut pages: Vec<PageSpans> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - margin;

    emit_row(&mut pages, &mut y, &table.headers, true, column_width, column_chars, config);
    for row in &table.rows {
        emit_row(&mut pages, &mut y, row, false, column_width, column_chars, config);
    }

    pages
}

fn emit_row(
    pages: &mut Vec<PageSpans>,
    y: &mut f32,
    row: &[String],
    bold: bool,
    column_width: f32,
    column_chars: usize,
    config: &ConversionConfig,
) {
    let margin = config.margin_pts;
    let size = config.body_font_size;

    if *y - size * LEADING < margin {
        pages.push(Vec::new());
        *y = PAGE_HEIGHT - margin;
    }
    *y -= size * LEADING;

    for (i, cell) in row.iter().enumerate() {
        let clipped: String = cell.chars().take(column_chars).collect();
        if clipped.is_empty() {
            continue;
        }
        pages.last_mut().expect("at least one page").push(TextSpan {
            text: clipped,
            x: margin + i as f32 * column_width,
            y: *y,
            size,
            bold,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table {
            headers: vec!["name".into(), "age".into()],
            rows: vec![
                vec!["Al".into(), "30".into()],
                vec!["Bo".into(), "40".into()],
            ],
        }
    }

    #[test]
    fn normalize_pads_and_clips_rows_to_header_width() {
        let table = Table {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
        }
        .normalize();
        assert_eq!(table.rows[0], vec!["1".to_string(), String::new()]);
        assert_eq!(table.rows[1], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(30.0)), "30");
        assert_eq!(cell_to_string(&Data::String("Al".into())), "Al");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn tsv_is_header_then_rows_newline_terminated() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("t.txt");
        write_tsv(&sample(), &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "name\tage\nAl\t30\nBo\t40\n"
        );
    }

    #[test]
    fn pdf_layout_includes_headers_and_every_row() {
        let pages = layout(&sample(), &ConversionConfig::default());
        let spans: Vec<_> = pages.iter().flatten().collect();
        for needle in ["name", "age", "Al", "Bo", "30", "40"] {
            assert!(
                spans.iter().any(|s| s.text == needle),
                "missing cell {needle:?}"
            );
        }
        // Header row is bold, data rows are not.
        assert!(spans.iter().filter(|s| s.bold).count() == 2);
    }

    #[test]
    fn pdf_layout_breaks_onto_further_pages() {
        let table = Table {
            headers: vec!["n".into()],
            rows: (0..200).map(|i| vec![i.to_string()]).collect(),
        };
        let pages = layout(&table, &ConversionConfig::default());
        assert!(pages.len() > 1);
    }
}
