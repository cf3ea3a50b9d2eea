//! CLI binary for filemorph.
//!
//! A thin shim over the library crate: it plays the caller role, resolving
//! paths, validating the extension pair against the compatibility table,
//! and invoking the dispatcher once per run.

use anyhow::{bail, Context, Result};
use clap::Parser;
use filemorph::{
    convert_checked, matrix, ConversionConfig, Extension, LibreOfficeRenderer,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a PDF to plain text
  filemorph report.pdf -o report.txt

  # Same conversion, target format spelled out; output lands in converted/
  filemorph report.pdf --to txt

  # Spreadsheet round-trips
  filemorph data.csv -o data.xlsx
  filemorph data.xlsx -o data.txt

  # Images
  filemorph photo.png -o photo.jpg
  filemorph photo.jpg -o photo.pdf

  # What can a docx be converted into?
  filemorph --list-formats docx

  # The whole compatibility table, as JSON
  filemorph --list-formats --json

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Directory containing the pdfium library (libpdfium.so /
                    libpdfium.dylib / pdfium.dll). Defaults to the system
                    library search path.
  RUST_LOG          Log filter, e.g. RUST_LOG=filemorph=debug
"#;

/// Convert between document, spreadsheet and image formats.
#[derive(Parser, Debug)]
#[command(
    name = "filemorph",
    version,
    about = "Convert between document, spreadsheet and image formats",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Input file. Its extension selects the source format.
    input: Option<PathBuf>,

    /// Output file. Its extension selects the target format.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target format when --output is omitted; the converted file is placed
    /// in the converted directory under the input's basename.
    #[arg(long, value_name = "EXT")]
    to: Option<String>,

    /// Print the permitted targets for EXT (or the whole table) and exit.
    #[arg(long, value_name = "EXT", num_args = 0..=1, default_missing_value = "")]
    list_formats: Option<String>,

    /// Emit --list-formats output as JSON.
    #[arg(long)]
    json: bool,

    /// Directory bare input filenames are resolved against.
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Directory for converted files when --output is omitted.
    #[arg(long, default_value = "converted")]
    converted_dir: PathBuf,

    /// LibreOffice binary used for docx -> pdf.
    #[arg(long, default_value = "soffice")]
    renderer: PathBuf,

    /// Renderer time limit in seconds.
    #[arg(long, default_value_t = 120)]
    renderer_timeout: u64,

    /// Longest-edge cap in pixels when rasterising PDF pages.
    #[arg(long, default_value_t = 2000)]
    max_raster_pixels: u32,

    /// JPEG encode quality (1-100).
    #[arg(long, default_value_t = 85)]
    jpeg_quality: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(token) = cli.list_formats.as_deref() {
        return list_formats(token, cli.json);
    }

    let config = ConversionConfig::builder()
        .upload_dir(cli.upload_dir.clone())
        .converted_dir(cli.converted_dir.clone())
        .max_raster_pixels(cli.max_raster_pixels)
        .jpeg_quality(cli.jpeg_quality)
        .renderer(Arc::new(LibreOfficeRenderer::new(
            cli.renderer.clone(),
            Duration::from_secs(cli.renderer_timeout),
        )))
        .build()?;

    let input = resolve_input(&cli, &config)?;
    let source = Extension::from_path(&input)?;
    let (output, target) = resolve_output(&cli, &input, &config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("{} -> {}", input.display(), output.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = convert_checked(&input, &output, source, target, &config);
    spinner.finish_and_clear();

    result.with_context(|| {
        format!("converting {} -> {}", input.display(), output.display())
    })?;
    println!("{}", output.display());
    Ok(())
}

/// The input as given, or, for a bare filename that does not exist in the
/// working directory, the same name under the upload directory.
fn resolve_input(cli: &Cli, config: &ConversionConfig) -> Result<PathBuf> {
    let input = cli
        .input
        .clone()
        .context("no input file given (see --help)")?;

    if !input.exists() && input.parent() == Some(Path::new("")) {
        let uploaded = config.upload_dir.join(&input);
        if uploaded.exists() {
            return Ok(uploaded);
        }
    }
    Ok(input)
}

fn resolve_output(
    cli: &Cli,
    input: &Path,
    config: &ConversionConfig,
) -> Result<(PathBuf, Extension)> {
    if let Some(output) = &cli.output {
        let target = Extension::from_path(output)?;
        return Ok((output.clone(), target));
    }
    if let Some(token) = &cli.to {
        let target = Extension::parse(token)?;
        let stem = input.file_stem().context("input has no basename")?;
        let name = format!("{}.{}", stem.to_string_lossy(), target);
        return Ok((config.converted_dir.join(name), target));
    }
    bail!("specify an output with -o <FILE> or a target format with --to <EXT>");
}

fn list_formats(token: &str, json: bool) -> Result<()> {
    if token.is_empty() {
        if json {
            let map: serde_json::Map<String, serde_json::Value> = Extension::ALL
                .iter()
                .map(|s| {
                    (
                        s.to_string(),
                        serde_json::json!(matrix::permitted_targets(*s)),
                    )
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        } else {
            for source in Extension::ALL {
                let targets: Vec<&str> = matrix::permitted_targets(source)
                    .iter()
                    .map(|t| t.as_str())
                    .collect();
                println!("{:<4} -> {}", source.as_str(), targets.join(", "));
            }
        }
        return Ok(());
    }

    let source = Extension::parse(token)?;
    let targets = matrix::permitted_targets(source);
    if json {
        println!("{}", serde_json::to_string(&targets)?);
    } else {
        for target in targets {
            println!("{target}");
        }
    }
    Ok(())
}
