//! Convert a PowerPoint presentation to Markdown.
//!
//! # Usage
//!
//! ```bash
//! # Write deck.md and images/ next to the input
//! pptx2md deck.pptx
//!
//! # Explicit output path, no image extraction
//! pptx2md deck.pptx -o out/deck.md --no-images
//!
//! # Wider row banding (EMU), debug logging
//! pptx2md deck.pptx --band-tolerance 150000 -v
//!
//! # Dump slide fragments as JSON instead of writing Markdown
//! pptx2md deck.pptx --json
//! ```

use clap::Parser;
use pptx_oxide::config::{
    BAND_TOLERANCE, ConversionOptions, DEFAULT_IMAGE_DIR, LayoutConfig, SHORT_TEXT_THRESHOLD,
};
use pptx_oxide::{PptxConverter, Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert PPTX slides to Markdown, rebuilding tables from aligned text boxes
#[derive(Parser, Debug)]
#[command(name = "pptx2md")]
#[command(version, about, long_about = None)]
struct Args {
    /// Presentation to convert
    input: PathBuf,

    /// Markdown output path (default: input with .md extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Vertical distance in EMU below which text boxes share a row
    #[arg(long, default_value_t = BAND_TOLERANCE)]
    band_tolerance: i64,

    /// Character count below which a single aligned row stays a plain line
    #[arg(long, default_value_t = SHORT_TEXT_THRESHOLD)]
    short_text_threshold: usize,

    /// Skip picture extraction
    #[arg(long)]
    no_images: bool,

    /// Image directory, relative to the output file
    #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
    image_dir: String,

    /// Omit the `# <file name>` heading
    #[arg(long)]
    no_title: bool,

    /// Print slide fragments as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> ConversionOptions {
        let layout = LayoutConfig::new()
            .with_band_tolerance(self.band_tolerance)
            .with_short_text_threshold(self.short_text_threshold);
        ConversionOptions::new()
            .with_layout(layout)
            .with_images(!self.no_images)
            .with_image_dir(self.image_dir.clone())
            .with_document_title(!self.no_title)
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("md"))
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let converter = PptxConverter::with_options(args.options());

    if args.json {
        let document = converter.convert(&args.input)?;
        println!("{}", document.to_json()?);
        return Ok(());
    }

    let output = args.output_path();
    let document = converter.convert_file(&args.input, &output)?;
    if !document.assets.is_empty() {
        log::info!(
            "Extracted {} images to {}",
            document.assets.len(),
            document.asset_dir_for(&output).display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}: {}", args.input.display(), e);
            ExitCode::FAILURE
        },
    }
}
