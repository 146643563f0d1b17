use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use highlighter::draw::render_export;
use highlighter::export::{
    CompressionMode, ExportOptions, compact_strokes, options_from_config, parse_export,
    rectangles_from_export,
};
use highlighter::{
    Canvas, Config, ExtractionSettings, Stroke, encode_export, extract_regions, to_export,
};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HIGHLIGHTER_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "highlighter")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Extract, inspect and render freehand highlight regions")]
struct Cli {
    /// Config file to use instead of ~/.config/highlighter/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rectangles covered by each region as JSON
    Rects {
        /// File holding an export blob, or - for stdin
        input: String,
    },
    /// Print a summary of an export blob
    Inspect {
        /// File holding an export blob, or - for stdin
        input: String,
    },
    /// Render the regions of an export blob to a PNG
    Render {
        /// File holding an export blob, or - for stdin
        input: String,
        /// PNG file to write
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
        /// Output width (defaults to the recorded width)
        #[arg(long)]
        width: Option<u32>,
        /// Output height (defaults to the recorded height)
        #[arg(long)]
        height: Option<u32>,
    },
    /// Build an export blob from a JSON list of strokes
    Export {
        /// JSON file holding a stroke list, or - for stdin
        strokes: String,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Override the configured compression mode
        #[arg(long, value_enum)]
        compression: Option<CompressionArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompressionArg {
    Off,
    On,
    Auto,
}

impl From<CompressionArg> for CompressionMode {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Off => CompressionMode::Off,
            CompressionArg::On => CompressionMode::On,
            CompressionArg::Auto => CompressionMode::Auto,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = ExtractionSettings::from(&config.extraction);

    match cli.command {
        Command::Rects { input } => {
            let export = parse_export(&read_input(&input)?).context("Failed to read export data")?;
            let rectangles = rectangles_from_export(&export, &settings)
                .context("Failed to derive rectangles")?;
            println!("{}", serde_json::to_string_pretty(&rectangles)?);
        }
        Command::Inspect { input } => {
            let export = parse_export(&read_input(&input)?).context("Failed to read export data")?;
            println!("version: {}", export.version);
            println!("compressed: {}", export.compressed);
            println!("size: {}x{}", export.width, export.height);
            println!("regions: {}", export.regions.len());
        }
        Command::Render {
            input,
            output,
            width,
            height,
        } => {
            let export = parse_export(&read_input(&input)?).context("Failed to read export data")?;
            let width = width.unwrap_or(export.width);
            let height = height.unwrap_or(export.height);
            if width == 0 || height == 0 {
                bail!("Output size is {width}x{height}; pass --width and --height");
            }
            let canvas = Canvas::new(width, height)?;
            render_export(&canvas, &export).context("Failed to render regions")?;
            write_png(&canvas, &output)?;
            log::info!("Wrote {} regions to {}", export.regions.len(), output.display());
        }
        Command::Export {
            strokes,
            width,
            height,
            compression,
        } => {
            let strokes: Vec<Stroke> = serde_json::from_str(&read_input(&strokes)?)
                .context("Failed to parse stroke list")?;
            let strokes = compact_strokes(
                &strokes,
                config.extraction.simplify_tolerance,
                config.extraction.min_stroke_length,
            );
            let regions = extract_regions(width, height, &strokes, &[], &settings)
                .context("Failed to extract regions")?;
            let mut options: ExportOptions = options_from_config(&config.export);
            if let Some(mode) = compression {
                options.compression = mode.into();
            }
            let blob = encode_export(&to_export(width, height, &regions), &options)?;
            println!("{blob}");
        }
    }

    Ok(())
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
}

fn write_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    canvas
        .write_png(&mut writer)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))
}
