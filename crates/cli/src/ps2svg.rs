//! ps2svg - Convert recorded PostScript graphics operator traces to SVG
//!
//! Replays the drawing operators a PostScript interpreter reported and
//! writes the resulting page as a standalone SVG document.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use psvg_core::params::{ConversionParams, ShadingParams};
use psvg_core::path::PathFormat;
use psvg_core::svg::SvgPage;
use psvg_core::trace::{self, TraceFormat};
use psvg_core::PsGraphicsHandler;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Format of the input trace.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum InputFormat {
    /// One `operator operand...` per line (default)
    #[default]
    Text,
    /// One `{"op": ..., "args": [...]}` object per line
    Jsonl,
}

impl From<InputFormat> for TraceFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Text => TraceFormat::Text,
            InputFormat::Jsonl => TraceFormat::JsonLines,
        }
    }
}

/// Convert a recorded PostScript graphics operator trace to SVG.
#[derive(Parser, Debug)]
#[command(name = "ps2svg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the operator trace, or "-" for stdin
    trace: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Format of the operator trace
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: InputFormat,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    // === Conversion options ===
    /// Intersect nested clip paths instead of referencing them
    #[arg(long = "clip-intersections", action = ArgAction::SetTrue)]
    clip_intersections: bool,

    /// Maximum extent of flat-colored shading segments
    #[arg(long = "segment-size", default_value = "20")]
    segment_size: f64,

    /// Let adjacent shading segments overlap slightly
    #[arg(long = "segment-overlap", action = ArgAction::SetTrue)]
    segment_overlap: bool,

    /// Maximum color difference of shading regions drawn as one segment
    #[arg(long = "simplify-delta", default_value = "0.01")]
    simplify_delta: f64,

    /// Write path data with relative commands
    #[arg(long, action = ArgAction::SetTrue)]
    relative: bool,

    /// Keep the PostScript y axis pointing up
    #[arg(long = "no-flip", action = ArgAction::SetTrue)]
    no_flip: bool,
}

/// Build ConversionParams from command line arguments.
fn build_params(args: &Args) -> Result<ConversionParams> {
    if args.segment_size.is_nan() || args.segment_size <= 0.0 {
        anyhow::bail!("segment size must be positive, got {}", args.segment_size);
    }
    if args.simplify_delta.is_nan() || args.simplify_delta < 0.0 {
        anyhow::bail!("simplify delta must not be negative, got {}", args.simplify_delta);
    }
    Ok(ConversionParams {
        compute_clip_intersections: args.clip_intersections,
        shading: ShadingParams::new(args.segment_size, args.segment_overlap, args.simplify_delta),
        path_format: if args.relative {
            PathFormat::Relative
        } else {
            PathFormat::Absolute
        },
        ..ConversionParams::default()
    })
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("failed to read trace from stdin")
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = build_params(&args)?;
    let input = read_input(&args.trace)?;
    let ops = trace::parse(&input, args.format.into())
        .with_context(|| format!("failed to parse {}", args.trace.display()))?;
    tracing::debug!(operators = ops.len(), "trace loaded");

    let mut page = SvgPage::new();
    {
        let mut handler = PsGraphicsHandler::new(&mut page, params);
        if !args.no_flip {
            // PostScript's y axis points up, SVG's down
            handler.do_setmatrix((1.0, 0.0, 0.0, -1.0, 0.0, 0.0));
        }
        for (line, err) in handler.replay(ops) {
            tracing::warn!(line, "{err}");
        }
    }

    let document = page.to_svg_document();
    if args.outfile == "-" {
        io::stdout()
            .lock()
            .write_all(document.as_bytes())
            .context("failed to write output")?;
    } else {
        fs::write(&args.outfile, document)
            .with_context(|| format!("failed to write {}", args.outfile))?;
    }
    Ok(())
}
