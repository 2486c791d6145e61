//! txt2pdf - Convert a plain text file into a PDF
//!
//! Usage:
//!   txt2pdf notes.md notes.pdf
//!   txt2pdf --page-size a4 --max-chars 80 --check notes.md notes.pdf

use clap::{ArgAction, Parser, ValueEnum};
use plainpdf::api::convert_file;
use plainpdf::config::{EncodingPolicy, LayoutConfig, PageSize};
use plainpdf::xref::check_file;
use std::path::PathBuf;

/// Page size choices.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum PageSizeArg {
    /// US Letter, 612 x 792 pt (default)
    #[default]
    Letter,
    /// A4, 595 x 842 pt
    A4,
    /// US Legal, 612 x 1008 pt
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

/// Lay out a plain text file on fixed-size pages in Helvetica and write a
/// minimal PDF 1.4 document.
#[derive(Parser, Debug)]
#[command(name = "txt2pdf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input text file (UTF-8)
    input: PathBuf,

    /// Output PDF file
    output: PathBuf,

    /// Page size
    #[arg(long = "page-size", value_enum, default_value_t = PageSizeArg::Letter)]
    page_size: PageSizeArg,

    /// Margin on the top, bottom and left edges, in points
    #[arg(long, default_value = "72")]
    margin: f64,

    /// Font size in points
    #[arg(long = "font-size", default_value = "11")]
    font_size: f64,

    /// Distance between baselines in points
    #[arg(long = "line-height", default_value = "14")]
    line_height: f64,

    /// Wrap lines longer than this many characters
    #[arg(long = "max-chars", default_value = "90")]
    max_chars: usize,

    /// Write '?' for characters outside Latin-1 instead of failing
    #[arg(long = "replace-unencodable", action = ArgAction::SetTrue)]
    replace_unencodable: bool,

    /// Re-read the written file and verify its cross-reference table
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

impl Args {
    fn layout(&self) -> LayoutConfig {
        let encoding = if self.replace_unencodable {
            EncodingPolicy::Replace
        } else {
            EncodingPolicy::Strict
        };
        LayoutConfig::new()
            .with_page_size(self.page_size.into())
            .with_margin(self.margin)
            .with_font_size(self.font_size)
            .with_line_height(self.line_height)
            .with_max_chars(self.max_chars)
            .with_encoding(encoding)
    }
}

fn run(args: &Args) -> plainpdf::Result<()> {
    let summary = convert_file(&args.input, &args.output, &args.layout())?;
    log::info!(
        "{} lines on {} pages, {} objects, {} bytes",
        summary.lines,
        summary.pages,
        summary.objects,
        summary.bytes
    );

    if args.check {
        let structure = check_file(&args.output)?;
        println!(
            "Checked {}: {} objects, xref at byte {}",
            args.output.display(),
            structure.object_count(),
            structure.startxref
        );
    }

    println!("Wrote {}", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
