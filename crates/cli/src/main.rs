//! CLI tool for extracting text from DOCX/PPTX files and classifying
//! markup lines into blocks.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docpipe_core::ContainerKind;
use docpipe_ooxml::{join_units, render_markdown, Container, Extractor, MissingPartPolicy};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Extract ordered text from Office containers and classify markup.
#[derive(Parser, Debug)]
#[command(name = "docpipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract text from .docx or .pptx files
    Extract(ExtractArgs),
    /// Classify the lines of a text file into blocks, printed as JSON
    Blocks(BlocksArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Input file(s) (.docx or .pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Container kind (default: from extension, then from archive contents)
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Fail when the document part is missing instead of producing empty output
    #[arg(long)]
    strict: bool,

    /// Prefix every slide with a "## Slide N" heading
    #[arg(short, long)]
    markdown: bool,

    /// Write text units as JSON
    #[arg(long, conflicts_with = "markdown")]
    json: bool,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,
}

#[derive(Args, Debug)]
struct BlocksArgs {
    /// Input text file, or "-" for stdin
    input: PathBuf,

    /// Group consecutive list items and table rows
    #[arg(short, long)]
    grouped: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Docx,
    Pptx,
}

impl From<KindArg> for ContainerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Docx => ContainerKind::WordProcessing,
            KindArg::Pptx => ContainerKind::SlideDeck,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Extract(args) => run_extract(&args),
        Command::Blocks(args) => run_blocks(&args),
    }
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let policy = if args.strict {
        MissingPartPolicy::Strict
    } else {
        MissingPartPolicy::Empty
    };
    let extractor = Extractor::new().with_missing_part_policy(policy);

    let mut failed = 0;
    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        if let Err(e) = extract_one(input_path, args, &extractor) {
            eprintln!("Error processing {}: {:#}", input_path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed", failed, args.input.len());
    }
    Ok(())
}

/// Extract one input and print it or write it next to the input.
fn extract_one(input_path: &Path, args: &ExtractArgs, extractor: &Extractor) -> Result<()> {
    let output = process_file(input_path, args, extractor)?;

    if args.print {
        println!("{}", output);
        return Ok(());
    }

    let extension = if args.json { "json" } else { "md" };
    let output_path = get_output_path(input_path, args.output.as_ref(), extension)?;
    write_output(&output_path, &output)?;
    log::info!("Written to: {}", output_path.display());

    Ok(())
}

/// Extract a single container and render it as text.
fn process_file(input_path: &Path, args: &ExtractArgs, extractor: &Extractor) -> Result<String> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let mut container = Container::open(BufReader::new(file))?;

    let kind = args
        .kind
        .map(ContainerKind::from)
        .or_else(|| ContainerKind::from_path(input_path))
        .or_else(|| container.detect_kind())
        .ok_or_else(|| anyhow::anyhow!("Could not detect container kind"))?;

    log::debug!("Extracting {:?} ({} entries)", kind, container.len());
    let units = extractor.extract_container(&mut container, kind)?;
    log::info!("  Found {} {}(s)", units.len(), kind.unit_name());

    let output = if args.json {
        serde_json::to_string_pretty(&units)?
    } else if args.markdown {
        render_markdown(&units, kind)
    } else {
        join_units(&units, kind)
    };

    Ok(output)
}

fn run_blocks(args: &BlocksArgs) -> Result<()> {
    let mut text = String::new();
    if args.input.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
    }

    let blocks = docpipe_markup::transduce_str(&text);
    log::debug!("Classified {} block(s)", blocks.len());

    let json = if args.grouped {
        serde_json::to_string_pretty(&docpipe_markup::group_blocks(blocks))?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    println!("{}", json);

    Ok(())
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    extension: &str,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    if !content.is_empty() && !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }

    Ok(())
}
