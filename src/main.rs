//! @ai:module:intent CLI entry point for scanning markdown and exporting decks
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on discovery, assembly, package, output, config

use anki_md::{
    align_content_left, discovery, output, write_package, DeckAssembler, DocumentScanner,
    ExportConfig, OutputFormat, ScanResult, SourceRecord,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const CONFIG_FILE_NAME: &str = "anki-md.toml";

#[derive(Parser)]
#[command(name = "anki-md")]
#[command(author, version, about = "Turn annotated markdown code blocks and callouts into flashcard decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of markdown files and write a deck package
    Export {
        /// Directory of markdown files to parse
        #[arg(long, default_value = ".")]
        input_dir: PathBuf,

        /// Directory for the resulting package (defaults to input_dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// File name of the resulting package
        #[arg(long)]
        package_name: Option<String>,

        /// Keep the original alignment instead of aligning note content left
        #[arg(long)]
        dont_align_content_left: bool,

        /// Keyword that marks a region as a flashcard
        #[arg(long)]
        keyword: Option<String>,

        /// Path to a TOML config file (defaults to <input_dir>/anki-md.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the records found in a file or directory
    Scan {
        /// Path to a markdown file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Keyword that marks a region as a flashcard
        #[arg(long)]
        keyword: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

struct ExportArgs {
    input_dir: PathBuf,
    output_dir: Option<PathBuf>,
    package_name: Option<String>,
    dont_align_content_left: bool,
    keyword: Option<String>,
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("anki_md=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input_dir,
            output_dir,
            package_name,
            dont_align_content_left,
            keyword,
            config,
        } => run_export(ExportArgs {
            input_dir,
            output_dir,
            package_name,
            dont_align_content_left,
            keyword,
            config,
        }),

        Commands::Scan {
            path,
            keyword,
            format,
        } => run_scan(&path, keyword, format.into()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// @ai:intent Resolve config from an explicit file, the input dir, or defaults
/// @ai:effects fs:read
fn load_config(explicit: Option<&Path>, input_dir: &Path) -> anki_md::Result<ExportConfig> {
    if let Some(path) = explicit {
        return ExportConfig::load(path);
    }

    let implicit = input_dir.join(CONFIG_FILE_NAME);
    if implicit.is_file() {
        tracing::info!("Using config {}", implicit.display());
        return ExportConfig::load(&implicit);
    }

    Ok(ExportConfig::default())
}

/// @ai:intent Scan, assemble and write a package
/// @ai:effects fs:read, fs:write
fn run_export(args: ExportArgs) -> anki_md::Result<ExitCode> {
    let mut config = load_config(args.config.as_deref(), &args.input_dir)?;
    if let Some(keyword) = args.keyword {
        config.keyword = keyword;
    }
    if let Some(package_name) = args.package_name {
        config.package_name = package_name;
    }
    if args.dont_align_content_left {
        config.align_content_left = false;
    }

    let output_dir = args.output_dir.unwrap_or_else(|| args.input_dir.clone());
    for dir in [&args.input_dir, &output_dir] {
        if !dir.is_dir() {
            return Err(anki_md::Error::InvalidDirectory(dir.clone()));
        }
    }

    let scanner = DocumentScanner::new(&config.keyword);
    let ScanResult {
        files_checked,
        records,
    } = discovery::scan_directory(&args.input_dir, &scanner)?;

    println!("Checked {} files", files_checked);
    println!("Found {} '{}' codeblocks", records.codeblocks.len(), config.keyword);
    println!("Found {} callouts", records.callouts.len());

    if records.is_empty() {
        println!("Found no notes or callouts to create a deck with. Aborting.");
        return Ok(ExitCode::SUCCESS);
    }

    let (codeblocks, callouts): (Vec<SourceRecord>, Vec<SourceRecord>) =
        if config.align_content_left {
            (
                records.codeblocks.into_iter().map(align_content_left).collect(),
                records.callouts.into_iter().map(align_content_left).collect(),
            )
        } else {
            (records.codeblocks, records.callouts)
        };

    let decks = DeckAssembler::new(&config).assemble(codeblocks, callouts);

    let package_path = output_dir.join(&config.package_name);
    write_package(&decks, &package_path)?;

    let shown = std::fs::canonicalize(&package_path).unwrap_or(package_path);
    print!("{}", output::format_export_summary(&decks, &shown));

    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Print records found in a file or directory
/// @ai:effects fs:read
fn run_scan(path: &Path, keyword: Option<String>, format: OutputFormat) -> anki_md::Result<ExitCode> {
    let keyword = keyword.unwrap_or_else(|| anki_md::DEFAULT_KEYWORD.to_string());
    let scanner = DocumentScanner::new(&keyword);

    let result = if path.is_file() {
        discovery::scan_file(path, &scanner)?
    } else {
        discovery::scan_directory(path, &scanner)?
    };

    println!("{}", output::format_scan_result(&result, format));
    Ok(ExitCode::SUCCESS)
}
