use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use retitle_core::csv_io::{self, Columns};
use retitle_core::vocabulary::VocabularyFile;
use retitle_core::{
    DedupPolicy, Deduplicator, Result, Retitler, Stats, TitleNormalizer, Vocabulary,
};

/// retitle — canonical, collision-free catalog titles
///
/// Normalize product titles from a catalog export and write an import file.
#[derive(Parser)]
#[command(name = "retitle", version, about, long_about = None)]
struct Cli {
    /// Suppress summary output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize and deduplicate every title in a CSV export
    Transform {
        /// Path to the catalog export
        input: PathBuf,
        /// Path of the import file to write
        #[arg(short, long, default_value = "shopify_import.csv")]
        output: PathBuf,
        /// JSON vocabulary file replacing the built-in tokens
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Append the handle to titles still duplicated after all tiers
        #[arg(long)]
        strict: bool,
        /// Header of the handle column
        #[arg(long, default_value = "Handle")]
        handle_column: String,
        /// Header of the title column
        #[arg(long, default_value = "Title")]
        title_column: String,
        /// Print run statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical form of one or more titles
    Title {
        /// Raw titles
        #[arg(required = true)]
        titles: Vec<String>,
        /// JSON vocabulary file replacing the built-in tokens
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },

    /// List vocabulary tokens in match order
    Vocabulary {
        /// JSON vocabulary file replacing the built-in tokens
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Transform {
            input,
            output,
            vocabulary,
            strict,
            handle_column,
            title_column,
            json,
        } => {
            let columns = Columns {
                handle: handle_column,
                title: title_column,
            };
            let policy = if strict {
                DedupPolicy::Strict
            } else {
                DedupPolicy::Faithful
            };
            cmd_transform(&input, &output, vocabulary.as_deref(), policy, &columns, json, cli.quiet)
        }
        Commands::Title { titles, vocabulary } => cmd_title(&titles, vocabulary.as_deref()),
        Commands::Vocabulary { vocabulary, json } => cmd_vocabulary(vocabulary.as_deref(), json),
        Commands::Version => {
            println!(
                "retitle {} (retitle-core {})",
                env!("CARGO_PKG_VERSION"),
                retitle_core::VERSION
            );
            Ok(0)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(p) => Vocabulary::load(p),
        None => Ok(Vocabulary::default()),
    }
}

// ── Commands ───────────────────────────────────────────────

fn cmd_transform(
    input: &Path,
    output: &Path,
    vocabulary: Option<&Path>,
    policy: DedupPolicy,
    columns: &Columns,
    json: bool,
    quiet: bool,
) -> Result<i32> {
    let retitler = Retitler::new(
        TitleNormalizer::new(load_vocabulary(vocabulary)?),
        Deduplicator::new(policy),
    );

    let records = csv_io::read_path(input, columns)?;
    tracing::info!(path = %input.display(), rows = records.len(), "read catalog export");

    let report = retitler.run(records);
    csv_io::write_path(output, &report.records)?;
    tracing::info!(path = %output.display(), rows = report.records.len(), "wrote import file");

    if !quiet {
        print_summary(&report.stats, output, json)?;
    }

    Ok(if report.is_unique() { 0 } else { 1 })
}

fn print_summary(stats: &Stats, output: &Path, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(stats)?;
        println!("{}", text);
        return Ok(());
    }

    println!(
        "{} Wrote {} products to {}",
        "✓".green(),
        stats.products,
        output.display()
    );
    println!(
        "  {} rows read, {} without title skipped",
        stats.input_rows, stats.skipped_empty
    );
    println!(
        "  {} canonical titles, {} deduplicated",
        stats.canonical_titles, stats.collided_titles
    );
    for title in &stats.unresolved {
        println!("  {} still duplicated: {}", "⚠".yellow(), title);
    }
    Ok(())
}

fn cmd_title(titles: &[String], vocabulary: Option<&Path>) -> Result<i32> {
    let normalizer = TitleNormalizer::new(load_vocabulary(vocabulary)?);
    for title in titles {
        println!("{}", normalizer.normalize(title));
    }
    Ok(0)
}

fn cmd_vocabulary(vocabulary: Option<&Path>, json: bool) -> Result<i32> {
    let vocab = load_vocabulary(vocabulary)?;
    let tokens: Vec<String> = vocab.iter().map(|t| t.as_str().to_string()).collect();
    if json {
        let text = serde_json::to_string_pretty(&VocabularyFile { tokens })?;
        println!("{}", text);
    } else {
        for token in tokens {
            println!("{}", token);
        }
    }
    Ok(0)
}
