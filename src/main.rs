//! Command-line entry point: pairwise lexical similarity of the records
//! in a data file, one document per line.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use lexsim::{Matrix, Ordering, Result, SimilarityPipeline, Vocabulary, tokenize_file};

/// Compute the lexical similarity between the text records of a data file.
#[derive(Parser, Debug)]
#[command(name = "lexsim")]
#[command(about = "Pairwise lexical similarity of text documents", version)]
struct Args {
    /// Input data file, one document per line.
    data_file: Option<PathBuf>,

    /// Loop ordering for the multiply kernel.
    #[arg(long, default_value = "ikj", value_parser = parse_ordering)]
    order: Ordering,

    /// Tile size for the block-copy multiply; must evenly divide both the
    /// document count and the vocabulary size.
    #[arg(long)]
    block_size: Option<usize>,

    /// Maximum number of records to read from the data file.
    #[arg(long)]
    limit: Option<usize>,

    /// Length of the character n-gram tokens.
    #[arg(long, default_value_t = 3)]
    ngram_len: usize,

    /// Lowercase records before tokenization.
    #[arg(long)]
    ignore_case: bool,

    /// Worker threads for the parallel multiply.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Print the similarity matrix to stdout.
    #[arg(long)]
    print: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_ordering(s: &str) -> std::result::Result<Ordering, String> {
    s.parse()
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let Some(path) = args.data_file.clone() else {
        eprintln!("error: missing required data file argument");
        process::exit(1);
    };

    if let Err(err) = run(&args, &path) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).init();
}

fn run(args: &Args, path: &Path) -> Result<()> {
    let docs = tokenize_file(path, args.ngram_len, args.limit, args.ignore_case)?;
    let vocabulary = Vocabulary::from_documents(&docs);
    debug!(
        documents = docs.len(),
        vocabulary = vocabulary.len(),
        "tokenized input"
    );

    let mut pipeline = SimilarityPipeline::new(args.order).with_threads(args.threads);
    if let Some(block) = args.block_size {
        pipeline = pipeline.with_block_size(block);
    }
    let gram = pipeline.gram_matrix(&docs, &vocabulary)?;

    if args.print {
        print_matrix(&gram);
    }
    Ok(())
}

/// Fixed two-decimal row format: `<  1.00,  0.63 >`.
fn print_matrix(matrix: &Matrix) {
    for r in 0..matrix.rows() {
        let formatted: Vec<String> = matrix.row(r).iter().map(|v| format!("{v:6.2}")).collect();
        println!("<{} >", formatted.join(","));
    }
}
