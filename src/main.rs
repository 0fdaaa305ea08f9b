use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::json;

use dnacst::{analyse_files, BuildAlgorithm, SuffixTrie};

/// Compressed suffix trie and LCS similarity for DNA sequences
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Emit results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose/info output (default: warnings only)
    #[arg(long, short = 'v', alias = "info", global = true)]
    verbose: bool,

    /// Debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Trace output
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate patterns in a DNA text
    Find {
        /// Text file (whitespace-separated tokens, FASTA or FASTQ; optionally gzipped)
        text: PathBuf,

        /// Patterns to look up
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Build with the quadratic reference builder instead of Ukkonen's method
        #[arg(long)]
        quadratic: bool,
    },
    /// Compute the LCS similarity of two texts and write the LCS to a file
    Similarity {
        first: PathBuf,
        second: PathBuf,
        /// Output file for the LCS (overwritten)
        output: PathBuf,
    },
    /// Print structural statistics of a text's suffix trie
    Stats {
        text: PathBuf,

        #[arg(long)]
        quadratic: bool,
    },
}

fn algorithm(quadratic: bool) -> BuildAlgorithm {
    if quadratic {
        BuildAlgorithm::Quadratic
    } else {
        BuildAlgorithm::Ukkonen
    }
}

fn main() {
    let args = Args::parse();
    let level = if args.trace {
        log::LevelFilter::Trace
    } else if args.debug {
        log::LevelFilter::Debug
    } else if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Err(error) = run(&args) {
        eprintln!("dnacst failed: {error:?}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Find {
            text,
            patterns,
            quadratic,
        } => {
            let trie = SuffixTrie::from_path(text, algorithm(*quadratic))
                .with_context(|| format!("Failed to build suffix trie from {}", text.display()))?;
            info!("Indexed {} symbols from {}", trie.len(), text.display());

            let positions = trie.find_many(patterns.as_slice());
            if args.json {
                let hits: Vec<_> = patterns
                    .iter()
                    .zip(&positions)
                    .map(|(pattern, position)| json!({"pattern": pattern, "position": position}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for (pattern, position) in patterns.iter().zip(&positions) {
                    let position = position.map_or(-1, |p| p as isize);
                    println!("{pattern}\t{position}");
                }
            }
        }
        Command::Similarity {
            first,
            second,
            output,
        } => {
            let report = analyse_files(first, second, output).with_context(|| {
                format!(
                    "Failed to compare {} with {}",
                    first.display(),
                    second.display()
                )
            })?;
            debug!("LCS witness: {}", report.witness);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.similarity);
            }
        }
        Command::Stats { text, quadratic } => {
            let trie = SuffixTrie::from_path(text, algorithm(*quadratic))
                .with_context(|| format!("Failed to build suffix trie from {}", text.display()))?;
            let stats = trie.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("text length\t{}", stats.text_len);
                println!("nodes\t{}", stats.nodes);
                println!("leaves\t{}", stats.leaves);
                println!("internal\t{}", stats.internal);
                println!("root degree\t{}", stats.root_degree);
            }
        }
    }
    Ok(())
}
