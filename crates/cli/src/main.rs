use clap::{Parser, Subcommand};
use std::io;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{IndexArgs, SearchArgs};

#[derive(Parser)]
#[command(
    name = "hybridqa",
    about = "Hybrid BM25 + vector search over a question/answer knowledge base"
)]
struct Args {
    #[command(flatten)]
    index: IndexArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank knowledge items for a single query
    Search {
        /// Query text
        query: String,

        #[command(flatten)]
        search: SearchArgs,
    },
    /// Read queries from stdin, one per line
    Repl {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print index statistics as JSON
    Stats,
}

/// Directives used when `RUST_LOG` is unset or blank.
const DEFAULT_LOG_FILTER: &str = "hybridqa_core=info,hybridqa_cli=info";

/// `RUST_LOG` wins when it is set; otherwise both crates log at info.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG {:?}: {}", directives, e);
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .json()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let args = Args::parse();

    let index = match commands::build_index(&args.index) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: failed to build index: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Search { query, search } => {
            commands::run_search(&index, &query, &search, &mut out)?
        }
        Command::Repl { search } => {
            tracing::info!("Reading queries from stdin ({} mode)", search.mode);
            commands::run_repl(&index, io::stdin().lock(), &search, &mut out)?
        }
        Command::Stats => commands::run_stats(&index, &mut out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("hybridqa_core=info"), "got {filter}");
        assert!(filter.contains("hybridqa_cli=info"), "got {filter}");
        assert_eq!(log_filter(Some("  ")).to_string(), filter);
    }

    #[test]
    fn test_rust_log_overrides_defaults() {
        let filter = log_filter(Some("off")).to_string();
        assert_eq!(filter, "off");

        let filter = log_filter(Some("hybridqa_core=debug")).to_string();
        assert!(filter.contains("hybridqa_core=debug"), "got {filter}");
        assert!(!filter.contains("hybridqa_core=info"), "got {filter}");
    }
}
