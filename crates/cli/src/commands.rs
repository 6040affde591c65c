//! Subcommand implementations: index construction, search output, REPL, stats.

use hybridqa_core::bm25::Bm25Params;
use hybridqa_core::config;
use hybridqa_core::embedding::HashEmbedder;
use hybridqa_core::{
    load_knowledge, HybridIndex, SearchHit, SearchMode, SearchOptions, Stopwords,
};
use serde::Serialize;
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the knowledge base comes from and how it is indexed.
#[derive(Debug, Clone, clap::Args)]
pub struct IndexArgs {
    /// JSON-lines knowledge base (one {"question", "answer"} object per line)
    #[arg(long, env = "HYBRIDQA_KB", default_value = config::DEFAULT_KB_PATH)]
    pub kb: PathBuf,

    /// Stopword file (one token per line)
    #[arg(long, env = "HYBRIDQA_STOPWORDS", default_value = config::DEFAULT_STOPWORDS_PATH)]
    pub stopwords: PathBuf,

    /// Build without an embedder (vector scores are always 0)
    #[arg(long, default_value_t = false)]
    pub no_vectors: bool,

    /// Dimension of the feature-hashing embedder
    #[arg(long, env = "HYBRIDQA_EMBEDDING_DIM", default_value_t = config::DEFAULT_EMBEDDING_DIM)]
    pub embedding_dim: usize,

    /// BM25 term frequency saturation
    #[arg(long, default_value_t = config::BM25_K1)]
    pub k1: f32,

    /// BM25 length normalization
    #[arg(long, default_value_t = config::BM25_B)]
    pub b: f32,
}

/// Per-query ranking knobs.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct SearchArgs {
    /// Ranking mode: lexical (alias bm25), vector, or hybrid
    #[arg(long, env = "HYBRIDQA_MODE", default_value = "hybrid")]
    pub mode: SearchMode,

    /// Number of results
    #[arg(long, env = "HYBRIDQA_TOPK", default_value_t = config::DEFAULT_TOPK)]
    pub topk: usize,

    /// Lexical weight in hybrid mode
    #[arg(long, env = "HYBRIDQA_ALPHA", default_value_t = config::DEFAULT_ALPHA, allow_negative_numbers = true)]
    pub alpha: f32,

    /// Vector weight in hybrid mode
    #[arg(long, env = "HYBRIDQA_BETA", default_value_t = config::DEFAULT_BETA, allow_negative_numbers = true)]
    pub beta: f32,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl SearchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.mode,
            topk: self.topk,
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}

/// Load the knowledge base and stopwords from disk and build the index.
pub fn build_index(args: &IndexArgs) -> Result<HybridIndex, Box<dyn Error>> {
    let items = load_knowledge(&args.kb)?;
    let stopwords = Stopwords::load(&args.stopwords)?;
    let mut builder = HybridIndex::builder(items)
        .stopwords(stopwords)
        .bm25_params(Bm25Params {
            k1: args.k1,
            b: args.b,
        });

    if args.no_vectors {
        tracing::info!("Vector store disabled by --no-vectors");
    } else {
        match HashEmbedder::new(args.embedding_dim) {
            Ok(embedder) => builder = builder.embedder(Arc::new(embedder)),
            Err(e) => tracing::warn!("Embedder not created: {}", e),
        }
    }
    Ok(builder.build()?)
}

/// A hit joined with its knowledge item, as printed.
#[derive(Debug, Serialize)]
pub struct RenderedHit<'a> {
    pub rank: usize,
    pub index: usize,
    pub score: f32,
    pub lexical_score: f32,
    pub vector_score: f32,
    pub question: &'a str,
    pub answer: &'a str,
}

fn render<'a>(
    index: &'a HybridIndex,
    hits: &[SearchHit],
) -> Result<Vec<RenderedHit<'a>>, Box<dyn Error>> {
    hits.iter()
        .enumerate()
        .map(|(rank, hit)| -> Result<RenderedHit<'a>, Box<dyn Error>> {
            let item = index.get_item(hit.index)?;
            Ok(RenderedHit {
                rank: rank + 1,
                index: hit.index,
                score: hit.score,
                lexical_score: hit.lexical_score,
                vector_score: hit.vector_score,
                question: &item.question,
                answer: &item.answer,
            })
        })
        .collect()
}

fn check_query(query: &str) -> Result<(), Box<dyn Error>> {
    if query.len() > config::MAX_QUERY_LEN {
        return Err(format!(
            "query is {} bytes, maximum is {}",
            query.len(),
            config::MAX_QUERY_LEN
        )
        .into());
    }
    Ok(())
}

/// Run one query and write the ranked hits to `out`.
pub fn run_search<W: Write>(
    index: &HybridIndex,
    query: &str,
    args: &SearchArgs,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    check_query(query)?;
    let hits = index.search(query, &args.options());
    let rendered = render(index, &hits)?;

    if args.json {
        serde_json::to_writer(&mut *out, &rendered)?;
        writeln!(out)?;
        return Ok(());
    }
    if rendered.is_empty() {
        writeln!(out, "(no results)")?;
    }
    for hit in &rendered {
        writeln!(
            out,
            "{:>2}. [#{}] score={:.4} (lexical={:.4}, vector={:.4})",
            hit.rank, hit.index, hit.score, hit.lexical_score, hit.vector_score
        )?;
        writeln!(out, "    Q: {}", hit.question)?;
        writeln!(out, "    A: {}", hit.answer)?;
    }
    Ok(())
}

/// Answer one query per input line until EOF. Blank lines are skipped.
pub fn run_repl<R: BufRead, W: Write>(
    index: &HybridIndex,
    input: R,
    args: &SearchArgs,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if let Err(e) = run_search(index, query, args, out) {
            writeln!(out, "error: {}", e)?;
        }
    }
    Ok(())
}

/// Print index statistics as JSON.
pub fn run_stats<W: Write>(index: &HybridIndex, out: &mut W) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, &index.stats())?;
    writeln!(out)?;
    Ok(())
}
