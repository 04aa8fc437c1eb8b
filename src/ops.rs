//! Shared operation wrappers for all interfaces (CLI, plugin).
//!
//! Each `op_*` function is a pure, synchronous wrapper around one or more
//! `algo` modules. Input is the raw row table as `serde_json::Value`s plus a
//! `Filter`; output is a `serde_json::Value`. No dependency on clap or
//! nu-plugin.
//!
//! Every call parses and filters the rows from scratch. Nothing is cached
//! between calls.

use rayon::prelude::*;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::algo::filter::Filter;
use crate::algo::ngram::{self, Boundary};
use crate::algo::row::Row;
use crate::algo::stopwords::Stopwords;
use crate::algo::wordfreq::{self, WordCloudConfig, WordCount};
use crate::algo::{category, cloud, summary, timeseries};
use crate::config::DashboardConfig;
use crate::error::{Error, Result};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Parse every JSON row. Malformed rows become rows with absent fields.
pub fn parse_rows(rows: &[Value]) -> Vec<Row> {
    rows.par_iter().map(Row::from_json).collect()
}

fn ngram_table(view: &[&Row], n: usize, top_k: usize, boundary: Boundary) -> Value {
    let top = ngram::top_ngrams(view, n, top_k, boundary);
    json!({
        "n": n,
        "boundary": boundary.as_str(),
        "ngrams": top,
    })
}

fn category_table(view: &[&Row]) -> Value {
    let table = category::category_sentiment(view);
    json!({
        "sentiments": table.sentiments(),
        "categories": table,
    })
}

fn wordcloud_section(words: &[WordCount], config: &WordCloudConfig) -> Value {
    let total: usize = words.iter().map(|w| w.count).sum();
    let mut frequencies = Map::new();
    for w in words {
        frequencies.insert(w.word.clone(), json!(w.count));
    }
    json!({
        "total_words": total,
        "unique_words": words.len(),
        "seed": config.seed,
        "frequencies": Value::Object(frequencies),
        "cloud": cloud::plan(words, config),
    })
}

fn summary_section(view: &[&Row]) -> Value {
    let stats = summary::summarize(view);
    json!({
        "total": stats.total,
        "avg_interactions": stats.avg_interactions,
        "avg_comments": stats.avg_comments,
        "avg_shares": stats.avg_shares,
        "sentiment": summary::sentiment_distribution(view),
    })
}

// ── Operations ───────────────────────────────────────────────────────────────

/// Top-`top_k` n-grams of width `n` over the filtered rows.
pub fn op_ngrams(
    rows: &[Value],
    filter: &Filter,
    n: usize,
    top_k: usize,
    boundary: Boundary,
) -> Result<Value> {
    if n == 0 {
        return Err(Error::InvalidNgramSize);
    }
    let table = parse_rows(rows);
    let view = filter.apply(&table);
    debug!(rows = view.len(), n, top_k, "computing n-gram table");
    Ok(ngram_table(&view, n, top_k, boundary))
}

/// Daily (date, sentiment) counts over the filtered rows.
pub fn op_trend(rows: &[Value], filter: &Filter) -> Value {
    let table = parse_rows(rows);
    let view = filter.apply(&table);
    let series = timeseries::daily_sentiment(&view);
    debug!(rows = view.len(), buckets = series.len(), "computed daily sentiment");
    json!(series)
}

/// Comment counts per category and sentiment over the filtered rows.
pub fn op_categories(rows: &[Value], filter: &Filter) -> Value {
    let table = parse_rows(rows);
    let view = filter.apply(&table);
    debug!(rows = view.len(), "computing category table");
    category_table(&view)
}

/// Word frequencies plus the seeded word-cloud plan.
pub fn op_wordfreq(
    rows: &[Value],
    filter: &Filter,
    stopwords: &Stopwords,
    config: &WordCloudConfig,
) -> Value {
    let table = parse_rows(rows);
    let view = filter.apply(&table);
    let words = wordfreq::word_frequencies(&view, stopwords, config);
    debug!(rows = view.len(), unique = words.len(), "computed word frequencies");
    wordcloud_section(&words, config)
}

/// Row count, engagement means and the sentiment distribution.
pub fn op_summary(rows: &[Value], filter: &Filter) -> Value {
    let table = parse_rows(rows);
    let view = filter.apply(&table);
    summary_section(&view)
}

/// Topic selector choices (`ALL` then each page).
pub fn op_pages(rows: &[Value]) -> Value {
    let table = parse_rows(rows);
    json!(summary::pages(&table))
}

/// Every aggregate for one dashboard view.
///
/// The aggregators share the filtered rows read-only and run in parallel.
pub fn op_dashboard(
    rows: &[Value],
    filter: &Filter,
    stopwords: &Stopwords,
    config: &DashboardConfig,
) -> Result<Value> {
    if config.ngrams.sizes.iter().any(|&n| n == 0) {
        return Err(Error::InvalidNgramSize);
    }

    let table = parse_rows(rows);
    let filtered = filter.apply(&table);
    let view: &[&Row] = &filtered;
    let ngrams_cfg = &config.ngrams;

    let ((trend, categories), (ngrams, words)) = rayon::join(
        || {
            rayon::join(
                || timeseries::daily_sentiment(view),
                || category_table(view),
            )
        },
        || {
            rayon::join(
                || {
                    ngrams_cfg
                        .sizes
                        .iter()
                        .map(|&n| ngram_table(view, n, ngrams_cfg.top_k, ngrams_cfg.boundary))
                        .collect::<Vec<Value>>()
                },
                || wordfreq::word_frequencies(view, stopwords, &config.wordcloud),
            )
        },
    );

    debug!(
        rows = table.len(),
        filtered = view.len(),
        buckets = trend.len(),
        words = words.len(),
        "computed dashboard"
    );

    Ok(json!({
        "filter": filter,
        "summary": summary_section(view),
        "trend": trend,
        "categories": categories,
        "ngrams": ngrams,
        "wordcloud": wordcloud_section(&words, &config.wordcloud),
        "records": summary::records(view),
        "style": config.theme.tab(filter.sentiment),
        "theme": config.theme,
    }))
}
