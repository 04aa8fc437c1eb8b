use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::row::Row;
use super::tokenizer::{token_stream, word_ngrams};

/// Default number of n-grams returned per table.
pub const DEFAULT_TOP_K: usize = 10;

/// Where n-gram windows may start and end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Slide over the concatenated stream of all rows. A window can span the
    /// last tokens of one row and the first tokens of the next.
    #[default]
    Stream,
    /// Confine every window to a single row's tokens.
    Row,
}

impl Boundary {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stream" => Some(Self::Stream),
            "row" => Some(Self::Row),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Row => "row",
        }
    }
}

/// An n-gram display string and its exact occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NgramCount {
    pub ngram: String,
    pub count: usize,
}

/// Frequency table that remembers first-encounter order.
#[derive(Debug, Default)]
struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<NgramCount>,
}

impl OrderedCounter {
    fn add(&mut self, ngram: String) {
        match self.index.get(&ngram) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(ngram.clone(), self.entries.len());
                self.entries.push(NgramCount { ngram, count: 1 });
            }
        }
    }

    fn into_ranked(self) -> Vec<NgramCount> {
        let mut entries = self.entries;
        // stable: equal counts keep first-encounter order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Count every n-gram of the given width, ranked by count descending with
/// ties in first-encounter order.
pub fn ranked_ngrams(rows: &[&Row], n: usize, boundary: Boundary) -> Vec<NgramCount> {
    let mut counter = OrderedCounter::default();
    match boundary {
        Boundary::Stream => {
            let tokens = token_stream(rows);
            for ngram in word_ngrams(&tokens, n) {
                counter.add(ngram);
            }
        }
        Boundary::Row => {
            for row in rows {
                let tokens: Vec<&str> = row.tokens().collect();
                for ngram in word_ngrams(&tokens, n) {
                    counter.add(ngram);
                }
            }
        }
    }
    counter.into_ranked()
}

/// Top-`k` most frequent n-grams of width `n`.
pub fn top_ngrams(rows: &[&Row], n: usize, k: usize, boundary: Boundary) -> Vec<NgramCount> {
    let mut ranked = ranked_ngrams(rows, n, boundary);
    ranked.truncate(k);
    ranked
}
