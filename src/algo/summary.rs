use serde::Serialize;
use std::collections::HashMap;

use super::filter::ALL_TOPICS;
use super::row::{Row, Sentiment};

/// Headline statistics shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub avg_interactions: Option<f64>,
    pub avg_comments: Option<f64>,
    pub avg_shares: Option<f64>,
}

/// One slice of the sentiment pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Percentage of labelled rows, rounded to two decimals.
    pub percent: f64,
}

/// One line of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// `null` for rows without a sentiment label.
    pub sentiment: Option<Sentiment>,
    pub text: String,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Mean of the present values, rounded to three decimals. `None` when no row
/// carries a value.
fn mean<'a, F>(rows: &[&'a Row], field: F) -> Option<f64>
where
    F: Fn(&'a Row) -> Option<f64>,
{
    let (sum, n) = rows
        .iter()
        .filter_map(|&row| field(row))
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| round_to(sum / n as f64, 3))
}

pub fn summarize(rows: &[&Row]) -> Summary {
    Summary {
        total: rows.len(),
        avg_interactions: mean(rows, |r| r.interactions),
        avg_comments: mean(rows, |r| r.comments),
        avg_shares: mean(rows, |r| r.shares),
    }
}

/// Count rows per sentiment, most frequent first (ties in first-seen order).
/// Rows without a label are left out, and percentages are of labelled rows.
pub fn sentiment_distribution(rows: &[&Row]) -> Vec<SentimentShare> {
    let mut index: HashMap<&Sentiment, usize> = HashMap::new();
    let mut counts: Vec<(&Sentiment, usize)> = Vec::new();
    for sentiment in rows.iter().filter_map(|row| row.sentiment.as_ref()) {
        match index.get(sentiment) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(sentiment, counts.len());
                counts.push((sentiment, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let total = total as f64;
    counts
        .into_iter()
        .map(|(sentiment, count)| SentimentShare {
            sentiment: sentiment.clone(),
            count,
            percent: round_to(count as f64 / total * 100.0, 2),
        })
        .collect()
}

/// Topic selector choices: the `ALL` sentinel, then each distinct page in
/// first-seen order. Empty page keys are skipped.
pub fn pages(rows: &[Row]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    std::iter::once(ALL_TOPICS.to_string())
        .chain(
            rows.iter()
                .map(|r| r.page.as_str())
                .filter(|p| !p.is_empty() && *p != ALL_TOPICS && seen.insert(*p))
                .map(str::to_string),
        )
        .collect()
}

/// The (sentiment, text) table shown beside the word cloud.
pub fn records(rows: &[&Row]) -> Vec<Record> {
    rows.iter()
        .map(|row| Record {
            sentiment: row.sentiment.clone(),
            text: row.text.clone(),
        })
        .collect()
}
