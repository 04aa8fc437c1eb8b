use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::row::{ContentType, Row, Sentiment};

/// Comment counts per category, one column per sentiment.
///
/// Every category carries every column; absent combinations are 0. The
/// Positive and Negative columns always exist, even when no comment carries
/// that label. Serializes as `{category: {sentiment: count}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTable {
    counts: BTreeMap<String, BTreeMap<Sentiment, usize>>,
}

impl CategoryTable {
    /// Categories in ascending order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|c| c.as_str())
    }

    /// Sentiment columns (Positive, Negative, then any other observed label).
    pub fn sentiments(&self) -> Vec<Sentiment> {
        match self.counts.values().next() {
            Some(columns) => columns.keys().cloned().collect(),
            None => vec![Sentiment::Positive, Sentiment::Negative],
        }
    }

    pub fn count(&self, category: &str, sentiment: &Sentiment) -> usize {
        self.counts
            .get(category)
            .and_then(|columns| columns.get(sentiment))
            .copied()
            .unwrap_or(0)
    }

    pub fn row(&self, category: &str) -> Option<&BTreeMap<Sentiment, usize>> {
        self.counts.get(category)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Cross-tabulate category against sentiment over comment rows only.
/// Comments missing either label are skipped.
pub fn category_sentiment(rows: &[&Row]) -> CategoryTable {
    let mut columns: BTreeSet<Sentiment> = [Sentiment::Positive, Sentiment::Negative].into();
    let mut grouped: BTreeMap<String, BTreeMap<Sentiment, usize>> = BTreeMap::new();

    let labelled = rows
        .iter()
        .filter(|r| r.content_type == ContentType::Comment)
        .filter_map(|r| Some((r.category.as_ref()?, r.sentiment.as_ref()?)));

    for (category, sentiment) in labelled {
        columns.insert(sentiment.clone());
        *grouped
            .entry(category.clone())
            .or_default()
            .entry(sentiment.clone())
            .or_insert(0) += 1;
    }

    // pivot: fill every column for every category
    for counts in grouped.values_mut() {
        for sentiment in &columns {
            counts.entry(sentiment.clone()).or_insert(0);
        }
    }

    CategoryTable { counts: grouped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(kind: &str, category: &str, sentiment: &str) -> Row {
        Row::from_json(&json!({ "type": kind, "category": category, "sentiment": sentiment }))
    }

    #[test]
    fn comments_only() {
        let data = vec![
            row("post", "X", "Positive"),
            row("comment", "X", "Negative"),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let table = category_sentiment(&view);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({ "X": { "Positive": 0, "Negative": 1 } })
        );
    }

    #[test]
    fn every_category_has_both_columns() {
        let data = vec![
            row("comment", "Business", "Positive"),
            row("comment", "Business", "Positive"),
            row("comment", "Life", "Negative"),
            row("comment", "Culture", "Positive"),
            row("comment", "Life", "Negative"),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let table = category_sentiment(&view);
        assert_eq!(table.len(), 3);
        for category in ["Business", "Culture", "Life"] {
            let columns = table.row(category).unwrap();
            assert!(columns.contains_key(&Sentiment::Positive));
            assert!(columns.contains_key(&Sentiment::Negative));
        }
        assert_eq!(table.count("Business", &Sentiment::Positive), 2);
        assert_eq!(table.count("Life", &Sentiment::Positive), 0);
        assert_eq!(table.count("Life", &Sentiment::Negative), 2);
        assert_eq!(
            table.categories().collect::<Vec<_>>(),
            vec!["Business", "Culture", "Life"]
        );
    }

    #[test]
    fn missing_sentiment_column_synthesized() {
        let data = vec![row("comment", "A", "Negative"), row("comment", "B", "Negative")];
        let view: Vec<&Row> = data.iter().collect();
        let table = category_sentiment(&view);
        assert_eq!(table.count("A", &Sentiment::Positive), 0);
        assert_eq!(table.row("B").unwrap()[&Sentiment::Positive], 0);
    }

    #[test]
    fn extra_sentiment_becomes_column_everywhere() {
        let data = vec![row("comment", "A", "Neutral"), row("comment", "B", "Positive")];
        let view: Vec<&Row> = data.iter().collect();
        let table = category_sentiment(&view);
        let neutral = Sentiment::Other("Neutral".into());
        assert_eq!(
            table.sentiments(),
            vec![Sentiment::Positive, Sentiment::Negative, neutral.clone()]
        );
        assert_eq!(table.count("A", &neutral), 1);
        assert_eq!(table.row("B").unwrap()[&neutral], 0);
    }

    #[test]
    fn unlabelled_comments_skipped() {
        let data = vec![
            row("comment", "A", "Positive"),
            Row::from_json(&json!({"type": "comment", "sentiment": "Negative"})),
            Row::from_json(&json!({"type": "comment", "category": "A"})),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let table = category_sentiment(&view);
        assert_eq!(table.sentiments(), vec![Sentiment::Positive, Sentiment::Negative]);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({ "A": { "Positive": 1, "Negative": 0 } })
        );
    }

    #[test]
    fn empty_input() {
        let table = category_sentiment(&[]);
        assert!(table.is_empty());
        assert_eq!(table.sentiments(), vec![Sentiment::Positive, Sentiment::Negative]);
        assert_eq!(serde_json::to_value(&table).unwrap(), json!({}));
    }
}
