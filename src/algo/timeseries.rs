use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::row::{Row, Sentiment};

/// Number of rows sharing one calendar date and one sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    pub count: usize,
}

/// Bucket rows by (calendar date, sentiment).
///
/// Sparse: only pairs with at least one row appear. Sorted by date, then by
/// sentiment (Positive, Negative, other labels). Rows without a parseable
/// timestamp or without a sentiment label are not counted.
pub fn daily_sentiment(rows: &[&Row]) -> Vec<DailyCount> {
    let mut buckets: BTreeMap<(NaiveDate, Sentiment), usize> = BTreeMap::new();
    for row in rows {
        if let (Some(date), Some(sentiment)) = (row.date(), &row.sentiment) {
            *buckets.entry((date, sentiment.clone())).or_insert(0) += 1;
        }
    }
    buckets
        .into_iter()
        .map(|((date, sentiment), count)| DailyCount {
            date,
            sentiment,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(time: &str, sentiment: &str) -> Row {
        Row::from_json(&json!({ "time": time, "sentiment": sentiment }))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn buckets_by_date_and_sentiment() {
        let data = vec![
            row("2024-01-02 09:00:00", "Negative"),
            row("2024-01-01 10:00:00", "Positive"),
            row("2024-01-01 23:59:00", "Negative"),
            row("2024-01-02 11:00:00", "Negative"),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let series = daily_sentiment(&view);
        assert_eq!(
            series,
            vec![
                DailyCount { date: day(2024, 1, 1), sentiment: Sentiment::Positive, count: 1 },
                DailyCount { date: day(2024, 1, 1), sentiment: Sentiment::Negative, count: 1 },
                DailyCount { date: day(2024, 1, 2), sentiment: Sentiment::Negative, count: 2 },
            ]
        );
    }

    #[test]
    fn count_conservation() {
        let data = vec![
            row("2024-03-01", "Positive"),
            row("2024-03-01", "Positive"),
            row("2024-03-05", "Negative"),
            row("garbage", "Positive"),
            row("2024-02-28", "Neutral"),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let series = daily_sentiment(&view);
        let total: usize = series.iter().map(|b| b.count).sum();
        let with_time = data.iter().filter(|r| r.time.is_some()).count();
        assert_eq!(total, with_time);
        assert_eq!(total, 4);
    }

    #[test]
    fn sorted_by_date() {
        let data = vec![
            row("2024-05-03", "Positive"),
            row("2023-12-31", "Positive"),
            row("2024-01-15", "Positive"),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let dates: Vec<NaiveDate> = daily_sentiment(&view).iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![day(2023, 12, 31), day(2024, 1, 15), day(2024, 5, 3)]);
    }

    #[test]
    fn unknown_sentiment_is_own_bucket() {
        let data = vec![row("2024-01-01", "Neutral"), row("2024-01-01", "Positive")];
        let view: Vec<&Row> = data.iter().collect();
        let series = daily_sentiment(&view);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].sentiment, Sentiment::Other("Neutral".into()));
    }

    #[test]
    fn unlabelled_rows_skipped() {
        let data = vec![
            row("2024-01-01", "Positive"),
            Row::from_json(&json!({ "time": "2024-01-01" })),
        ];
        let view: Vec<&Row> = data.iter().collect();
        let series = daily_sentiment(&view);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn empty_input() {
        assert!(daily_sentiment(&[]).is_empty());
    }

    #[test]
    fn serializes_plain_date() {
        let data = vec![row("2024-01-01 10:00:00", "Positive")];
        let view: Vec<&Row> = data.iter().collect();
        let json = serde_json::to_value(daily_sentiment(&view)).unwrap();
        assert_eq!(
            json,
            json!([{ "date": "2024-01-01", "sentiment": "Positive", "count": 1 }])
        );
    }
}
