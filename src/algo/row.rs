use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Sentiment label carried by each row.
///
/// The label set is open: anything other than `Positive` / `Negative` is kept
/// verbatim and becomes its own bucket in every aggregate. Ordering follows
/// declaration order (Positive, Negative, then other labels alphabetically).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Positive,
    Negative,
    Other(String),
}

impl Sentiment {
    pub fn parse(s: &str) -> Self {
        match s {
            "Positive" => Self::Positive,
            "Negative" => Self::Negative,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Content type of a row: a post or a comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Post,
    Comment,
    Other(String),
}

impl ContentType {
    pub fn parse(s: &str) -> Self {
        match s {
            "post" => Self::Post,
            "comment" => Self::Comment,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Other(s) => s,
        }
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One post or comment from the source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub text: String,
    /// Space-joined tokens. `None` when the source cell was missing or not
    /// text; such rows contribute nothing to any token stream.
    pub text_tokens: Option<String>,
    /// `None` when the cell is missing, empty or not text. Such rows are left
    /// out of every per-sentiment aggregate.
    pub sentiment: Option<Sentiment>,
    pub content_type: ContentType,
    pub page: String,
    /// `None` when the cell is missing, empty or not text.
    pub category: Option<String>,
    pub time: Option<NaiveDateTime>,
    pub interactions: Option<f64>,
    pub comments: Option<f64>,
    pub shares: Option<f64>,
}

impl Row {
    /// Build a row from a JSON object. Never fails: missing or mistyped
    /// fields fall back to empty strings or `None`.
    pub fn from_json(value: &Value) -> Self {
        Self {
            text: text_field(value, "text"),
            text_tokens: value.get("text_tokens").and_then(tokens_field),
            sentiment: label_field(value, "sentiment").map(|s| Sentiment::parse(&s)),
            content_type: ContentType::parse(&text_field(value, "type")),
            page: text_field(value, "page"),
            category: label_field(value, "category"),
            time: value.get("time").and_then(parse_timestamp),
            interactions: number_field(value, "interactions"),
            comments: number_field(value, "comments"),
            shares: number_field(value, "shares"),
        }
    }

    /// Calendar date of the row's timestamp (time of day dropped).
    pub fn date(&self) -> Option<NaiveDate> {
        self.time.map(|t| t.date())
    }

    /// Iterate over this row's tokens. Empty for rows without tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text_tokens
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
    }
}

fn text_field(row: &Value, field: &str) -> String {
    row.get(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// A grouping label. Missing, blank and non-text cells are absent.
fn label_field(row: &Value, field: &str) -> Option<String> {
    row.get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(row: &Value, field: &str) -> Option<f64> {
    let value = match row.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Token cell: a space-joined string, or a list made only of strings.
fn tokens_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<&str>>>()
            .map(|parts| parts.join(" ")),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a timestamp cell.
///
/// Strings may be RFC 3339 (the date is taken in the timestamp's own offset),
/// a naive `YYYY-MM-DD[ HH:MM[:SS[.f]]]` form, or a `DD/MM/YYYY` form.
/// Integers are Unix epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_row() {
        let row = Row::from_json(&json!({
            "text": "ดีมาก",
            "text_tokens": "ดี มาก",
            "sentiment": "Positive",
            "type": "comment",
            "page": "Life_Car",
            "category": "Life",
            "time": "2022-12-01 10:23:00",
            "interactions": 12,
            "comments": "3",
            "shares": 0.0,
        }));
        assert_eq!(row.sentiment, Some(Sentiment::Positive));
        assert_eq!(row.category.as_deref(), Some("Life"));
        assert_eq!(row.content_type, ContentType::Comment);
        assert_eq!(row.text_tokens.as_deref(), Some("ดี มาก"));
        assert_eq!(row.date(), NaiveDate::from_ymd_opt(2022, 12, 1));
        assert_eq!(row.interactions, Some(12.0));
        assert_eq!(row.comments, Some(3.0));
        assert_eq!(row.shares, Some(0.0));
    }

    #[test]
    fn non_text_tokens_are_absent() {
        assert_eq!(Row::from_json(&json!({"text_tokens": null})).text_tokens, None);
        assert_eq!(Row::from_json(&json!({"text_tokens": 3.5})).text_tokens, None);
        assert_eq!(Row::from_json(&json!({})).text_tokens, None);
        assert_eq!(
            Row::from_json(&json!({"text_tokens": ["a", 1]})).text_tokens,
            None
        );
    }

    #[test]
    fn missing_labels_are_absent() {
        let row = Row::from_json(&json!({"sentiment": null, "category": "  "}));
        assert_eq!(row.sentiment, None);
        assert_eq!(row.category, None);
        let row = Row::from_json(&json!({"sentiment": 1, "category": ["Car"]}));
        assert_eq!(row.sentiment, None);
        assert_eq!(row.category, None);
        assert_eq!(Row::from_json(&json!({})).sentiment, None);
    }

    #[test]
    fn token_list_is_joined() {
        let row = Row::from_json(&json!({"text_tokens": ["รถ", "ไฟฟ้า"]}));
        assert_eq!(row.text_tokens.as_deref(), Some("รถ ไฟฟ้า"));
        assert_eq!(row.tokens().collect::<Vec<_>>(), vec!["รถ", "ไฟฟ้า"]);
    }

    #[test]
    fn unknown_labels_kept_verbatim() {
        let row = Row::from_json(&json!({"sentiment": "Neutral", "type": "share"}));
        assert_eq!(row.sentiment, Some(Sentiment::Other("Neutral".into())));
        assert_eq!(row.content_type, ContentType::Other("share".into()));
    }

    #[test]
    fn sentiment_ordering() {
        let mut labels = vec![
            Sentiment::Other("Neutral".into()),
            Sentiment::Negative,
            Sentiment::Positive,
        ];
        labels.sort();
        assert_eq!(
            labels,
            vec![
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Other("Neutral".into())
            ]
        );
    }

    #[test]
    fn timestamp_formats() {
        let d = |v: Value| parse_timestamp(&v).map(|t| t.date());
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(d(json!("2024-01-01")), jan1);
        assert_eq!(d(json!("2024-01-01T23:59:59")), jan1);
        assert_eq!(d(json!("2024-01-01 08:00:00.250")), jan1);
        assert_eq!(d(json!("2024-01-01T23:30:00+07:00")), jan1);
        assert_eq!(d(json!("01/01/2024 12:00")), jan1);
        assert_eq!(d(json!(1704067200000i64)), jan1);
        assert_eq!(d(json!("not a date")), None);
        assert_eq!(d(json!("")), None);
        assert_eq!(d(json!(true)), None);
    }

    #[test]
    fn non_object_row_is_empty() {
        let row = Row::from_json(&json!("just a string"));
        assert_eq!(row, Row::default());
    }
}
