use serde::Serialize;

use super::row::{ContentType, Row, Sentiment};
use crate::error::{Error, Result};

/// Sentinel topic selector meaning "every page".
pub const ALL_TOPICS: &str = "ALL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeSelector {
    Post,
    Comment,
    #[default]
    Both,
}

impl TypeSelector {
    /// Accepts `post`, `comment`, `both` and the legacy `post&comment`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            "both" | "post&comment" => Some(Self::Both),
            _ => None,
        }
    }

    fn matches(&self, content_type: &ContentType) -> bool {
        match self {
            Self::Both => true,
            Self::Post => *content_type == ContentType::Post,
            Self::Comment => *content_type == ContentType::Comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TopicSelector {
    #[default]
    All,
    Page(String),
}

impl TopicSelector {
    pub fn from_str(s: &str) -> Self {
        if s == ALL_TOPICS {
            Self::All
        } else {
            Self::Page(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TOPICS,
            Self::Page(page) => page,
        }
    }

    fn matches(&self, page: &str) -> bool {
        match self {
            Self::All => true,
            Self::Page(p) => p == page,
        }
    }
}

impl Serialize for TopicSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Dashboard tab: every row, or only one sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentSelector {
    #[default]
    All,
    Positive,
    Negative,
}

impl SentimentSelector {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }

    fn matches(&self, sentiment: Option<&Sentiment>) -> bool {
        match self {
            Self::All => true,
            Self::Positive => sentiment == Some(&Sentiment::Positive),
            Self::Negative => sentiment == Some(&Sentiment::Negative),
        }
    }
}

/// Row selection applied before any aggregator runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub content_type: TypeSelector,
    pub topic: TopicSelector,
    pub sentiment: SentimentSelector,
}

impl Filter {
    pub fn new(content_type: TypeSelector, topic: TopicSelector) -> Self {
        Self {
            content_type,
            topic,
            sentiment: SentimentSelector::All,
        }
    }

    /// Build a filter from selector strings.
    pub fn parse(content_type: &str, topic: &str, sentiment: &str) -> Result<Self> {
        Ok(Self {
            content_type: TypeSelector::from_str(content_type)
                .ok_or_else(|| Error::UnknownContentType(content_type.to_string()))?,
            topic: TopicSelector::from_str(topic),
            sentiment: SentimentSelector::from_str(sentiment)
                .ok_or_else(|| Error::UnknownSentiment(sentiment.to_string()))?,
        })
    }

    pub fn with_sentiment(mut self, sentiment: SentimentSelector) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.content_type.matches(&row.content_type)
            && self.topic.matches(&row.page)
            && self.sentiment.matches(row.sentiment.as_ref())
    }

    /// Borrow the matching rows, preserving source order.
    pub fn apply<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Select rows by content type and topic key.
pub fn filter_rows<'a>(
    rows: &'a [Row],
    content_type: TypeSelector,
    topic: &TopicSelector,
) -> Vec<&'a Row> {
    Filter::new(content_type, topic.clone()).apply(rows)
}
