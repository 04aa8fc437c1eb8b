use serde::{Deserialize, Serialize};

use crate::algo::ngram::{Boundary, DEFAULT_TOP_K};
use crate::algo::wordfreq::WordCloudConfig;
use crate::error::{Error, Result};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramConfig {
    pub top_k: usize,
    /// One table per width, e.g. `[1, 2]` for unigrams and bigrams.
    pub sizes: Vec<usize>,
    pub boundary: Boundary,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            sizes: vec![1, 2],
            boundary: Boundary::Stream,
        }
    }
}

/// Everything the dashboard needs besides the rows and the stopword list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ngrams: NgramConfig,
    pub wordcloud: WordCloudConfig,
    pub theme: Theme,
}

impl DashboardConfig {
    /// Parse a configuration from a JSON string. Missing keys keep defaults.
    pub fn parse(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a file path.
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read '{path}': {e}")))?;
        Self::parse(&json)
    }

    /// Resolve the configuration in this order:
    ///
    /// 1. `explicit` path (errors if unreadable or invalid)
    /// 2. `$SENTIMENT_CONFIG` env var (falls through with a warning)
    /// 3. Built-in defaults
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var("SENTIMENT_CONFIG") {
            match Self::load(&path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!("ignoring SENTIMENT_CONFIG: {e}"),
            }
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.ngrams.sizes.iter().any(|&n| n == 0) {
            return Err(Error::InvalidNgramSize);
        }
        self.wordcloud.validate()
    }
}
