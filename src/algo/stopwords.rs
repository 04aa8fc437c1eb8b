use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Embedded default list, compiled from `stopwords/thai.txt`.
/// Users override by placing a file at `$XDG_DATA_HOME/sentiment/stopwords.txt`
/// or `$SENTIMENT_STOPWORDS` env var, or passing `--stopwords <path>`.
const EMBEDDED_THAI: &str = include_str!("../../stopwords/thai.txt");

/// An immutable stopword set. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Parse a word list: one word per line, `#` starts a comment, blank
    /// lines are ignored.
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|word| !word.is_empty())
            .map(|word| word.to_lowercase())
            .collect();
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The compiled-in Thai list.
    pub fn thai() -> Self {
        Self::parse(EMBEDDED_THAI)
    }

    /// Load a word list from a file path.
    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read stopwords '{path}': {e}")))?;
        Ok(Self::parse(&text))
    }

    /// Resolve the stopword list in this order:
    ///
    /// 1. `explicit` path (errors if unreadable)
    /// 2. `$SENTIMENT_STOPWORDS` env var (path to a word list)
    /// 3. `$XDG_DATA_HOME/sentiment/stopwords.txt`
    /// 4. `~/.local/share/sentiment/stopwords.txt`
    /// 5. Embedded Thai list
    ///
    /// Steps 2-4 fall through when the file is missing or unreadable; a bad
    /// `$SENTIMENT_STOPWORDS` path is logged.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var("SENTIMENT_STOPWORDS") {
            match Self::load(&path) {
                Ok(words) => return Ok(words),
                Err(e) => tracing::warn!("ignoring SENTIMENT_STOPWORDS: {e}"),
            }
        }

        if let Some(path) = xdg_stopwords_path() {
            if path.exists() {
                if let Ok(text) = std::fs::read_to_string(&path) {
                    return Ok(Self::parse(&text));
                }
            }
        }

        Ok(Self::thai())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn xdg_stopwords_path() -> Option<PathBuf> {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".local/share")))?;
    Some(base.join("sentiment").join("stopwords.txt"))
}
