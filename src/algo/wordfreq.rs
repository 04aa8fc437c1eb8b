use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::row::Row;
use super::stopwords::Stopwords;
use super::tokenizer::{char_len, is_allowed_token};
use crate::error::{Error, Result};

/// Word-cloud extraction and layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Shortest token kept, in characters. At least 1; values below the
    /// default of 2 let single-character words through.
    pub min_word_length: usize,
    /// Most words handed to the renderer.
    pub max_words: usize,
    /// Seed for orientation and colour choices.
    pub seed: u64,
    /// Probability that a word is laid out horizontally.
    pub prefer_horizontal: f64,
    /// Number of colour slots in the renderer's palette.
    pub palette_size: usize,
    /// Merge case variants into their most frequent spelling.
    pub fold_case: bool,
    /// Merge a word ending in `s` into its singular when both occur.
    pub normalize_plurals: bool,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            min_word_length: 2,
            max_words: 2000,
            seed: 42,
            prefer_horizontal: 0.9,
            palette_size: 5,
            fold_case: true,
            normalize_plurals: true,
        }
    }
}

impl WordCloudConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(Error::Config(
                "wordcloud.min_word_length must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.prefer_horizontal) {
            return Err(Error::Config(
                "wordcloud.prefer_horizontal must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// A word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Normalize one token, or reject it.
///
/// Order: character class, trailing `'s`, purely numeric, minimum length,
/// stopword.
fn keep_token<'a>(token: &'a str, stopwords: &Stopwords, min_len: usize) -> Option<&'a str> {
    if !is_allowed_token(token) {
        return None;
    }
    let word = match token.len().checked_sub(2) {
        Some(cut) if token.is_char_boundary(cut) && token[cut..].eq_ignore_ascii_case("'s") => {
            &token[..cut]
        }
        _ => token,
    };
    if word.chars().all(char::is_numeric) {
        return None;
    }
    if char_len(word) < min_len || stopwords.contains(word) {
        return None;
    }
    Some(word)
}

/// Build the word-frequency table over every row's tokens.
///
/// Result is ranked by count descending, ties in first-encounter order.
pub fn word_frequencies(
    rows: &[&Row],
    stopwords: &Stopwords,
    config: &WordCloudConfig,
) -> Vec<WordCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<WordCount> = Vec::new();

    for word in rows
        .iter()
        .flat_map(|&row| row.tokens())
        .filter_map(|t| keep_token(t, stopwords, config.min_word_length))
    {
        match index.get(word) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(word, entries.len());
                entries.push(WordCount { word: word.to_string(), count: 1 });
            }
        }
    }

    if config.fold_case || config.normalize_plurals {
        entries = merge_variants(entries, config);
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Spellings of one word and their counts, in first-seen order.
struct VariantGroup {
    key: String,
    variants: Vec<WordCount>,
}

impl VariantGroup {
    fn add(&mut self, word: String, count: usize) {
        match self.variants.iter_mut().find(|v| v.word == word) {
            Some(v) => v.count += count,
            None => self.variants.push(WordCount { word, count }),
        }
    }

    /// Most frequent spelling (first seen on ties) carrying the group total.
    fn fuse(self) -> WordCount {
        let count = self.variants.iter().map(|v| v.count).sum();
        let mut best = 0;
        for (i, v) in self.variants.iter().enumerate() {
            if v.count > self.variants[best].count {
                best = i;
            }
        }
        let word = self.variants.into_iter().nth(best).map(|v| v.word).unwrap_or_default();
        WordCount { word, count }
    }
}

/// A plural key (`s` but not `ss` at the end) and its singular.
fn singular_of(key: &str) -> Option<&str> {
    if key.ends_with('s') && !key.ends_with("ss") {
        Some(&key[..key.len() - 1])
    } else {
        None
    }
}

/// Merge entries that are the same word.
///
/// With `fold_case`, spellings that differ only in case share a group. With
/// `normalize_plurals`, a group whose key ends in `s` (not `ss`) is folded
/// into its singular group when that group exists, each spelling losing its
/// trailing `s`. Each group then becomes one entry holding its most frequent
/// spelling and the summed count, at the position of the first spelling
/// encountered.
fn merge_variants(entries: Vec<WordCount>, config: &WordCloudConfig) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Option<VariantGroup>> = Vec::new();

    for entry in entries {
        let key = if config.fold_case {
            entry.word.to_lowercase()
        } else {
            entry.word.clone()
        };
        match index.get(&key) {
            Some(&i) => {
                if let Some(group) = groups[i].as_mut() {
                    group.add(entry.word, entry.count);
                }
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Some(VariantGroup { key, variants: vec![entry] }));
            }
        }
    }

    if config.normalize_plurals {
        for i in 0..groups.len() {
            let target = match groups[i].as_ref().and_then(|g| singular_of(&g.key)) {
                Some(singular) => index.get(singular).copied(),
                None => None,
            };
            let Some(j) = target else { continue };
            if groups[j].is_none() {
                continue;
            }
            if let Some(plural) = groups[i].take() {
                if let Some(singular) = groups[j].as_mut() {
                    for v in plural.variants {
                        let word = v.word[..v.word.len() - 1].to_string();
                        singular.add(word, v.count);
                    }
                }
            }
        }
    }

    groups.into_iter().flatten().map(VariantGroup::fuse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(tokens: &[&str]) -> Vec<Row> {
        tokens
            .iter()
            .map(|t| Row::from_json(&json!({ "text_tokens": t })))
            .collect()
    }

    fn pairs(counts: &[WordCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.word.as_str(), c.count)).collect()
    }

    #[test]
    fn removes_stopwords_and_short_tokens() {
        let data = rows(&["รถ ไฟฟ้า และ ราคา ๆ", "ไฟฟ้า ที่ ดี"]);
        let view: Vec<&Row> = data.iter().collect();
        let sw = Stopwords::thai();
        let freq = word_frequencies(&view, &sw, &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("ไฟฟ้า", 2), ("รถ", 1), ("ราคา", 1), ("ดี", 1)]);
        for entry in &freq {
            assert!(!sw.contains(&entry.word));
            assert!(entry.word.chars().count() >= 2);
        }
    }

    #[test]
    fn rejects_disallowed_characters() {
        let data = rows(&["EV3 555 ดี! 😊 good ok"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("good", 1), ("ok", 1)]);
    }

    #[test]
    fn drops_thai_numerals_and_possessive() {
        let data = rows(&["๒๕๖๕ Tesla's Tesla"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("Tesla", 2)]);
    }

    #[test]
    fn single_char_after_possessive_dropped() {
        let data = rows(&["a's I's"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert!(freq.is_empty());
    }

    #[test]
    fn case_variants_fold_to_most_common() {
        let data = rows(&["tesla Tesla Tesla TESLA"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("Tesla", 4)]);

        let no_fold = WordCloudConfig { fold_case: false, ..Default::default() };
        let freq = word_frequencies(&view, &Stopwords::default(), &no_fold);
        assert_eq!(pairs(&freq), vec![("Tesla", 2), ("tesla", 1), ("TESLA", 1)]);
    }

    #[test]
    fn validate_rejects_zero_min_length() {
        let cfg = WordCloudConfig { min_word_length: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = WordCloudConfig { min_word_length: 1, ..Default::default() };
        assert!(cfg.validate().is_ok());
        assert!(WordCloudConfig::default().validate().is_ok());
    }

    #[test]
    fn plurals_fold_into_singular() {
        let data = rows(&["cars car car"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("car", 3)]);
    }

    #[test]
    fn plural_kept_without_singular_or_after_ss() {
        let data = rows(&["news glass glas cars Cars"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(
            pairs(&freq),
            vec![("cars", 2), ("news", 1), ("glass", 1), ("glas", 1)]
        );
    }

    #[test]
    fn plural_case_variants_merge() {
        let data = rows(&["Cars Cars car"]);
        let view: Vec<&Row> = data.iter().collect();
        let freq = word_frequencies(&view, &Stopwords::default(), &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("Car", 3)]);
    }

    #[test]
    fn plural_folding_can_be_disabled() {
        let data = rows(&["cars car car"]);
        let view: Vec<&Row> = data.iter().collect();
        let cfg = WordCloudConfig { normalize_plurals: false, ..Default::default() };
        let freq = word_frequencies(&view, &Stopwords::default(), &cfg);
        assert_eq!(pairs(&freq), vec![("car", 2), ("cars", 1)]);
    }

    #[test]
    fn stopwords_case_insensitive() {
        let data = rows(&["The cat THE dog"]);
        let view: Vec<&Row> = data.iter().collect();
        let sw = Stopwords::from_words(["the"]);
        let freq = word_frequencies(&view, &sw, &WordCloudConfig::default());
        assert_eq!(pairs(&freq), vec![("cat", 1), ("dog", 1)]);
    }

    #[test]
    fn malformed_and_empty() {
        let bad = Row::from_json(&json!({"text_tokens": null}));
        let view = vec![&bad];
        let freq = word_frequencies(&view, &Stopwords::thai(), &WordCloudConfig::default());
        assert!(freq.is_empty());
        assert!(word_frequencies(&[], &Stopwords::thai(), &WordCloudConfig::default()).is_empty());
    }

    #[test]
    fn order_independent_counts() {
        let data = rows(&["ดี มาก ดี", "แพง ดี", "แพง"]);
        let forward: Vec<&Row> = data.iter().collect();
        let backward: Vec<&Row> = data.iter().rev().collect();
        let cfg = WordCloudConfig::default();
        let sw = Stopwords::default();
        let mut f = word_frequencies(&forward, &sw, &cfg);
        let mut b = word_frequencies(&backward, &sw, &cfg);
        f.sort_by(|x, y| x.word.cmp(&y.word));
        b.sort_by(|x, y| x.word.cmp(&y.word));
        assert_eq!(f, b);
    }
}
