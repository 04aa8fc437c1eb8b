use regex::Regex;
use std::sync::OnceLock;

use super::row::Row;

/// Thai block (ก through ๙), ASCII letters and the apostrophe.
const ALLOWED_TOKEN: &str = r"^[\x{0E01}-\x{0E59}A-Za-z']+$";

fn allowed_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ALLOWED_TOKEN).expect("allowed-token pattern is valid"))
}

/// Flatten the tokens of every row into one stream.
///
/// Equivalent to joining each row's token string with a single space and
/// splitting the result on whitespace. Rows without tokens are skipped.
pub fn token_stream<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
    rows.iter().flat_map(|&row| row.tokens()).collect()
}

/// Generate word n-grams from a token list, each joined by a single space.
/// Yields nothing when the list is shorter than `n` or `n` is zero.
pub fn word_ngrams(tokens: &[&str], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// True when every character of the token is Thai, an ASCII letter or `'`.
pub fn is_allowed_token(token: &str) -> bool {
    allowed_token_re().is_match(token)
}

/// Token length in characters (not bytes).
pub fn char_len(token: &str) -> usize {
    token.chars().count()
}
