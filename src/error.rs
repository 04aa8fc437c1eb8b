use thiserror::Error;

/// Errors surfaced at the operation boundary.
///
/// Data-quality problems inside the row table never produce an error; the
/// aggregators degrade to empty or zero results instead. Only caller mistakes
/// (bad selectors, bad arguments, unreadable files) end up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown content type '{0}'. Use: post, comment, both")]
    UnknownContentType(String),

    #[error("Unknown sentiment tab '{0}'. Use: all, positive, negative")]
    UnknownSentiment(String),

    #[error("Unknown n-gram boundary '{0}'. Use: stream, row")]
    InvalidBoundary(String),

    #[error("N-gram size must be at least 1")]
    InvalidNgramSize,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
