pub mod algo;
pub mod config;
pub mod error;
pub mod ops;
pub mod theme;

#[cfg(feature = "plugin")]
pub mod commands;

pub use error::{Error, Result};

#[cfg(feature = "plugin")]
use nu_plugin::{Plugin, PluginCommand};

#[cfg(feature = "plugin")]
use crate::{algo::stopwords::Stopwords, config::DashboardConfig};

/// Nushell plugin state, resolved once at startup and shared by every call.
#[cfg(feature = "plugin")]
pub struct SentimentPlugin {
    pub stopwords: Stopwords,
    pub config: DashboardConfig,
}

#[cfg(feature = "plugin")]
impl SentimentPlugin {
    /// Resolve the stopword list and dashboard config from the environment.
    /// Anything unreadable falls back to the built-in defaults.
    pub fn new() -> Self {
        let stopwords = Stopwords::resolve(None).unwrap_or_else(|e| {
            tracing::warn!("falling back to built-in stopwords: {e}");
            Stopwords::thai()
        });
        let config = DashboardConfig::resolve(None).unwrap_or_else(|e| {
            tracing::warn!("falling back to default config: {e}");
            DashboardConfig::default()
        });
        Self { stopwords, config }
    }
}

#[cfg(feature = "plugin")]
impl Default for SentimentPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "plugin")]
impl Plugin for SentimentPlugin {
    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").into()
    }

    fn commands(&self) -> Vec<Box<dyn PluginCommand<Plugin = Self>>> {
        vec![
            Box::new(commands::Ngrams),
            Box::new(commands::Trend),
            Box::new(commands::Categories),
            Box::new(commands::WordFreq),
            Box::new(commands::Dashboard),
        ]
    }
}
