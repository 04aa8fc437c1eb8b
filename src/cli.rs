use clap::{Args, Parser, Subcommand};
use nu_plugin_sentiment::algo::filter::Filter;
use nu_plugin_sentiment::algo::ngram::Boundary;
use nu_plugin_sentiment::algo::stopwords::Stopwords;
use nu_plugin_sentiment::config::DashboardConfig;
use nu_plugin_sentiment::{ops, Error, Result};
use serde_json::Value;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sentiment",
    version,
    about = "Aggregate sentiment-labelled social posts and comments into dashboard data"
)]
struct Cli {
    /// Dashboard config JSON (falls back to $SENTIMENT_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Stopword list, one word per line (falls back to $SENTIMENT_STOPWORDS,
    /// the XDG data dir, then the built-in Thai list)
    #[arg(long, global = true)]
    stopwords: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Row selection shared by every aggregate.
#[derive(Args)]
struct FilterArgs {
    /// Content type: post, comment, both
    #[arg(short = 't', long = "type", default_value = "both")]
    content_type: String,
    /// Topic key, or ALL for every page
    #[arg(short, long, default_value = "ALL")]
    page: String,
    /// Sentiment tab: all, positive, negative
    #[arg(short, long, default_value = "all")]
    sentiment: String,
}

impl FilterArgs {
    fn filter(&self) -> Result<Filter> {
        Filter::parse(&self.content_type, &self.page, &self.sentiment)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Top n-grams over the pre-tokenized text
    Ngrams {
        #[command(flatten)]
        filter: FilterArgs,
        /// N-gram width
        #[arg(short = 'n', long, default_value_t = 1)]
        size: usize,
        /// Number of n-grams to keep (defaults to the config value)
        #[arg(short = 'k', long)]
        top: Option<usize>,
        /// Window boundary: stream or row (defaults to the config value)
        #[arg(short, long)]
        boundary: Option<String>,
    },
    /// Daily counts per sentiment
    Trend {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Comment counts per category and sentiment
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Word frequencies and word-cloud plan
    Wordfreq {
        #[command(flatten)]
        filter: FilterArgs,
        /// Shortest word kept, in characters
        #[arg(long)]
        min_length: Option<usize>,
        /// Words in the cloud plan
        #[arg(short, long)]
        max_words: Option<usize>,
        /// Random seed for the cloud layout
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Row count, engagement means and sentiment distribution
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Topic selector choices
    Pages,
    /// Every aggregate for one dashboard view
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DashboardConfig::resolve(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Ngrams {
            filter,
            size,
            top,
            boundary,
        } => {
            let boundary = match boundary {
                Some(s) => Boundary::from_str(&s).ok_or(Error::InvalidBoundary(s))?,
                None => config.ngrams.boundary,
            };
            let top_k = top.unwrap_or(config.ngrams.top_k);
            ops::op_ngrams(&read_stdin_json()?, &filter.filter()?, size, top_k, boundary)?
        }
        Commands::Trend { filter } => ops::op_trend(&read_stdin_json()?, &filter.filter()?),
        Commands::Categories { filter } => {
            ops::op_categories(&read_stdin_json()?, &filter.filter()?)
        }
        Commands::Wordfreq {
            filter,
            min_length,
            max_words,
            seed,
        } => {
            let stopwords = Stopwords::resolve(cli.stopwords.as_deref())?;
            let mut wordcloud = config.wordcloud;
            if let Some(v) = min_length {
                wordcloud.min_word_length = v;
            }
            if let Some(v) = max_words {
                wordcloud.max_words = v;
            }
            if let Some(v) = seed {
                wordcloud.seed = v;
            }
            wordcloud.validate()?;
            ops::op_wordfreq(&read_stdin_json()?, &filter.filter()?, &stopwords, &wordcloud)
        }
        Commands::Summary { filter } => ops::op_summary(&read_stdin_json()?, &filter.filter()?),
        Commands::Pages => ops::op_pages(&read_stdin_json()?),
        Commands::Dashboard { filter } => {
            let stopwords = Stopwords::resolve(cli.stopwords.as_deref())?;
            ops::op_dashboard(&read_stdin_json()?, &filter.filter()?, &stopwords, &config)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Read a JSON array of rows from stdin. A single object is one row.
fn read_stdin_json() -> Result<Vec<Value>> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    if buf.trim().is_empty() {
        return Ok(vec![]);
    }
    let parsed: Value = serde_json::from_str(&buf)?;
    Ok(match parsed {
        Value::Array(arr) => arr,
        single => vec![single],
    })
}
