pub mod category;
pub mod cloud;
pub mod filter;
pub mod ngram;
pub mod row;
pub mod stopwords;
pub mod summary;
pub mod timeseries;
pub mod tokenizer;
pub mod wordfreq;
