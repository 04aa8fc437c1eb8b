mod categories;
mod dashboard;
mod ngrams;
mod trend;
pub mod util;
mod wordfreq;

pub use categories::Categories;
pub use dashboard::Dashboard;
pub use ngrams::Ngrams;
pub use trend::Trend;
pub use wordfreq::WordFreq;
