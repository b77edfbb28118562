pub mod fetcher;
pub mod traits;

pub use fetcher::HttpAnalysisClient;
pub use traits::AnalysisClient;
