pub mod coverage;
pub mod matching;

pub use coverage::CoverageService;
pub use matching::ProviderMatcher;
