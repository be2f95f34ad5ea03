pub mod fuzzy;
pub mod test_utils;

pub use fuzzy::similarity;
