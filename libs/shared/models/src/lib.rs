pub mod error;
pub mod records;

pub use error::StoreError;
pub use records::*;
