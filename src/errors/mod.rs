pub mod classification;
pub mod types;

pub use classification::ErrorClassification;
pub use types::RelayError;
