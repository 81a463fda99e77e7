pub mod env;
pub mod types;

pub use env::from_env;
pub use types::{ProviderConfig, RelayConfig};
