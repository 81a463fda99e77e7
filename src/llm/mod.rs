pub mod catalog;
pub mod gemini;
pub mod openrouter;
pub mod provider;
pub mod router;
pub mod sambanova;
pub mod transport;
pub mod types;

pub use provider::ChatProvider;
pub use router::{build_registry, create_provider};
pub use transport::Transport;
pub use types::{ChatMessage, ImageData};
