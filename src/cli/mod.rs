pub mod chat;
pub mod commands;
pub mod providers;
pub mod serve;

pub use commands::{Cli, Commands};
