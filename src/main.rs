use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatrelay::{cli, errors};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!args.no_color)
        .init();

    let result = match args.command {
        cli::Commands::Chat(chat_args) => cli::chat::handle_chat(chat_args).await,
        cli::Commands::Serve(serve_args) => cli::serve::handle_serve(serve_args).await,
        cli::Commands::Providers => cli::providers::handle_providers().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            errors::RelayError::Config(_) => 2,
            errors::RelayError::Authentication(_) => 4,
            errors::RelayError::Io(_) => 5,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}
