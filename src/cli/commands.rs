use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatrelay", version, about = "Multi-provider AI chat relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message and print the reply
    Chat(ChatArgs),
    /// Start the HTTP relay server
    Serve(ServeArgs),
    /// List known providers and whether they are configured
    Providers,
}

#[derive(Args, Clone)]
pub struct ChatArgs {
    /// The message to send
    pub message: String,

    /// Use only the parallel fast path instead of race-then-fallback
    #[arg(long)]
    pub fast: bool,

    /// Comma-separated provider attempt order override
    #[arg(long)]
    pub providers: Option<String>,

    /// Path to an image to attach (vision-capable providers only)
    #[arg(long)]
    pub image: Option<String>,

    /// Per-provider timeout override in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}
