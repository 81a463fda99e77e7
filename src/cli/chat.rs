use std::time::Duration;

use console::style;
use data_encoding::BASE64;

use crate::cli::commands::ChatArgs;
use crate::config;
use crate::errors::RelayError;
use crate::orchestrator::{ChatOptions, ChatOutcome, Orchestrator};

pub async fn handle_chat(args: ChatArgs) -> Result<(), RelayError> {
    let config = config::from_env();
    let orchestrator = Orchestrator::from_config(&config)?;

    let opts = ChatOptions {
        provider_order: args.providers.map(|s| {
            s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
        }),
        image: match &args.image {
            Some(path) => Some(read_image_as_data_url(path).await?),
            None => None,
        },
        timeout: args.timeout_ms.map(Duration::from_millis),
        cancel: None,
    };

    let outcome = if args.fast {
        orchestrator.get_response_fast(&args.message, &[], &opts).await
    } else {
        orchestrator.race_or_fallback(&args.message, &[], &opts).await
    };

    match &outcome {
        ChatOutcome::Answered { text, provider } => {
            println!("{}", text);
            eprintln!("{}", style(format!("[served by {provider}]")).dim());
        }
        other => {
            eprintln!("{}", style(other.text()).red());
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn read_image_as_data_url(path: &str) -> Result<String, RelayError> {
    let bytes = tokio::fs::read(path).await?;
    let mime = match path.rsplit('.').next() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)))
}
