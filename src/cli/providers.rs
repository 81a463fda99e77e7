use console::style;

use crate::config;
use crate::errors::RelayError;
use crate::orchestrator::Orchestrator;

pub async fn handle_providers() -> Result<(), RelayError> {
    let config = config::from_env();
    let orchestrator = Orchestrator::from_config(&config)?;

    for provider in orchestrator.providers() {
        let status = if provider.is_configured() {
            style("configured").green()
        } else {
            style("missing credentials").yellow()
        };
        let vision = if provider.supports_vision() { " (vision)" } else { "" };
        println!("{:<12} {}{}", provider.name(), status, vision);
    }

    Ok(())
}
