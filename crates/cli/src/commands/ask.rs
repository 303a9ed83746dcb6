//! `parkguide ask`: Ask the assistant one question from the terminal.

use parkguide_config::{API_KEY_VAR, AppConfig};
use parkguide_core::ChatHistory;
use parkguide_gateway::GatewayState;

pub async fn run(question: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let secrets_path = config.secrets_path();
    let state = GatewayState::from_config(config)?;

    let Some(assistant) = state.sessions.assistant() else {
        eprintln!();
        eprintln!("  🤖 The assistant is unavailable: no API key configured.");
        eprintln!();
        eprintln!("  Set the {API_KEY_VAR} environment variable, or add it to:");
        eprintln!("    {}", secrets_path.display());
        eprintln!();
        eprintln!("  Get a key from Google AI Studio.");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let info = state.fetcher.get().await;
    let outcome = assistant.ask(ChatHistory::new(), &question, &info).await?;

    if let Some(reply) = outcome.history.last() {
        println!("{}", reply.content);
    }
    if let Some(diagnostic) = outcome.diagnostic {
        eprintln!("\n  ❌ Error generating response: {diagnostic}");
    }

    Ok(())
}
