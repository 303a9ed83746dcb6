//! `parkguide serve`: Start the web guide.

use parkguide_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🏰 Park Guide");
    println!("   Listening:  http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:      {}", config.assistant.model);
    println!(
        "   Live hours: {}",
        if config.live_info.enabled {
            config.live_info.source_url.as_str()
        } else {
            "disabled (fallback only)"
        }
    );

    parkguide_gateway::start(config).await?;

    Ok(())
}
