//! `parkguide hours`: Print today's park info.

use parkguide_config::AppConfig;
use parkguide_liveinfo::LiveInfoFetcher;

pub async fn run(refresh: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let fetcher = LiveInfoFetcher::from_config(&config.live_info)?;

    // A fresh process has an empty cache, so both paths fetch once; `refresh`
    // only skips the freshness check.
    let info = if refresh {
        fetcher.refresh().await
    } else {
        fetcher.get().await
    };
    let today = fetcher.today();

    if json {
        let value = serde_json::json!({
            "date": today.format("%Y-%m-%d").to_string(),
            "hours": info.hours,
            "fireworks": info.fireworks,
            "notes": info.notes,
            "origin": info.origin,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("🏰 Today ({})", today.format("%b %d, %Y"));
    println!("   Hours:     {}", info.hours);
    println!("   Fireworks: {}", info.fireworks);
    println!("   Notes:     {}", info.notes);
    if info.is_fallback() {
        println!("\n   ⚠️  Live data unavailable, showing typical hours. Check the official app.");
    }

    Ok(())
}
