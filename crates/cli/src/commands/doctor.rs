//! `parkguide doctor`: Diagnose configuration, credential and live data.

use parkguide_config::{AppConfig, CredentialSource, SecretStoreStatus};
use parkguide_liveinfo::LiveInfoFetcher;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Park Guide Doctor: System Diagnostics");
    println!("=========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file, using defaults (run `parkguide init`)");
    }
    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  Fix the configuration before running other checks.");
            return Ok(());
        }
    };

    let report = config.resolve_credential();
    match report.source() {
        Some(CredentialSource::Environment) => println!("  ✅ API key found in environment"),
        Some(CredentialSource::SecretStore) => println!("  ✅ API key found in secret store"),
        None => {
            println!("  ❌ No API key: the assistant will be unavailable");
            issues += 1;
        }
    }
    match &report.secret_store {
        SecretStoreStatus::Available { path } => {
            println!("     Secret store: key present ({})", path.display())
        }
        SecretStoreStatus::Missing { path } => {
            println!("     Secret store: no file at {}", path.display())
        }
        SecretStoreStatus::NoKey { path } => {
            println!("     Secret store: no key in {}", path.display())
        }
        SecretStoreStatus::Error { path, reason } => {
            println!("     Secret store: cannot read {}: {reason}", path.display());
            issues += 1;
        }
    }

    if let Some(provider) = parkguide_providers::build_from_config(&config, &report) {
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Completion API reachable ({})", provider.name()),
            Ok(false) => {
                println!("  ❌ Completion API rejected the key ({})", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Completion API unreachable: {e}");
                issues += 1;
            }
        }
    }

    if config.live_info.enabled {
        let fetcher = LiveInfoFetcher::from_config(&config.live_info)?;
        let info = fetcher.refresh().await;
        if info.is_fallback() {
            println!("  ⚠️  Live hours unavailable from {}", config.live_info.source_url);
            issues += 1;
        } else {
            println!("  ✅ Live hours: {}", info.hours);
        }
    } else {
        println!("  ⚠️  Live hours disabled, fallback only");
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
