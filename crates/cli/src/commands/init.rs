//! `parkguide init`: First-time setup.

use parkguide_config::{API_KEY_VAR, AppConfig};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🏰 Park Guide: First-Time Setup");
    println!("================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let secrets_path = AppConfig::default().secrets_path();
    if !secrets_path.exists() {
        std::fs::write(
            &secrets_path,
            format!(
                "# Completion API key, used when the {API_KEY_VAR} environment variable is unset.\n\
                 # {API_KEY_VAR} = \"...\"\n"
            ),
        )?;
        println!("✅ Created secrets template at: {}", secrets_path.display());
    }

    println!("\n📝 Next steps:");
    println!("   1. export {API_KEY_VAR}=... (or fill in {})", secrets_path.display());
    println!("   2. Run: parkguide doctor");
    println!("   3. Run: parkguide serve\n");

    Ok(())
}
