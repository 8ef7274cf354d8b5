//! `packed onboard` — Write a starter config file.

use packed_config::AppConfig;

use super::CommandResult;

pub async fn run() -> CommandResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🧳 Packed — First-Time Setup");
    println!("============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file already exists: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created {}", config_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Point api_url at your packing-list API");
    println!("  2. Set PACKED_API_TOKEN (or api_token) to save lists under your account");
    println!("  3. Try: packed suggest --temperature 75");

    Ok(())
}
