//! `packed status` — Show the effective configuration.

use packed_config::AppConfig;

use super::{load_config, CommandResult};

pub async fn run() -> CommandResult {
    let config = load_config()?;

    println!("🧳 Packed Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  API:          {}", config.api_url);
    println!("  Owner id:     {}", config.owner_id);
    println!("  Auth:         {}", if config.auth().is_authenticated() { "bearer token" } else { "anonymous" });
    println!("  Timeout:      {}s", config.request_timeout_secs);
    println!(
        "  Rollback:     {}",
        if config.submission.rollback_orphaned_lists { "delete orphaned lists" } else { "keep orphaned lists" }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `packed onboard` first");
    }

    Ok(())
}
