pub mod create;
pub mod lists;
pub mod onboard;
pub mod status;
pub mod suggest;

use packed_client::HttpPackingApi;
use packed_config::AppConfig;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Build the HTTP client from the loaded configuration.
pub fn client(config: &AppConfig) -> Result<HttpPackingApi, Box<dyn std::error::Error>> {
    Ok(HttpPackingApi::with_timeout(
        config.api_url.clone(),
        config.auth(),
        config.request_timeout(),
    )?)
}
