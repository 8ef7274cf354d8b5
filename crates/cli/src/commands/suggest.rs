//! `packed suggest` — Show suggested items for a temperature.

use packed_core::{Climate, WeatherReading};
use packed_planner::SuggestionStore;

use super::{client, load_config, CommandResult};

pub async fn run(temperature: f64) -> CommandResult {
    let config = load_config()?;
    let api = client(&config)?;

    let mut store = SuggestionStore::new();
    store.load(&api, &[WeatherReading { temperature }]).await?;

    let climate = store.climate().unwrap_or(Climate::from_temperature(temperature));
    println!("Suggestions for {temperature}°F ({climate})");
    println!();
    println!("General items to pack:");
    for item in &store.pools().general {
        println!("  {:>5}  {}", id_label(item.id), item.name);
    }
    println!();
    println!("Recommended for you:");
    for item in &store.pools().conditional {
        println!("  {:>5}  {}", id_label(item.id), item.name);
    }

    Ok(())
}

fn id_label(id: Option<packed_core::ItemId>) -> String {
    id.map(|id| format!("#{id}")).unwrap_or_default()
}
