//! `packed lists` / `packed items` — Browse saved packing lists.

use packed_core::PackingListApi;

use super::{client, load_config, CommandResult};

pub async fn run() -> CommandResult {
    let config = load_config()?;
    let api = client(&config)?;

    let lists = api.list_packing_lists().await?;
    if lists.is_empty() {
        println!("No saved packing lists.");
        return Ok(());
    }

    for list in lists {
        println!("#{:<5} {}", list.id, list.title);
        println!(
            "       departure {}  return {}",
            list.departure_date.as_deref().unwrap_or("?"),
            list.return_date.as_deref().unwrap_or("?")
        );
        if let Some(created) = list.created {
            println!("       created {created}");
        }
    }

    Ok(())
}

pub async fn run_items(id: i64) -> CommandResult {
    let config = load_config()?;
    let api = client(&config)?;

    let items = api.list_items(id).await?;
    println!("Packing list #{id}: {} item(s)", items.len());
    for item in items {
        println!(
            "  [{}] {:>4} × {}",
            if item.packed { "x" } else { " " },
            item.quantity.unwrap_or(1),
            item.name.as_deref().unwrap_or("(unnamed)")
        );
    }

    Ok(())
}
