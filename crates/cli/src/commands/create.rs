//! `packed create` — Build a packing list for a trip and save it.

use std::sync::Arc;

use chrono::NaiveDate;
use packed_core::{TripContext, WeatherReading};
use packed_planner::{ActionOutcome, PackingSession, SubmissionOutcome, SubmissionPolicy, SubmissionService};
use tracing::warn;

use super::{client, load_config, CommandResult};

pub struct CreateArgs {
    pub city: String,
    pub country: String,
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    pub origin: Option<String>,
    pub temperature: Option<f64>,
    pub items: Vec<String>,
    pub rollback: bool,
}

/// Parse `NAME` or `NAME:QTY`. A trailing `:QTY` only counts when it is numeric.
pub fn parse_item_arg(arg: &str) -> Result<(String, u32), String> {
    let arg = arg.trim();
    let (name, quantity) = match arg.rsplit_once(':') {
        Some((name, qty)) if !qty.is_empty() && qty.chars().all(|c| c.is_ascii_digit()) => {
            let qty = qty
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity in '{arg}': {e}"))?;
            (name.trim(), qty)
        }
        _ => (arg, 1),
    };
    if name.is_empty() {
        return Err(format!("item '{arg}' has no name"));
    }
    Ok((name.to_string(), quantity))
}

pub async fn run(args: CreateArgs) -> CommandResult {
    let config = load_config()?;
    let api = Arc::new(client(&config)?);

    let mut trip = TripContext::new(&args.city, &args.country, args.departure, args.return_date)?;
    if let Some(origin) = args.origin {
        trip = trip.with_origin(origin);
    }

    let mut session = PackingSession::new(trip);

    if let Some(temperature) = args.temperature {
        if let Err(e) = session
            .refresh_suggestions(api.as_ref(), &[WeatherReading { temperature }])
            .await
        {
            warn!(error = %e, "Could not load suggestions, continuing without them");
        }
    }

    for arg in &args.items {
        let (name, quantity) = parse_item_arg(arg)?;
        if session.add_custom(name.clone()) == ActionOutcome::Duplicate {
            println!("  skipping duplicate item '{name}'");
            continue;
        }
        if quantity != 1 {
            session.set_quantity(&name, quantity)?;
        }
    }

    println!("🧳 {}", session.trip().title());
    for item in session.list() {
        println!("  {:>4} × {}", item.quantity.get(), item.display_name());
    }

    let policy = SubmissionPolicy {
        rollback_orphaned_lists: args.rollback || config.submission.rollback_orphaned_lists,
    };
    let service = SubmissionService::new(api, config.owner_id).with_policy(policy);

    match session.submit(&service).await? {
        SubmissionOutcome::Skipped => {
            println!("\n  ⚠️  Nothing to save — add at least one item with --item");
        }
        SubmissionOutcome::Complete { list_id, items } => {
            println!("\n  ✅ Saved packing list #{list_id} with {} item(s)", items.len());
        }
        SubmissionOutcome::Partial {
            list_id,
            error,
            rolled_back,
        } => {
            let fate = if rolled_back { "deleted again" } else { "left without items" };
            return Err(format!(
                "packing list #{list_id} was created but its items were not saved ({error}); list {fate}"
            )
            .into());
        }
    }

    Ok(())
}
