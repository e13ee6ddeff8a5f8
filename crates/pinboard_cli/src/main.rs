//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pinboard_core` wiring: config, logging and the coordinator.
//! - Run the seeded demo and show the card-delete cascade.

use pinboard_core::{init_logging, IntegrityCoordinator, ServiceConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pinboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("pinboard_core version={}", pinboard_core::core_version());

    let config = ServiceConfig::from_env()?;
    if let Some(settings) = config.log_settings() {
        init_logging(&settings)?;
    }

    let coordinator = IntegrityCoordinator::in_memory();
    let (card, list) = coordinator.seed_demo()?;
    println!("seeded list: {}", serde_json::to_string(&list)?);

    coordinator.delete_card(card.id)?;
    let after = coordinator.get_list(list.id)?;
    log::info!(
        "event=cli_demo module=cli status=ok list_id={} card_refs={}",
        after.id,
        after.card_ids.len()
    );
    println!("after card delete: {}", serde_json::to_string(&after)?);
    Ok(())
}
