//! # Nursery
//!
//! Runs a day-by-day nursery simulation on top of the plant lifecycle
//! state machine and prints what became of each plant.
//!
//! Usage: `nursery [config.toml]`. Without an argument `nursery.toml` in
//! the working directory is used; a missing file means defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nursery_sim::config::{is_missing, log_load_outcome};
use nursery_sim::{SimConfig, Simulation, CONFIG_FILE};

/// Main entry point.
fn main() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);

    // Read before the subscriber exists so the filter can come from the file;
    // the outcome is logged once logging is up.
    let loaded = SimConfig::read_from(&path);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    config.validate();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)?,
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("Nursery simulation starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log_load_outcome(&path, &loaded);
    if loaded.as_ref().is_err_and(is_missing) {
        config.save_to(&path)?;
    }

    let mut sim = Simulation::from_config(&config)?;
    let report = sim.run();

    for (stage, count) in &report.stage_counts {
        info!("{stage}: {count}");
    }
    info!(
        "Ready for sale: {}",
        if report.ready_for_sale.is_empty() {
            "none".to_string()
        } else {
            report.ready_for_sale.join(", ")
        }
    );
    info!(
        days = report.days,
        died = report.died.len(),
        state_changes = report.state_changes,
        "Nursery simulation complete"
    );
    Ok(())
}
