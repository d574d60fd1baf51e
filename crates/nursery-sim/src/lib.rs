//! Nursery Sim - configuration and day-by-day driver for the plant lifecycle.
//!
//! The `nursery` binary loads a [`config::SimConfig`], builds a
//! [`simulation::Simulation`] from it and runs it to completion.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod simulation;

pub use config::{CareConfig, PlantSeed, SimConfig, CONFIG_FILE};
pub use simulation::{SimReport, Simulation};
