//! Simulation engine for VOID WARS.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed order,
//! and produces `GameSnapshot`s for the frontend.

pub mod abilities;
pub mod config;
pub mod engine;
pub mod rng;
pub mod session;
pub mod systems;
pub mod upgrades;
pub mod world_setup;

pub use config::{ConfigError, SimConfig, Tuning};
pub use engine::SimulationEngine;
pub use session::SessionError;
pub use voidwars_core as core;

#[cfg(test)]
mod tests;
