//! VOID WARS headless runtime.
//!
//! Runs the simulation engine on its own thread at a fixed frame rate,
//! forwards input and session commands to it, and publishes the latest
//! snapshot for polling.

pub mod game_loop;
pub mod state;

pub use voidwars_core as core;
