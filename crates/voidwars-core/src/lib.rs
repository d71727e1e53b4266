//! Core types and definitions for the VOID WARS simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, ship tables, and constants.
//! It has no dependency on any runtime, ECS, or presentation framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod ships;
pub mod state;
pub mod types;
