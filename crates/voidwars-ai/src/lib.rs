//! Enemy AI for VOID WARS.
//!
//! Implements the per-kind movement state machine and the fire patterns
//! (volleys) of every enemy kind.

pub mod behavior;
pub mod profiles;

pub use voidwars_core as core;
