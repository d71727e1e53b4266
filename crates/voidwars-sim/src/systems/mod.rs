//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the session state they touch. They do not own state; entity state
//! lives in components and session state in `crate::session`.

pub mod achievements;
pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod enemy_ai;
pub mod player_control;
pub mod progression;
pub mod projectiles;
pub mod skills;
pub mod snapshot;
pub mod spawner;
pub mod timers;
