//! Spawn scheduler: at most one regular enemy or obstacle per interval.

use hecs::World;
use log::debug;

use voidwars_core::constants::{ASTEROID_CHANCE_MAX, ASTEROID_CHANCE_PER_LEVEL};
use voidwars_core::enums::{EnemyKind, GameMode};

use crate::config::Tuning;
use crate::rng::RandomSource;
use crate::session::GameStats;
use crate::world_setup;

/// When the last spawn attempt happened. Unset until the first tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnSchedule {
    pub last_spawn_ms: Option<f64>,
}

impl SpawnSchedule {
    /// Push the schedule forward after a freeze.
    pub fn shift(&mut self, delta_ms: f64) {
        if let Some(last) = self.last_spawn_ms.as_mut() {
            *last += delta_ms;
        }
    }
}

/// Milliseconds between spawn attempts on `level`.
pub fn spawn_interval_ms(tuning: &Tuning, mode: GameMode, level: u32) -> f64 {
    let base = match mode {
        GameMode::Solo => tuning.spawn_interval_base_ms,
        GameMode::Coop => tuning.spawn_interval_base_ms * tuning.coop_spawn_interval_factor,
    };
    base / (level.max(1) as f64).sqrt()
}

/// Weighted kind draw for a regular spawn.
pub fn pick_kind(rng: &mut dyn RandomSource) -> EnemyKind {
    let roll = rng.next_unit();
    if roll > 0.8 {
        EnemyKind::Tank
    } else if roll > 0.6 {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Run one scheduling step. The interval clock restarts on every attempt,
/// including suppressed ones.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    schedule: &mut SpawnSchedule,
    stats: &GameStats,
    tuning: &Tuning,
    mode: GameMode,
    hp_factor: f32,
    rng: &mut dyn RandomSource,
    timestamp_ms: f64,
) {
    let Some(last) = schedule.last_spawn_ms else {
        schedule.last_spawn_ms = Some(timestamp_ms);
        return;
    };
    if timestamp_ms - last <= spawn_interval_ms(tuning, mode, stats.level) {
        return;
    }
    schedule.last_spawn_ms = Some(timestamp_ms);

    if stats.boss_active || stats.mini_boss_active || stats.mission_time_ms <= 0.0 {
        return;
    }

    let asteroid_chance = (ASTEROID_CHANCE_PER_LEVEL * stats.level as f64).min(ASTEROID_CHANCE_MAX);
    if rng.chance(asteroid_chance) {
        world_setup::spawn_asteroid(world, rng);
        debug!("Spawned asteroid at {:.0} ms", timestamp_ms);
        return;
    }

    let kind = pick_kind(rng);
    if world_setup::spawn_enemy(world, rng, kind, stats.level, hp_factor, timestamp_ms).is_some() {
        debug!("Spawned {:?} on level {} at {:.0} ms", kind, stats.level, timestamp_ms);
    }
}
