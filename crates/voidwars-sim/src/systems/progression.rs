//! Level progression: mission countdown, boss and mini-boss arrival, and
//! the game-over check.

use hecs::World;
use log::info;

use voidwars_core::components::{Body, Enemy, Player};
use voidwars_core::constants::{CLEAR_PARTICLES, MINI_BOSS_TRIGGER_FRACTION};
use voidwars_core::enums::EnemyKind;
use voidwars_core::events::GameEvent;

use crate::config::Tuning;
use crate::rng::RandomSource;
use crate::session::GameStats;
use crate::world_setup;

const CLEAR_SPEED: f32 = 5.0;

/// Count the mission timer down and bring in bosses when it calls for them.
/// The timer is frozen while the level boss is on the field.
#[allow(clippy::too_many_arguments)]
pub fn advance_mission(
    world: &mut World,
    stats: &mut GameStats,
    tuning: &Tuning,
    hp_factor: f32,
    timestamp_ms: f64,
    dt_ms: f64,
    fx: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if stats.boss_active || stats.mission_time_ms <= 0.0 {
        return;
    }

    stats.mission_time_ms -= dt_ms;
    if stats.mission_time_ms <= 0.0 {
        stats.mission_time_ms = 0.0;
        spawn_boss_wave(world, stats, false, hp_factor, timestamp_ms, fx, events);
        return;
    }

    let halfway = tuning.mission_duration_ms * MINI_BOSS_TRIGGER_FRACTION;
    if stats.level >= tuning.mini_boss_min_level
        && !stats.mini_boss_spawned
        && stats.mission_time_ms <= halfway
    {
        spawn_boss_wave(world, stats, true, hp_factor, timestamp_ms, fx, events);
    }
}

/// Clear the field of ordinary enemies and bring in a boss or mini-boss.
/// Obstacles stay.
pub fn spawn_boss_wave(
    world: &mut World,
    stats: &mut GameStats,
    mini: bool,
    hp_factor: f32,
    timestamp_ms: f64,
    fx: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let mut cleared = Vec::new();
    for (_entity, (body, enemy)) in world.query_mut::<(&mut Body, &Enemy)>() {
        if body.marked_for_removal || enemy.kind.is_obstacle() {
            continue;
        }
        body.marked_for_removal = true;
        cleared.push(body.center());
    }
    for at in cleared {
        world_setup::spawn_particles(world, fx, at, CLEAR_PARTICLES, CLEAR_SPEED);
    }

    world_setup::spawn_boss(world, mini, stats.level, hp_factor, timestamp_ms);
    let kind = if mini {
        stats.mini_boss_active = true;
        stats.mini_boss_spawned = true;
        EnemyKind::MiniBoss
    } else {
        stats.boss_active = true;
        stats.mini_boss_active = false;
        EnemyKind::Boss
    };
    info!("{:?} arrived on level {}", kind, stats.level);
    events.push(GameEvent::BossSpawned {
        kind,
        level: stats.level,
    });
}

/// End the run once every player is down. Reports game over exactly once.
pub fn check_game_over(world: &World, stats: &mut GameStats, events: &mut Vec<GameEvent>) {
    if stats.game_over {
        return;
    }
    let mut query = world.query::<&Player>();
    let mut players = query.iter().peekable();
    if players.peek().is_none() {
        return;
    }
    if players.all(|(_, p)| !p.is_alive()) {
        stats.game_over = true;
        info!("Game over on level {} with score {}", stats.level, stats.score);
        events.push(GameEvent::GameOver { score: stats.score });
    }
}
