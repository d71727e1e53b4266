//! Countdown timers: skill cooldown/duration, combo decay and timed buffs.

use hecs::World;

use voidwars_core::components::{Buff, Enemy, Player};
use voidwars_core::enums::BuffKind;

use crate::session::GameStats;

/// Advance every delta-time countdown by `dt_ms`. Timers never go negative.
pub fn run(world: &mut World, stats: &mut GameStats, dt_ms: f64) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        let skill = &mut player.skill;
        if !skill.ready {
            skill.cooldown_remaining_ms -= dt_ms;
            if skill.cooldown_remaining_ms <= 0.0 {
                skill.cooldown_remaining_ms = 0.0;
                skill.ready = true;
            }
        }
        if skill.active_remaining_ms > 0.0 {
            skill.active_remaining_ms = (skill.active_remaining_ms - dt_ms).max(0.0);
        }
    }

    if stats.combo_window_ms > 0.0 {
        stats.combo_window_ms -= dt_ms;
        if stats.combo_window_ms <= 0.0 {
            stats.combo_window_ms = 0.0;
            stats.combo = 0;
        }
    }
}

/// Insert a buff, replacing any existing buff of the same kind.
pub fn grant_buff(player: &mut Player, kind: BuffKind, expires_at_ms: f64) {
    player.buffs.retain(|b| b.kind != kind);
    player.buffs.push(Buff { kind, expires_at_ms });
}

/// Drop buffs whose expiry is not after `timestamp_ms`.
pub fn expire_buffs(world: &mut World, timestamp_ms: f64) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        player.buffs.retain(|b| b.expires_at_ms > timestamp_ms);
    }
}

/// Push every absolute deadline forward by `delta_ms` after a freeze.
pub fn shift_clock(world: &mut World, delta_ms: f64) {
    if delta_ms <= 0.0 {
        return;
    }
    for (_entity, player) in world.query_mut::<&mut Player>() {
        for buff in &mut player.buffs {
            buff.expires_at_ms += delta_ms;
        }
        player.last_shot_ms += delta_ms;
    }
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        enemy.shoot_at_ms += delta_ms;
    }
}
