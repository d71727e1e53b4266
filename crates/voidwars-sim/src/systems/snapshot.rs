//! Snapshot system: queries the ECS world and builds a complete GameSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use voidwars_core::components::*;
use voidwars_core::enums::{BuffKind, EnemyKind, GameMode, UpgradeId};
use voidwars_core::events::GameEvent;
use voidwars_core::ships::ship_stats;
use voidwars_core::state::*;
use voidwars_core::types::SimTime;

use crate::abilities::active_ability;
use crate::session::{GameStats, SessionStats};
use crate::upgrades;

/// Build a complete GameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    mode: GameMode,
    stats: &GameStats,
    session: &SessionStats,
    upgrade_choices: &[UpgradeId],
    events: Vec<GameEvent>,
) -> GameSnapshot {
    let upgrade_choices = if stats.level_complete {
        upgrade_choices
            .iter()
            .filter_map(|id| upgrades::find(*id))
            .map(|u| u.view())
            .collect()
    } else {
        Vec::new()
    };

    GameSnapshot {
        time: *time,
        mode,
        stats: stats.view(),
        players: build_huds(world, time.timestamp_ms),
        boss: build_boss(world, stats.level),
        upgrade_choices,
        session: session.view(),
        entities: EntityViews {
            players: build_ships(world),
            enemies: build_enemies(world),
            bullets: build_bullets(world),
            power_ups: build_power_ups(world),
            particles: build_particles(world),
            texts: build_texts(world),
        },
        events,
    }
}

/// Entity id stable across the snapshot stream.
fn view_id(entity: hecs::Entity) -> u64 {
    entity.to_bits().get()
}

fn build_huds(world: &World, timestamp_ms: f64) -> Vec<PlayerHud> {
    let mut huds: Vec<PlayerHud> = world
        .query::<&Player>()
        .iter()
        .map(|(_, player)| {
            let cooldown = ship_stats(player.class).skill_cooldown_ms * player.skill_cooldown_multiplier;
            let skill_cooldown_fraction = if player.skill.ready || cooldown <= 0.0 {
                0.0
            } else {
                (player.skill.cooldown_remaining_ms / cooldown).clamp(0.0, 1.0)
            };
            PlayerHud {
                slot: player.slot,
                class: player.class,
                hp: player.hp,
                max_hp: player.max_hp,
                alive: player.is_alive(),
                skill_ready: player.skill.ready,
                skill_cooldown_fraction,
                skill_active: player.skill.is_active(),
                buffs: player
                    .buffs
                    .iter()
                    .map(|b| BuffView {
                        kind: b.kind,
                        remaining_ms: (b.expires_at_ms - timestamp_ms).max(0.0),
                    })
                    .collect(),
            }
        })
        .collect();
    huds.sort_by_key(|h| h.slot);
    huds
}

/// The main boss if present, otherwise a mini-boss.
fn build_boss(world: &World, level: u32) -> Option<BossView> {
    world
        .query::<(&Body, &Enemy)>()
        .iter()
        .filter(|(_, (body, enemy))| !body.marked_for_removal && enemy.kind.is_boss())
        .min_by_key(|(_, (_, enemy))| (enemy.kind != EnemyKind::Boss, enemy.spawn_order))
        .map(|(_, (_, enemy))| BossView {
            kind: enemy.kind,
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            level,
        })
}

fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(&Body, &Player)>()
        .iter()
        .map(|(entity, (body, player))| ShipView {
            id: view_id(entity),
            slot: player.slot,
            class: player.class,
            position: body.position,
            width: body.width,
            height: body.height,
            alive: player.is_alive(),
            shielded: player.has_buff(BuffKind::Shield),
            phased: active_ability(player).is_some_and(|a| a.grants_invulnerability()),
        })
        .collect();
    ships.sort_by_key(|s| s.slot);
    ships
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Body, &Enemy)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(entity, (body, enemy))| EnemyView {
            id: view_id(entity),
            kind: enemy.kind,
            position: body.position,
            width: body.width,
            height: body.height,
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            rotation: body.rotation,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Body, &Bullet)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(entity, (body, bullet))| BulletView {
            id: view_id(entity),
            kind: bullet.kind,
            from_enemy: bullet.from_enemy,
            position: body.position,
            width: body.width,
            height: body.height,
        })
        .collect();
    bullets.sort_by_key(|b| b.id);
    bullets
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    let mut power_ups: Vec<PowerUpView> = world
        .query::<(&Body, &PowerUp)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(entity, (body, power_up))| PowerUpView {
            id: view_id(entity),
            kind: power_up.kind,
            position: body.position,
        })
        .collect();
    power_ups.sort_by_key(|p| p.id);
    power_ups
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut particles: Vec<(u64, ParticleView)> = world
        .query::<(&Body, &Particle)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(entity, (body, particle))| {
            (
                view_id(entity),
                ParticleView {
                    position: body.position,
                    alpha: (particle.life / particle.max_life).clamp(0.0, 1.0),
                },
            )
        })
        .collect();
    particles.sort_by_key(|(id, _)| *id);
    particles.into_iter().map(|(_, p)| p).collect()
}

fn build_texts(world: &World) -> Vec<TextView> {
    let mut texts: Vec<(u64, TextView)> = world
        .query::<(&Body, &FloatingText)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(entity, (body, text))| {
            (
                view_id(entity),
                TextView {
                    position: body.position,
                    text: text.text.clone(),
                    style: text.style,
                    alpha: text.life.clamp(0.0, 1.0),
                    scale: text.scale,
                },
            )
        })
        .collect();
    texts.sort_by_key(|(id, _)| *id);
    texts.into_iter().map(|(_, t)| t).collect()
}
