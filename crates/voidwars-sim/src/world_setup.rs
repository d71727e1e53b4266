//! Entity spawn factories for the simulation world.
//!
//! Creates players, enemies, bosses, projectiles, pickups and cosmetic
//! feedback with the appropriate component bundles.

use hecs::{Entity, World};

use voidwars_ai::profiles::{get_boss_profile, get_profile};
use voidwars_core::components::*;
use voidwars_core::constants::*;
use voidwars_core::enums::*;
use voidwars_core::ships::ship_stats;
use voidwars_core::types::{Aabb, Vec2};

use crate::rng::RandomSource;

/// Spawn one player per class, spread evenly along the bottom edge.
/// Solo ships start centred; co-op ships at one and two thirds of the width.
pub fn spawn_players(world: &mut World, classes: &[ShipClass]) -> Vec<Entity> {
    let slots = classes.len() as f32;
    classes
        .iter()
        .enumerate()
        .map(|(slot, &class)| {
            let center_x = PLAYFIELD_WIDTH * (slot as f32 + 1.0) / (slots + 1.0);
            spawn_player(world, slot as u8, class, center_x)
        })
        .collect()
}

pub fn spawn_player(world: &mut World, slot: u8, class: ShipClass, center_x: f32) -> Entity {
    let stats = ship_stats(class);
    let body = Body::new(
        Vec2::new(center_x - stats.width / 2.0, PLAYER_START_Y),
        Vec2::ZERO,
        stats.width,
        stats.height,
    );
    let player = Player {
        slot,
        class,
        hp: stats.hp,
        max_hp: stats.hp,
        speed: stats.speed,
        fire_interval_ms: stats.fire_interval_ms,
        damage_multiplier: 1.0,
        skill_cooldown_multiplier: 1.0,
        collision_resistance: stats.collision_resistance,
        buffs: Vec::new(),
        last_shot_ms: f64::NEG_INFINITY,
        skill: SkillState::default(),
    };
    world.spawn((body, player))
}

/// Spawn order for the next enemy: newer than every enemy still in the world.
/// hecs recycles entity ids, so ids cannot stand in for age.
pub fn next_spawn_order(world: &World) -> u64 {
    world
        .query::<&Enemy>()
        .iter()
        .map(|(_, enemy)| enemy.spawn_order + 1)
        .max()
        .unwrap_or(0)
}

/// Spawn a regular enemy (basic, fast or tank) above the top edge.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut dyn RandomSource,
    kind: EnemyKind,
    level: u32,
    hp_factor: f32,
    timestamp_ms: f64,
) -> Option<Entity> {
    let profile = get_profile(kind)?;
    let x = rng.range(0.0, PLAYFIELD_WIDTH - profile.width);
    let vx = if profile.strafe_speed > 0.0 {
        if rng.chance(0.5) {
            -profile.strafe_speed
        } else {
            profile.strafe_speed
        }
    } else {
        0.0
    };
    let hp = profile.hp_per_level * level as f32 * hp_factor;
    let shoot_at_ms = timestamp_ms + rng.next_unit() * ENEMY_FIRST_SHOT_JITTER_MS;
    let phase_offset = rng.next_unit() as f32;

    let body = Body::new(
        Vec2::new(x, ENEMY_SPAWN_Y),
        Vec2::new(vx, profile.descent_speed(level)),
        profile.width,
        profile.height,
    );
    let enemy = Enemy {
        kind,
        hp,
        max_hp: hp,
        score_value: profile.score_per_level * level as u64,
        shoot_at_ms,
        hold_altitude: None,
        phase_offset,
        movement: MovementPhase::Engaged,
        spin: 0.0,
        spawn_order: next_spawn_order(world),
    };
    Some(world.spawn((body, enemy)))
}

/// Spawn a drifting, weapon-proof obstacle.
pub fn spawn_asteroid(world: &mut World, rng: &mut dyn RandomSource) -> Entity {
    let size = rng.range(ASTEROID_MIN_SIZE, ASTEROID_MAX_SIZE);
    let x = rng.range(0.0, PLAYFIELD_WIDTH - size);
    let velocity = Vec2::new(rng.range(-1.0, 1.0), rng.range(1.0, 2.0));
    let spin = rng.range(-0.05, 0.05);

    let body = Body::new(Vec2::new(x, ENEMY_SPAWN_Y), velocity, size, size);
    let enemy = Enemy {
        kind: EnemyKind::Asteroid,
        hp: ASTEROID_HP,
        max_hp: ASTEROID_HP,
        score_value: 0,
        shoot_at_ms: f64::INFINITY,
        hold_altitude: None,
        phase_offset: 0.0,
        movement: MovementPhase::Engaged,
        spin,
        spawn_order: next_spawn_order(world),
    };
    world.spawn((body, enemy))
}

/// Spawn a boss or mini-boss centred above the playfield.
pub fn spawn_boss(world: &mut World, mini: bool, level: u32, hp_factor: f32, timestamp_ms: f64) -> Entity {
    let profile = get_boss_profile(mini);
    let hp = profile.hp(level) * hp_factor;
    let body = Body::new(
        Vec2::new(PLAYFIELD_WIDTH / 2.0 - profile.width / 2.0, BOSS_SPAWN_Y),
        Vec2::ZERO,
        profile.width,
        profile.height,
    );
    let enemy = Enemy {
        kind: if mini {
            EnemyKind::MiniBoss
        } else {
            EnemyKind::Boss
        },
        hp,
        max_hp: hp,
        score_value: profile.score_per_level * level as u64,
        shoot_at_ms: timestamp_ms + BOSS_FIRST_SHOT_DELAY_MS,
        hold_altitude: Some(BOSS_HOLD_ALTITUDE),
        phase_offset: 0.0,
        movement: MovementPhase::Entering,
        spin: 0.0,
        spawn_order: next_spawn_order(world),
    };
    world.spawn((body, enemy))
}

/// Standard player shot from the ship's nose.
pub fn spawn_player_bullet(world: &mut World, ship: &Body, damage: f32) -> Entity {
    let body = Body::new(
        Vec2::new(ship.center().x - PLAYER_BULLET_WIDTH / 2.0, ship.position.y),
        Vec2::new(0.0, -PLAYER_BULLET_SPEED),
        PLAYER_BULLET_WIDTH,
        PLAYER_BULLET_HEIGHT,
    );
    world.spawn((
        body,
        Bullet {
            damage,
            can_crit: true,
            from_enemy: false,
            kind: ProjectileKind::Standard,
            piercing: false,
        },
    ))
}

/// Enemy shot whose top edge is centred on `origin`.
pub fn spawn_enemy_bullet(world: &mut World, origin: Vec2, velocity: Vec2, width: f32, height: f32, damage: f32) -> Entity {
    let body = Body::new(Vec2::new(origin.x - width / 2.0, origin.y), velocity, width, height);
    world.spawn((
        body,
        Bullet {
            damage,
            can_crit: false,
            from_enemy: true,
            kind: ProjectileKind::Standard,
            piercing: false,
        },
    ))
}

/// Radial burst of homing missiles centred on `origin`.
pub fn spawn_missiles(world: &mut World, origin: Vec2, count: usize, damage: f32) {
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let velocity = Vec2::new(
            angle.cos() * MISSILE_LAUNCH_SPEED,
            angle.sin() * MISSILE_LAUNCH_SPEED - MISSILE_LAUNCH_SPEED,
        )
        .clamp_length_max(HOMING_MAX_SPEED);
        let body = Body::new(
            origin - Vec2::splat(MISSILE_SIZE / 2.0),
            velocity,
            MISSILE_SIZE,
            MISSILE_SIZE,
        );
        world.spawn((
            body,
            Bullet {
                damage,
                can_crit: true,
                from_enemy: false,
                kind: ProjectileKind::Homing,
                piercing: false,
            },
        ));
    }
}

/// Stationary piercing beam. Lives for the tick it is spawned in.
pub fn spawn_beam(world: &mut World, area: Aabb, damage: f32) -> Entity {
    let body = Body::new(area.min, Vec2::ZERO, area.size.x, area.size.y);
    world.spawn((
        body,
        Bullet {
            damage,
            can_crit: true,
            from_enemy: false,
            kind: ProjectileKind::Beam,
            piercing: true,
        },
    ))
}

pub fn spawn_power_up(world: &mut World, kind: PowerUpKind, at: Vec2) -> Entity {
    let body = Body::new(
        at,
        Vec2::new(0.0, POWER_UP_FALL_SPEED),
        POWER_UP_SIZE,
        POWER_UP_SIZE,
    );
    world.spawn((body, PowerUp { kind }))
}

/// Spawn a power-up of a uniformly random kind.
pub fn spawn_random_power_up(world: &mut World, rng: &mut dyn RandomSource, at: Vec2) -> PowerUpKind {
    let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
    spawn_power_up(world, kind, at);
    kind
}

/// Burst of sparks at `at`, each moving up to `speed / 2` per axis.
pub fn spawn_particles(world: &mut World, fx: &mut dyn RandomSource, at: Vec2, count: usize, speed: f32) {
    for _ in 0..count {
        let velocity = Vec2::new(
            (fx.next_unit() as f32 - 0.5) * speed,
            (fx.next_unit() as f32 - 0.5) * speed,
        );
        world.spawn((
            Body::new(at, velocity, PARTICLE_SIZE, PARTICLE_SIZE),
            Particle {
                life: 1.0,
                max_life: 1.0,
            },
        ));
    }
}

pub fn spawn_text(world: &mut World, at: Vec2, text: String, style: TextStyle) -> Entity {
    let scale = match style {
        TextStyle::Critical => 1.5,
        TextStyle::Damage | TextStyle::Heal => 1.0,
    };
    world.spawn((
        Body::new(at, Vec2::new(0.0, -TEXT_RISE_SPEED), 0.0, 0.0),
        FloatingText {
            text,
            style,
            life: 1.0,
            scale,
        },
    ))
}
