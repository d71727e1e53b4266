//! Tests for the simulation engine, combat resolver, progression and skills.

use hecs::{Entity, World};

use voidwars_core::commands::{ActionSet, FrameInput, SessionCommand};
use voidwars_core::components::*;
use voidwars_core::constants::*;
use voidwars_core::enums::*;
use voidwars_core::events::GameEvent;
use voidwars_core::types::{Aabb, Vec2};

use crate::config::{SimConfig, Tuning};
use crate::engine::SimulationEngine;
use crate::rng::ScriptedRandom;
use crate::session::{GameStats, SessionError, SessionStats};
use crate::systems::collision::{self, Combat};
use crate::systems::{projectiles, skills, timers};
use crate::upgrades::UPGRADE_POOL;
use crate::world_setup;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn idle() -> FrameInput {
    FrameInput::default()
}

fn pause_key() -> FrameInput {
    FrameInput {
        pause: true,
        ..Default::default()
    }
}

/// Bare world plus the session state the resolver mutates.
struct Arena {
    world: World,
    stats: GameStats,
    session: SessionStats,
    tuning: Tuning,
    rng: ScriptedRandom,
    fx: ScriptedRandom,
    events: Vec<GameEvent>,
    choices: Vec<UpgradeId>,
}

impl Arena {
    /// Every gameplay roll returns `roll`. 0.99 means no crits and no drops.
    fn new(roll: f64) -> Self {
        Self {
            world: World::new(),
            stats: GameStats::new(MISSION_DURATION_MS),
            session: SessionStats::new(0, &[]),
            tuning: Tuning::default(),
            rng: ScriptedRandom::constant(roll),
            fx: ScriptedRandom::constant(0.5),
            events: Vec::new(),
            choices: Vec::new(),
        }
    }

    fn resolve(&mut self, timestamp_ms: f64) {
        let mut combat = Combat {
            stats: &mut self.stats,
            session: &mut self.session,
            tuning: &self.tuning,
            rng: &mut self.rng,
            fx: &mut self.fx,
            events: &mut self.events,
            upgrade_choices: &mut self.choices,
            timestamp_ms,
        };
        collision::run(&mut self.world, &mut combat);
    }

    fn removed(&self, entity: Entity) -> bool {
        self.world.get::<&Body>(entity).unwrap().marked_for_removal
    }

    fn hp(&self, entity: Entity) -> f32 {
        self.world.get::<&Player>(entity).unwrap().hp
    }
}

fn enemy(world: &mut World, kind: EnemyKind, x: f32, y: f32, size: f32, hp: f32) -> Entity {
    let spawn_order = world_setup::next_spawn_order(world);
    world.spawn((
        Body::new(Vec2::new(x, y), Vec2::ZERO, size, size),
        Enemy {
            kind,
            hp,
            max_hp: hp,
            score_value: 10,
            shoot_at_ms: f64::INFINITY,
            hold_altitude: None,
            phase_offset: 0.0,
            movement: MovementPhase::Engaged,
            spin: 0.0,
            spawn_order,
        },
    ))
}

fn shot(world: &mut World, x: f32, y: f32, damage: f32) -> Entity {
    world.spawn((
        Body::new(Vec2::new(x, y), Vec2::ZERO, PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
        Bullet {
            damage,
            can_crit: true,
            from_enemy: false,
            kind: ProjectileKind::Standard,
            piercing: false,
        },
    ))
}

fn killed_scores(events: &[GameEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::EnemyKilled { score, .. } => Some(*score),
            _ => None,
        })
        .collect()
}

/// Engine whose next tick kills a level boss with a single planted shot.
fn engine_with_doomed_boss(mode: GameMode) -> SimulationEngine {
    let config = SimConfig {
        mode,
        ..Default::default()
    };
    let mut engine = SimulationEngine::with_random(config, Box::new(ScriptedRandom::constant(0.99)));
    let world = engine.world_mut();
    let boss = world_setup::spawn_boss(world, false, 1, 1.0, 0.0);
    {
        let (body, enemy) = world.query_one_mut::<(&mut Body, &mut Enemy)>(boss).unwrap();
        body.position = Vec2::new(340.0, 100.0);
        enemy.movement = MovementPhase::Engaged;
    }
    shot(world, 398.0, 150.0, 10_000.0);
    engine.stats_mut().boss_active = true;
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        mode: GameMode::Coop,
        partner_class: Some(ShipClass::Destroyer),
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    let firing = FrameInput {
        slots: [
            ActionSet {
                fire: true,
                left: true,
                ..Default::default()
            },
            ActionSet {
                fire: true,
                skill: true,
                ..Default::default()
            },
        ],
        pause: false,
    };

    for i in 0..900 {
        let ts = i as f64 * FRAME_MS;
        let snap_a = engine_a.tick(ts, &firing);
        let snap_b = engine_b.tick(ts, &firing);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    // Spawn positions are random, so the first enemy separates the runs.
    let mut diverged = false;
    for i in 0..600 {
        let ts = i as f64 * FRAME_MS;
        let json_a = serde_json::to_string(&engine_a.tick(ts, &idle())).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(ts, &idle())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Combat ----

#[test]
fn test_combo_scores_three_quick_kills() {
    let mut arena = Arena::new(0.99);
    for x in [100.0, 300.0, 500.0] {
        enemy(&mut arena.world, EnemyKind::Basic, x, 100.0, 30.0, 20.0);
        shot(&mut arena.world, x + 10.0, 110.0, 25.0);
    }

    arena.resolve(0.0);

    assert_eq!(killed_scores(&arena.events), vec![10, 11, 12]);
    assert_eq!(arena.stats.score, 33);
    assert_eq!(arena.stats.level_score, 33);
    assert_eq!(arena.stats.combo, 3);
    assert_eq!(arena.stats.combo_window_ms, COMBO_WINDOW_MS);
    assert_eq!(arena.session.kills, 3);
    assert_eq!(arena.session.best_combo, 3);
}

#[test]
fn test_hit_reduces_hp_and_kills_at_zero() {
    let mut arena = Arena::new(0.99);
    let target = enemy(&mut arena.world, EnemyKind::Basic, 100.0, 100.0, 30.0, 20.0);

    let first = shot(&mut arena.world, 110.0, 110.0, 5.0);
    arena.resolve(0.0);
    assert_eq!(arena.world.get::<&Enemy>(target).unwrap().hp, 15.0);
    assert!(!arena.removed(target), "enemy survives a partial hit");
    assert!(arena.removed(first), "standard shots are consumed");

    shot(&mut arena.world, 110.0, 110.0, 15.0);
    arena.resolve(16.0);
    assert_eq!(arena.world.get::<&Enemy>(target).unwrap().hp, 0.0);
    assert!(arena.removed(target), "enemy at zero hp is removed");
}

#[test]
fn test_critical_hit_doubles_damage() {
    let mut arena = Arena::new(0.99);
    arena.rng = ScriptedRandom::new([0.05], 0.99);
    let target = enemy(&mut arena.world, EnemyKind::Tank, 100.0, 100.0, 45.0, 60.0);
    shot(&mut arena.world, 110.0, 110.0, 25.0);

    arena.resolve(0.0);

    assert_eq!(arena.world.get::<&Enemy>(target).unwrap().hp, 10.0);
    assert!(arena.events.contains(&GameEvent::EnemyHit {
        kind: EnemyKind::Tank,
        damage: 50.0,
        critical: true,
    }));
}

#[test]
fn test_obstacle_absorbs_standard_shots() {
    let mut arena = Arena::new(0.99);
    let rock = enemy(&mut arena.world, EnemyKind::Asteroid, 100.0, 100.0, 40.0, ASTEROID_HP);
    let bullet = shot(&mut arena.world, 110.0, 110.0, 25.0);

    arena.resolve(0.0);

    assert!(arena.removed(bullet));
    assert!(!arena.removed(rock));
    assert_eq!(arena.world.get::<&Enemy>(rock).unwrap().hp, ASTEROID_HP);
    assert!(arena.events.contains(&GameEvent::ShotDeflected));
    assert_eq!(arena.stats.score, 0);
}

#[test]
fn test_beam_passes_through_obstacles() {
    let mut arena = Arena::new(0.99);
    let rock = enemy(&mut arena.world, EnemyKind::Asteroid, 100.0, 100.0, 40.0, ASTEROID_HP);
    let tank = enemy(&mut arena.world, EnemyKind::Tank, 100.0, 300.0, 45.0, 500.0);
    let beam = world_setup::spawn_beam(&mut arena.world, Aabb::new(100.0, 0.0, BEAM_WIDTH, 500.0), 200.0);

    arena.resolve(0.0);

    assert_eq!(arena.world.get::<&Enemy>(rock).unwrap().hp, ASTEROID_HP);
    assert_eq!(arena.world.get::<&Enemy>(tank).unwrap().hp, 300.0);
    assert!(!arena.removed(beam), "piercing beams are not consumed");
    assert!(!arena.events.contains(&GameEvent::ShotDeflected));
}

#[test]
fn test_boss_kill_completes_level_and_skips_later_stages() {
    let mut arena = Arena::new(0.99);
    arena.stats.boss_active = true;
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Cruiser, 400.0);
    let boss = world_setup::spawn_boss(&mut arena.world, false, 1, 1.0, 0.0);
    arena.world.get::<&mut Body>(boss).unwrap().position = Vec2::new(100.0, 80.0);
    shot(&mut arena.world, 150.0, 100.0, 500.0);
    let incoming = world_setup::spawn_enemy_bullet(&mut arena.world, Vec2::new(400.0, 530.0), Vec2::ZERO, 6.0, 12.0, 10.0);

    arena.resolve(0.0);

    assert!(arena.stats.level_complete);
    assert!(arena.stats.paused);
    assert!(!arena.stats.boss_active);
    assert_eq!(arena.session.bosses_killed, 1);
    assert_eq!(arena.choices.len(), UPGRADE_CHOICES);
    let mut distinct = arena.choices.clone();
    distinct.sort_by_key(|id| id.as_str());
    distinct.dedup();
    assert_eq!(distinct.len(), UPGRADE_CHOICES, "choices must be distinct");
    assert!(arena.choices.iter().all(|id| UPGRADE_POOL.iter().any(|u| u.id == *id)));
    assert!(arena.events.contains(&GameEvent::LevelComplete { level: 1 }));

    assert_eq!(arena.hp(pilot), 100.0, "enemy shots are skipped after level complete");
    assert!(!arena.removed(incoming));
}

#[test]
fn test_mini_boss_kill_resumes_spawning_and_drops() {
    let mut arena = Arena::new(0.99);
    arena.stats.mini_boss_active = true;
    let mini = world_setup::spawn_boss(&mut arena.world, true, 2, 1.0, 0.0);
    arena.world.get::<&mut Body>(mini).unwrap().position = Vec2::new(100.0, 80.0);
    shot(&mut arena.world, 120.0, 90.0, 1_000.0);

    arena.resolve(0.0);

    assert!(!arena.stats.mini_boss_active);
    assert!(!arena.stats.level_complete);
    let drops = arena.world.query::<&PowerUp>().iter().count();
    assert_eq!(drops, 1, "mini-boss always drops a power-up");
}

#[test]
fn test_enemy_shot_damages_and_clamps_hp() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Spectre, 400.0);
    let bullet = world_setup::spawn_enemy_bullet(&mut arena.world, Vec2::new(400.0, 530.0), Vec2::ZERO, 6.0, 12.0, 100.0);

    arena.resolve(0.0);

    assert_eq!(arena.hp(pilot), 0.0);
    assert!(arena.removed(bullet));
    assert!(arena.events.contains(&GameEvent::PlayerDown { slot: 0 }));
}

#[test]
fn test_shield_blocks_shots_and_ramming() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Cruiser, 400.0);
    timers::grant_buff(&mut arena.world.get::<&mut Player>(pilot).unwrap(), BuffKind::Shield, 10_000.0);
    let bullet = world_setup::spawn_enemy_bullet(&mut arena.world, Vec2::new(400.0, 530.0), Vec2::ZERO, 6.0, 12.0, 10.0);
    let rammer = enemy(&mut arena.world, EnemyKind::Basic, 385.0, 525.0, 30.0, 20.0);

    arena.resolve(0.0);

    assert_eq!(arena.hp(pilot), 100.0);
    assert!(!arena.removed(bullet), "shots pass a shielded ship");
    assert!(arena.removed(rammer), "rammed enemies are destroyed");
    assert_eq!(arena.stats.score, 0, "ramming awards no score");
    assert_eq!(arena.session.kills, 0);
}

#[test]
fn test_phase_shift_blocks_shots() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Spectre, 400.0);
    arena.world.get::<&mut Player>(pilot).unwrap().skill.active_remaining_ms = 1_000.0;
    world_setup::spawn_enemy_bullet(&mut arena.world, Vec2::new(400.0, 530.0), Vec2::ZERO, 6.0, 12.0, 10.0);

    arena.resolve(0.0);

    assert_eq!(arena.hp(pilot), 40.0);
}

#[test]
fn test_obstacle_rams_through_shield() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Titan, 400.0);
    timers::grant_buff(&mut arena.world.get::<&mut Player>(pilot).unwrap(), BuffKind::Shield, 10_000.0);
    let rock = enemy(&mut arena.world, EnemyKind::Asteroid, 380.0, 530.0, 40.0, ASTEROID_HP);

    arena.resolve(0.0);

    let resistance = ship_resistance(ShipClass::Titan);
    let expected = 300.0 - (OBSTACLE_RAM_DAMAGE * (1.0 - resistance)).floor();
    assert_eq!(arena.hp(pilot), expected);
    assert!(arena.removed(rock));
}

fn ship_resistance(class: ShipClass) -> f32 {
    voidwars_core::ships::ship_stats(class).collision_resistance
}

#[test]
fn test_ramming_boss_chips_it() {
    let mut arena = Arena::new(0.99);
    arena.stats.boss_active = true;
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Interceptor, 400.0);
    let boss = world_setup::spawn_boss(&mut arena.world, false, 1, 1.0, 0.0);
    arena.world.get::<&mut Body>(boss).unwrap().position = Vec2::new(350.0, 480.0);

    arena.resolve(0.0);

    assert!(!arena.removed(boss), "bosses survive contact");
    assert_eq!(arena.world.get::<&Enemy>(boss).unwrap().hp, 200.0 - BOSS_RAM_CHIP_DAMAGE);
    assert_eq!(arena.hp(pilot), 60.0 - RAM_DAMAGE);
}

#[test]
fn test_pickup_replaces_same_kind_buff() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Cruiser, 400.0);
    let at = Vec2::new(390.0, 530.0);

    world_setup::spawn_power_up(&mut arena.world, PowerUpKind::Speed, at);
    arena.resolve(1_000.0);
    world_setup::spawn_power_up(&mut arena.world, PowerUpKind::Shield, at);
    arena.resolve(2_000.0);
    world_setup::spawn_power_up(&mut arena.world, PowerUpKind::Speed, at);
    arena.resolve(3_000.0);

    let player = arena.world.get::<&Player>(pilot).unwrap();
    assert_eq!(player.buffs.len(), 2);
    let speed: Vec<&Buff> = player.buffs.iter().filter(|b| b.kind == BuffKind::Speed).collect();
    assert_eq!(speed.len(), 1, "same-kind pickups replace");
    assert_eq!(speed[0].expires_at_ms, 3_000.0 + BUFF_DURATION_MS);
    assert_eq!(arena.session.power_ups_collected, 3);
}

#[test]
fn test_health_pickup_is_clamped() {
    let mut arena = Arena::new(0.99);
    let pilot = world_setup::spawn_player(&mut arena.world, 0, ShipClass::Cruiser, 400.0);
    arena.world.get::<&mut Player>(pilot).unwrap().hp = 90.0;
    world_setup::spawn_power_up(&mut arena.world, PowerUpKind::Health, Vec2::new(390.0, 530.0));

    arena.resolve(0.0);

    assert_eq!(arena.hp(pilot), 100.0);
    assert!(arena.events.contains(&GameEvent::PlayerHealed { slot: 0, amount: 10.0 }));
}

// ---- Projectiles & skills ----

#[test]
fn test_homing_speed_never_exceeds_cap() {
    let mut world = World::new();
    enemy(&mut world, EnemyKind::Tank, 400.0, 100.0, 45.0, 1_000.0);
    world_setup::spawn_missiles(&mut world, Vec2::new(400.0, 500.0), MISSILE_SWARM_COUNT, 50.0);

    for _ in 0..300 {
        projectiles::run(&mut world);
        for (_, (body, _)) in world.query::<(&Body, &Bullet)>().iter() {
            assert!(
                body.velocity.length() <= HOMING_MAX_SPEED + 1e-3,
                "missile speed {} exceeds cap",
                body.velocity.length()
            );
        }
    }
}

#[test]
fn test_missiles_without_target_stay_under_cap() {
    let mut world = World::new();
    world_setup::spawn_missiles(&mut world, Vec2::new(400.0, 500.0), MISSILE_SWARM_COUNT, 50.0);
    let speeds = |world: &World| -> Vec<f32> {
        world
            .query::<(&Body, &Bullet)>()
            .iter()
            .map(|(_, (body, _))| body.velocity.length())
            .collect()
    };
    assert!(speeds(&world).iter().all(|&s| s <= HOMING_MAX_SPEED + 1e-3));

    for _ in 0..5 {
        projectiles::run(&mut world);
        let speeds = speeds(&world);
        assert_eq!(speeds.len(), MISSILE_SWARM_COUNT);
        for speed in speeds {
            assert!(speed <= HOMING_MAX_SPEED + 1e-3, "missile speed {speed} exceeds cap");
        }
    }
}

#[test]
fn test_homing_targets_oldest_enemy_despite_id_reuse() {
    let mut world = World::new();
    let first = enemy(&mut world, EnemyKind::Basic, 100.0, 100.0, 30.0, 20.0);
    let older = enemy(&mut world, EnemyKind::Basic, 600.0, 100.0, 30.0, 20.0);
    world.despawn(first).unwrap();
    let newer = enemy(&mut world, EnemyKind::Basic, 100.0, 300.0, 30.0, 20.0);

    let order = |e: Entity| world.get::<&Enemy>(e).unwrap().spawn_order;
    assert!(order(newer) > order(older));

    let target = projectiles::homing_target(&world).unwrap();
    assert_eq!(target, world.get::<&Body>(older).unwrap().center());
}

#[test]
fn test_missile_swarm_activation() {
    let mut world = World::new();
    let pilot = world_setup::spawn_player(&mut world, 0, ShipClass::Cruiser, 400.0);
    let mut fx = ScriptedRandom::constant(0.5);
    let mut events = Vec::new();

    assert!(skills::activate(&mut world, pilot, 0.0, &mut fx, &mut events));
    assert!(!skills::activate(&mut world, pilot, 10.0, &mut fx, &mut events), "second press is a no-op");

    let missiles: Vec<Bullet> = world.query::<&Bullet>().iter().map(|(_, b)| *b).collect();
    assert_eq!(missiles.len(), MISSILE_SWARM_COUNT);
    assert!(missiles.iter().all(|m| m.kind == ProjectileKind::Homing && m.damage == 50.0));

    let player = world.get::<&Player>(pilot).unwrap();
    assert!(!player.skill.ready);
    assert_eq!(player.skill.cooldown_remaining_ms, 8_000.0);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_bulwark_heals_and_shields() {
    let mut world = World::new();
    let pilot = world_setup::spawn_player(&mut world, 0, ShipClass::Titan, 400.0);
    world.get::<&mut Player>(pilot).unwrap().hp = 100.0;
    let mut fx = ScriptedRandom::constant(0.5);
    let mut events = Vec::new();

    skills::activate(&mut world, pilot, 1_000.0, &mut fx, &mut events);

    let player = world.get::<&Player>(pilot).unwrap();
    assert!((player.hp - 190.0).abs() < 1e-3, "heals 30% of max hp");
    assert!(player.buffs.contains(&Buff {
        kind: BuffKind::Shield,
        expires_at_ms: 1_000.0 + BULWARK_SHIELD_MS,
    }));
}

// ---- Progression ----

#[test]
fn test_mission_timer_reaches_exactly_zero_then_freezes() {
    let mut tuning = Tuning::default();
    tuning.mission_duration_ms = 1_000.0;
    let mut engine = SimulationEngine::new(SimConfig {
        tuning,
        ..Default::default()
    });

    let mut boss_tick = None;
    for i in 0..120 {
        let snap = engine.tick(i as f64 * FRAME_MS, &idle());
        assert!(snap.stats.mission_time_ms >= 0.0, "mission timer went negative");
        if snap.stats.boss_active {
            assert_eq!(snap.stats.mission_time_ms, 0.0);
            assert!(snap.events.contains(&GameEvent::BossSpawned {
                kind: EnemyKind::Boss,
                level: 1,
            }));
            boss_tick = Some(i);
            break;
        }
    }
    let start = boss_tick.expect("boss should arrive once the timer elapses");

    for i in start + 1..start + 60 {
        let snap = engine.tick(i as f64 * FRAME_MS, &idle());
        assert_eq!(snap.stats.mission_time_ms, 0.0);
        assert!(snap.stats.boss_active);
        assert_eq!(snap.boss.map(|b| b.kind), Some(EnemyKind::Boss));
    }
}

#[test]
fn test_mini_boss_does_not_gate_timer() {
    let mut engine = SimulationEngine::with_random(SimConfig::default(), Box::new(ScriptedRandom::constant(0.99)));
    engine.stats_mut().level = 2;
    engine.stats_mut().mission_time_ms = 30_010.0;

    engine.tick(0.0, &idle());
    let snap = engine.tick(16.0, &idle());
    assert!(snap.events.contains(&GameEvent::BossSpawned {
        kind: EnemyKind::MiniBoss,
        level: 2,
    }));
    assert!(snap.stats.mini_boss_active);
    assert!(!snap.stats.boss_active);

    let snap = engine.tick(32.0, &idle());
    assert_eq!(snap.stats.mission_time_ms, 30_010.0 - 32.0);
    assert!(!snap.events.iter().any(|e| matches!(e, GameEvent::BossSpawned { .. })), "one mini-boss per level");
}

#[test]
fn test_boss_kill_offers_three_upgrades() {
    let mut engine = engine_with_doomed_boss(GameMode::Solo);
    let snap = engine.tick(0.0, &idle());

    assert_eq!(snap.stats.phase, LevelPhase::LevelComplete);
    assert!(snap.stats.level_complete && snap.stats.paused);
    assert_eq!(snap.upgrade_choices.len(), 3);
    assert!(snap.boss.is_none());
}

#[test]
fn test_coop_revive_on_upgrade() {
    let mut engine = engine_with_doomed_boss(GameMode::Coop);
    let partner = engine
        .world()
        .query::<&Player>()
        .iter()
        .find(|(_, p)| p.slot == 1)
        .map(|(e, _)| e)
        .unwrap();
    engine.world_mut().get::<&mut Player>(partner).unwrap().hp = 0.0;

    engine.tick(0.0, &idle());
    assert!(engine.stats().level_complete);

    let pick = *engine
        .upgrade_choices()
        .iter()
        .find(|id| **id != UpgradeId::HpBoost)
        .unwrap();
    engine.select_upgrade(pick).unwrap();

    let player = engine.world().get::<&Player>(partner).unwrap();
    assert_eq!(player.hp, player.max_hp * REVIVE_HP_FRACTION);
    drop(player);

    assert_eq!(engine.stats().level, 2);
    assert!(!engine.stats().level_complete);
    assert!(!engine.stats().paused);
    assert_eq!(engine.stats().mission_time_ms, MISSION_DURATION_MS);
    assert_eq!(engine.stats().level_score, 0);
    assert!(engine.upgrade_choices().is_empty());

    let snap = engine.tick(16.0, &idle());
    assert!(snap.events.contains(&GameEvent::LevelStarted { level: 2 }));
}

#[test]
fn test_select_upgrade_rejections() {
    let mut engine = engine_with_doomed_boss(GameMode::Solo);
    assert_eq!(engine.select_upgrade(UpgradeId::DmgBoost), Err(SessionError::NoUpgradePending));

    engine.tick(0.0, &idle());
    let missing = UPGRADE_POOL
        .iter()
        .map(|u| u.id)
        .find(|id| !engine.upgrade_choices().contains(id))
        .unwrap();
    assert_eq!(engine.select_upgrade(missing), Err(SessionError::UpgradeNotOffered(missing)));
    assert_eq!(engine.stats().level, 1, "rejected selection leaves state unchanged");
    assert!(engine.stats().level_complete);

    // Queued rejections are logged, not fatal.
    engine.queue_command(SessionCommand::SelectUpgrade { id: missing });
    let snap = engine.tick(16.0, &idle());
    assert_eq!(snap.stats.level, 1);

    engine.exit_to_menu().unwrap();
    assert_eq!(engine.select_upgrade(missing), Err(SessionError::SessionFinished));
}

#[test]
fn test_upgrade_applies_to_every_player() {
    let mut engine = engine_with_doomed_boss(GameMode::Coop);
    engine.tick(0.0, &idle());
    let pick = engine.upgrade_choices()[0];
    engine.select_upgrade(pick).unwrap();

    let changed = engine
        .world()
        .query::<&Player>()
        .iter()
        .filter(|(_, p)| {
            p.damage_multiplier > 1.0 || p.max_hp > 100.0 || p.fire_interval_ms < 250.0 || p.speed > 5.0 || p.skill_cooldown_multiplier < 1.0
        })
        .count();
    assert_eq!(changed, 2);
}

// ---- Session flow ----

#[test]
fn test_pause_is_edge_triggered_and_freezes() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.tick(0.0, &idle());

    let snap = engine.tick(16.0, &pause_key());
    assert!(snap.stats.paused);
    assert!(snap.events.contains(&GameEvent::PauseChanged { paused: true }));

    let snap = engine.tick(32.0, &pause_key());
    assert!(snap.stats.paused, "holding the key toggles once");
    assert_eq!(snap.stats.mission_time_ms, MISSION_DURATION_MS);

    engine.tick(48.0, &idle());
    let snap = engine.tick(64.0, &pause_key());
    assert!(!snap.stats.paused);
    assert_eq!(snap.stats.mission_time_ms, MISSION_DURATION_MS - 16.0);
}

#[test]
fn test_queued_commands_apply_in_order() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([SessionCommand::TogglePause, SessionCommand::TogglePause]);
    let snap = engine.tick(0.0, &idle());

    let changes: Vec<&GameEvent> = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::PauseChanged { .. }))
        .collect();
    assert_eq!(
        changes,
        vec![
            &GameEvent::PauseChanged { paused: true },
            &GameEvent::PauseChanged { paused: false }
        ]
    );
    assert!(!snap.stats.paused);
}

#[test]
fn test_pause_shifts_buff_expiry() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.tick(0.0, &idle());
    let pilot = engine.world().query::<&Player>().iter().next().map(|(e, _)| e).unwrap();
    timers::grant_buff(&mut engine.world_mut().get::<&mut Player>(pilot).unwrap(), BuffKind::Speed, 500.0);

    engine.tick(16.0, &pause_key());
    engine.tick(2_000.0, &idle());
    let snap = engine.tick(2_016.0, &pause_key());

    assert!(!snap.stats.paused);
    assert_eq!(snap.players[0].buffs.len(), 1, "frozen time does not consume buffs");
    assert_eq!(snap.players[0].buffs[0].remaining_ms, 2_500.0 - 2_016.0);
}

#[test]
fn test_toggle_pause_ignored_when_level_complete() {
    let mut engine = engine_with_doomed_boss(GameMode::Solo);
    engine.tick(0.0, &idle());
    engine.queue_command(SessionCommand::TogglePause);
    let snap = engine.tick(16.0, &idle());
    assert!(snap.stats.paused);
    assert!(!snap.events.iter().any(|e| matches!(e, GameEvent::PauseChanged { .. })));
}

#[test]
fn test_game_over_reported_once() {
    let mut engine = SimulationEngine::new(SimConfig {
        mode: GameMode::Coop,
        ..Default::default()
    });
    engine.tick(0.0, &idle());
    for (_, player) in engine.world_mut().query_mut::<&mut Player>() {
        player.hp = 0.0;
    }

    let snap = engine.tick(16.0, &idle());
    assert!(snap.stats.game_over);
    assert_eq!(snap.stats.phase, LevelPhase::GameOver);
    let overs = snap.events.iter().filter(|e| matches!(e, GameEvent::GameOver { .. })).count();
    assert_eq!(overs, 1);

    let snap = engine.tick(32.0, &idle());
    assert!(snap.events.is_empty());
    assert!(engine.is_finished());
}

#[test]
fn test_exit_to_menu_is_terminal() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::ExitToMenu);
    let snap = engine.tick(0.0, &idle());

    assert!(snap.events.iter().any(GameEvent::is_terminal));
    assert_eq!(snap.stats.phase, LevelPhase::Exited);
    assert!(engine.is_finished());
    assert_eq!(engine.exit_to_menu(), Err(SessionError::SessionFinished));
}

#[test]
fn test_coop_ships_start_apart() {
    let engine = SimulationEngine::new(SimConfig {
        mode: GameMode::Coop,
        partner_class: Some(ShipClass::Titan),
        ..Default::default()
    });
    let mut ships: Vec<(u8, ShipClass, f32)> = engine
        .world()
        .query::<(&Player, &Body)>()
        .iter()
        .map(|(_, (p, b))| (p.slot, p.class, b.center().x))
        .collect();
    ships.sort_by_key(|s| s.0);

    assert_eq!(ships.len(), 2);
    assert_eq!(ships[0].1, ShipClass::Cruiser);
    assert_eq!(ships[1].1, ShipClass::Titan);
    assert!((ships[0].2 - PLAYFIELD_WIDTH / 3.0).abs() < 1e-3);
    assert!((ships[1].2 - PLAYFIELD_WIDTH * 2.0 / 3.0).abs() < 1e-3);
}

#[test]
fn test_player_fire_rate_limit() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let firing = FrameInput {
        slots: [
            ActionSet {
                fire: true,
                ..Default::default()
            },
            ActionSet::default(),
        ],
        pause: false,
    };

    // Cruiser fires once more than 250 ms have passed: 0, 260, 520, 780.
    for i in 0..45 {
        engine.tick(i as f64 * 20.0, &firing);
    }
    let shots = engine
        .world()
        .query::<&Bullet>()
        .iter()
        .filter(|(_, b)| !b.from_enemy)
        .count();
    assert_eq!(shots, 4);
}

#[test]
fn test_diagonal_input_reaches_corner() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let heading = FrameInput {
        slots: [
            ActionSet {
                down: true,
                right: true,
                ..Default::default()
            },
            ActionSet::default(),
        ],
        pause: false,
    };

    for i in 0..150 {
        engine.tick(i as f64 * FRAME_MS, &heading);
    }
    let body = engine
        .world()
        .query::<(&Body, &Player)>()
        .iter()
        .map(|(_, (b, _))| *b)
        .next()
        .unwrap();
    assert_eq!(body.position.x, PLAYFIELD_WIDTH - body.width);
    assert_eq!(body.position.y, PLAYFIELD_HEIGHT - body.height);
}
