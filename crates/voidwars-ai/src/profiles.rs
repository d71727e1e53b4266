//! Kind-specific enemy profiles.
//!
//! Consolidates per-kind spawn stats and fire patterns.

use glam::Vec2;
use voidwars_core::enums::EnemyKind;

/// Spawn-time stats of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Hit points per level.
    pub hp_per_level: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical speed at level 0 (pixels per tick).
    pub base_speed: f32,
    /// Vertical speed gained per level.
    pub speed_per_level: f32,
    /// Magnitude of the initial horizontal velocity.
    pub strafe_speed: f32,
    /// Score per level.
    pub score_per_level: u64,
}

impl EnemyProfile {
    pub fn descent_speed(&self, level: u32) -> f32 {
        self.base_speed + self.speed_per_level * level as f32
    }
}

/// Get the spawn profile of a regular enemy kind.
///
/// Bosses and obstacles are built by dedicated factories and have no
/// profile.
pub fn get_profile(kind: EnemyKind) -> Option<EnemyProfile> {
    match kind {
        EnemyKind::Basic => Some(EnemyProfile {
            hp_per_level: 20.0,
            width: 30.0,
            height: 30.0,
            base_speed: 1.0,
            speed_per_level: 0.2,
            strafe_speed: 0.0,
            score_per_level: 10,
        }),
        EnemyKind::Fast => Some(EnemyProfile {
            hp_per_level: 15.0,
            width: 25.0,
            height: 25.0,
            base_speed: 2.0,
            speed_per_level: 0.3,
            strafe_speed: 2.0,
            score_per_level: 20,
        }),
        EnemyKind::Tank => Some(EnemyProfile {
            hp_per_level: 60.0,
            width: 45.0,
            height: 45.0,
            base_speed: 0.5,
            speed_per_level: 0.1,
            strafe_speed: 0.0,
            score_per_level: 30,
        }),
        EnemyKind::MiniBoss | EnemyKind::Boss | EnemyKind::Asteroid => None,
    }
}

/// Boss-class stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossProfile {
    pub width: f32,
    pub height: f32,
    /// hp = level * 100 + tier * level * 2.
    pub hp_tier: f32,
    pub score_per_level: u64,
    /// Amplitude of the horizontal sine strafe.
    pub strafe_amplitude: f32,
}

pub fn get_boss_profile(mini: bool) -> BossProfile {
    use voidwars_core::constants::{BOSS_HP_TIER, MINI_BOSS_HP_TIER};

    if mini {
        BossProfile {
            width: 60.0,
            height: 50.0,
            hp_tier: MINI_BOSS_HP_TIER,
            score_per_level: 500,
            strafe_amplitude: 3.0,
        }
    } else {
        BossProfile {
            width: 120.0,
            height: 80.0,
            hp_tier: BOSS_HP_TIER,
            score_per_level: 5000,
            strafe_amplitude: 2.0,
        }
    }
}

impl BossProfile {
    pub fn hp(&self, level: u32) -> f32 {
        let level = level as f32;
        level * 100.0 + self.hp_tier * level * 2.0
    }
}

/// One enemy salvo: every bullet shares size and damage.
#[derive(Debug, Clone, PartialEq)]
pub struct Volley {
    pub velocities: Vec<Vec2>,
    pub damage: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Delay until the next salvo.
    pub reload_ms: f64,
    /// Whether a random delay is added to `reload_ms`.
    pub jittered: bool,
}

/// The salvo an enemy of `kind` fires at `level`. Obstacles never shoot.
pub fn volley(kind: EnemyKind, level: u32) -> Option<Volley> {
    match kind {
        EnemyKind::Boss => Some(Volley {
            velocities: (-2..=2).map(|i| Vec2::new(i as f32 * 2.0, 6.0)).collect(),
            damage: 20.0,
            bullet_width: 8.0,
            bullet_height: 16.0,
            reload_ms: 1_500.0,
            jittered: false,
        }),
        EnemyKind::MiniBoss => Some(Volley {
            velocities: (-1..=1).map(|i| Vec2::new(i as f32, 7.0)).collect(),
            damage: 15.0,
            bullet_width: 6.0,
            bullet_height: 14.0,
            reload_ms: 1_200.0,
            jittered: false,
        }),
        EnemyKind::Basic | EnemyKind::Fast | EnemyKind::Tank => Some(Volley {
            velocities: vec![Vec2::new(0.0, 5.0 + level as f32)],
            damage: 10.0 * level as f32,
            bullet_width: 6.0,
            bullet_height: 12.0,
            reload_ms: if kind == EnemyKind::Tank { 3_000.0 } else { 2_000.0 },
            jittered: true,
        }),
        EnemyKind::Asteroid => None,
    }
}
