//! Per-class ship abilities.
//!
//! The ready/cooldown/duration state machine is shared (see
//! `systems::skills`); each class only decides what happens at activation
//! and which passive modifiers apply while its active window is open.

use voidwars_core::components::{Body, Player};
use voidwars_core::constants::*;
use voidwars_core::enums::{BuffKind, ShipClass};
use voidwars_core::ships::ship_stats;
use voidwars_core::types::{Aabb, Vec2};

/// What an ability sees when it fires.
pub struct AbilityContext<'a> {
    pub player: &'a Player,
    pub body: &'a Body,
    pub timestamp_ms: f64,
}

/// An instantaneous consequence of an activation, applied by the skills system.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    /// Homing missiles launched from `origin` in a full radial spread.
    SpawnMissiles {
        origin: Vec2,
        count: usize,
        damage: f32,
    },
    /// A piercing hit-scan strip covering `area` for a single tick.
    SpawnBeam { area: Aabb, damage: f32 },
    Heal { amount: f32 },
    GrantBuff { kind: BuffKind, duration_ms: f64 },
    ParticleBurst { at: Vec2, count: usize },
}

pub trait ShipAbility: Sync {
    fn class(&self) -> ShipClass;

    fn on_activate(&self, ctx: &AbilityContext) -> Vec<SkillEffect>;

    /// Movement speed factor while active.
    fn speed_multiplier(&self) -> f32 {
        1.0
    }

    /// Fire interval divisor while active.
    fn fire_interval_divisor(&self) -> f64 {
        1.0
    }

    /// Immune to enemy bullets and ramming by ordinary enemies while active.
    fn grants_invulnerability(&self) -> bool {
        false
    }
}

fn base_damage(player: &Player) -> f32 {
    ship_stats(player.class).damage * player.damage_multiplier
}

pub struct Overdrive;

impl ShipAbility for Overdrive {
    fn class(&self) -> ShipClass {
        ShipClass::Interceptor
    }

    fn on_activate(&self, _ctx: &AbilityContext) -> Vec<SkillEffect> {
        Vec::new()
    }

    fn speed_multiplier(&self) -> f32 {
        OVERDRIVE_SPEED_MULTIPLIER
    }

    fn fire_interval_divisor(&self) -> f64 {
        OVERDRIVE_FIRE_DIVISOR
    }
}

pub struct MissileSwarm;

impl ShipAbility for MissileSwarm {
    fn class(&self) -> ShipClass {
        ShipClass::Cruiser
    }

    fn on_activate(&self, ctx: &AbilityContext) -> Vec<SkillEffect> {
        vec![SkillEffect::SpawnMissiles {
            origin: ctx.body.center(),
            count: MISSILE_SWARM_COUNT,
            damage: base_damage(ctx.player) * MISSILE_DAMAGE_FACTOR,
        }]
    }
}

pub struct MegaBeam;

impl ShipAbility for MegaBeam {
    fn class(&self) -> ShipClass {
        ShipClass::Destroyer
    }

    fn on_activate(&self, ctx: &AbilityContext) -> Vec<SkillEffect> {
        let center = ctx.body.center();
        let top = Vec2::new(center.x, ctx.body.position.y);
        vec![
            SkillEffect::SpawnBeam {
                area: Aabb::new(center.x - BEAM_WIDTH / 2.0, 0.0, BEAM_WIDTH, ctx.body.position.y),
                damage: BEAM_DAMAGE * ctx.player.damage_multiplier,
            },
            SkillEffect::ParticleBurst {
                at: top,
                count: BEAM_PARTICLES,
            },
        ]
    }
}

pub struct PhaseShift;

impl ShipAbility for PhaseShift {
    fn class(&self) -> ShipClass {
        ShipClass::Spectre
    }

    fn on_activate(&self, _ctx: &AbilityContext) -> Vec<SkillEffect> {
        Vec::new()
    }

    fn speed_multiplier(&self) -> f32 {
        PHASE_SPEED_MULTIPLIER
    }

    fn grants_invulnerability(&self) -> bool {
        true
    }
}

pub struct Bulwark;

impl ShipAbility for Bulwark {
    fn class(&self) -> ShipClass {
        ShipClass::Titan
    }

    fn on_activate(&self, ctx: &AbilityContext) -> Vec<SkillEffect> {
        vec![
            SkillEffect::Heal {
                amount: ctx.player.max_hp * BULWARK_HEAL_FRACTION,
            },
            SkillEffect::GrantBuff {
                kind: BuffKind::Shield,
                duration_ms: BULWARK_SHIELD_MS,
            },
        ]
    }
}

/// The ability of a ship class.
pub fn ability_for(class: ShipClass) -> &'static dyn ShipAbility {
    match class {
        ShipClass::Interceptor => &Overdrive,
        ShipClass::Cruiser => &MissileSwarm,
        ShipClass::Destroyer => &MegaBeam,
        ShipClass::Spectre => &PhaseShift,
        ShipClass::Titan => &Bulwark,
    }
}

/// Passive modifiers of `player`'s ability if its active window is open.
pub fn active_ability(player: &Player) -> Option<&'static dyn ShipAbility> {
    player.skill.is_active().then(|| ability_for(player.class))
}

/// Shield buff or an active invulnerability skill.
pub fn is_protected(player: &Player) -> bool {
    player.has_buff(BuffKind::Shield) || active_ability(player).is_some_and(|a| a.grants_invulnerability())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidwars_core::components::SkillState;

    fn player(class: ShipClass) -> (Player, Body) {
        let stats = ship_stats(class);
        let player = Player {
            slot: 0,
            class,
            hp: stats.hp,
            max_hp: stats.hp,
            speed: stats.speed,
            fire_interval_ms: stats.fire_interval_ms,
            damage_multiplier: 1.5,
            skill_cooldown_multiplier: 1.0,
            collision_resistance: stats.collision_resistance,
            buffs: Vec::new(),
            last_shot_ms: 0.0,
            skill: SkillState::default(),
        };
        let body = Body::new(Vec2::new(100.0, 400.0), Vec2::ZERO, stats.width, stats.height);
        (player, body)
    }

    #[test]
    fn test_every_class_has_its_own_ability() {
        for class in ShipClass::ALL {
            assert_eq!(ability_for(class).class(), class);
        }
    }

    #[test]
    fn test_missile_swarm_damage_scales() {
        let (p, b) = player(ShipClass::Cruiser);
        let effects = MissileSwarm.on_activate(&AbilityContext {
            player: &p,
            body: &b,
            timestamp_ms: 0.0,
        });
        assert_eq!(
            effects,
            vec![SkillEffect::SpawnMissiles {
                origin: Vec2::new(120.0, 420.0),
                count: 8,
                damage: 25.0 * 1.5 * 2.0,
            }]
        );
    }

    #[test]
    fn test_beam_reaches_top_of_playfield() {
        let (p, b) = player(ShipClass::Destroyer);
        let effects = MegaBeam.on_activate(&AbilityContext {
            player: &p,
            body: &b,
            timestamp_ms: 0.0,
        });
        match &effects[0] {
            SkillEffect::SpawnBeam { area, damage } => {
                assert_eq!(area.min, Vec2::new(100.0, 0.0));
                assert_eq!(area.size, Vec2::new(BEAM_WIDTH, 400.0));
                assert_eq!(*damage, 300.0);
            }
            other => panic!("expected beam, got {other:?}"),
        }
    }

    #[test]
    fn test_modifiers_only_while_active() {
        let (mut p, _) = player(ShipClass::Spectre);
        assert!(!is_protected(&p));
        p.skill.active_remaining_ms = 100.0;
        assert!(is_protected(&p));
        assert_eq!(active_ability(&p).map(|a| a.speed_multiplier()), Some(1.5));

        let (mut i, _) = player(ShipClass::Interceptor);
        i.skill.active_remaining_ms = 100.0;
        assert!(!is_protected(&i));
        assert_eq!(active_ability(&i).map(|a| a.fire_interval_divisor()), Some(3.0));
    }
}
