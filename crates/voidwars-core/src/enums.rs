//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Playable ship class. Each has a fixed stat table and one active skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// Fast, rapid-fire hull. Skill: Overdrive.
    Interceptor,
    /// Balanced hull. Skill: homing Missile Swarm.
    #[default]
    Cruiser,
    /// Heavy hull. Skill: piercing Mega Beam.
    Destroyer,
    /// Glass-cannon sniper. Skill: Phase Shift invulnerability.
    Spectre,
    /// Armoured tank. Skill: Bulwark heal and shield.
    Titan,
}

impl ShipClass {
    pub const ALL: [ShipClass; 5] = [
        ShipClass::Interceptor,
        ShipClass::Cruiser,
        ShipClass::Destroyer,
        ShipClass::Spectre,
        ShipClass::Titan,
    ];
}

/// Session mode, fixed at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Solo,
    /// Two players sharing level state and upgrades.
    Coop,
}

impl GameMode {
    pub fn player_count(self) -> usize {
        match self {
            GameMode::Solo => 1,
            GameMode::Coop => 2,
        }
    }
}

/// Enemy type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    MiniBoss,
    Boss,
    /// Weapon-proof obstacle, removed only by contact with a player.
    Asteroid,
}

impl EnemyKind {
    /// Boss or mini-boss.
    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::Boss | EnemyKind::MiniBoss)
    }

    pub fn is_obstacle(self) -> bool {
        self == EnemyKind::Asteroid
    }
}

/// Movement phase of an enemy. Bosses spawn `Entering`; every other kind
/// spawns `Engaged`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPhase {
    /// Easing in vertically toward the hold altitude.
    Entering,
    /// Normal behaviour for the enemy kind.
    #[default]
    Engaged,
}

/// Collectible power-up type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Speed,
    RapidFire,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
    ];

    /// The timed buff granted on pickup, or `None` for instant heals.
    pub fn buff(self) -> Option<BuffKind> {
        match self {
            PowerUpKind::Health => None,
            PowerUpKind::Speed => Some(BuffKind::Speed),
            PowerUpKind::RapidFire => Some(BuffKind::RapidFire),
            PowerUpKind::Shield => Some(BuffKind::Shield),
        }
    }
}

/// Timed player modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    /// Movement speed ×1.5.
    Speed,
    /// Fire interval ÷2.
    RapidFire,
    /// Immune to enemy bullets and ramming by ordinary enemies.
    Shield,
}

/// Projectile flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Standard,
    /// Steers toward the first live enemy every tick.
    Homing,
    /// Stationary hit-scan strip that lives for a single tick.
    Beam,
}

/// Upgrade rarity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Identifier of an upgrade in the fixed pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    DmgBoost,
    HpBoost,
    FireRate,
    SpeedBoost,
    SkillCd,
}

impl UpgradeId {
    pub fn as_str(self) -> &'static str {
        match self {
            UpgradeId::DmgBoost => "dmg_boost",
            UpgradeId::HpBoost => "hp_boost",
            UpgradeId::FireRate => "fire_rate",
            UpgradeId::SpeedBoost => "speed_boost",
            UpgradeId::SkillCd => "skill_cd",
        }
    }
}

/// Per-level progression state, derived from the session flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Mission timer counting down, regular spawns.
    #[default]
    Approach,
    /// Level boss on the field, timer frozen at zero.
    BossEngaged,
    /// Boss defeated, waiting for an upgrade selection.
    LevelComplete,
    /// Every player is down.
    GameOver,
    /// The player left to the menu.
    Exited,
}

/// Colour class of a floating combat number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    Damage,
    Critical,
    Heal,
}

/// Achievement identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    Survivor,
    Collector,
    BossKiller,
    Rampage,
    Veteran,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstBlood,
        AchievementId::Survivor,
        AchievementId::Collector,
        AchievementId::BossKiller,
        AchievementId::Rampage,
        AchievementId::Veteran,
    ];
}
