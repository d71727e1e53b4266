//! Game state snapshot: the complete visible state handed to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{SimTime, Vec2};

/// Complete game state produced after each tick. Owned by the receiver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub mode: GameMode,
    pub stats: StatsView,
    pub players: Vec<PlayerHud>,
    pub boss: Option<BossView>,
    /// Empty unless a level is complete.
    pub upgrade_choices: Vec<UpgradeView>,
    pub session: SessionStatsView,
    pub entities: EntityViews,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// Global stats for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub score: u64,
    pub level_score: u64,
    pub level: u32,
    pub phase: LevelPhase,
    pub mission_time_ms: f64,
    pub paused: bool,
    pub game_over: bool,
    pub level_complete: bool,
    pub boss_active: bool,
    pub mini_boss_active: bool,
    pub combo: u32,
    pub combo_window_ms: f64,
}

/// Per-player HUD state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHud {
    pub slot: u8,
    pub class: ShipClass,
    pub hp: f32,
    pub max_hp: f32,
    pub alive: bool,
    pub skill_ready: bool,
    /// 0.0 when ready, 1.0 right after activation.
    pub skill_cooldown_fraction: f64,
    pub skill_active: bool,
    pub buffs: Vec<BuffView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffView {
    pub kind: BuffKind,
    pub remaining_ms: f64,
}

/// The active boss (main boss preferred over a mini-boss).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub level: u32,
}

/// One offered upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeView {
    pub id: UpgradeId,
    /// Localisation key of the name.
    pub name: String,
    /// Localisation key of the description.
    pub description: String,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatsView {
    pub kills: u32,
    pub power_ups_collected: u32,
    pub time_alive_ms: f64,
    pub bosses_killed: u32,
    pub best_combo: u32,
    pub unlocked_achievements: Vec<AchievementId>,
}

/// Render views of every live entity, each list sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityViews {
    pub players: Vec<ShipView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub texts: Vec<TextView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub id: u64,
    pub slot: u8,
    pub class: ShipClass,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    pub shielded: bool,
    pub phased: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u64,
    pub kind: ProjectileKind,
    pub from_enemy: bool,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u64,
    pub kind: PowerUpKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextView {
    pub position: Vec2,
    pub text: String,
    pub style: TextStyle,
    pub alpha: f32,
    pub scale: f32,
}
