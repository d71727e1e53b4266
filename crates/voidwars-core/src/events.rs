//! Events emitted by the simulation for audio, UI feedback and adapters.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something that happened during a tick. Drained into the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A player projectile damaged an enemy.
    EnemyHit {
        kind: EnemyKind,
        damage: f32,
        critical: bool,
    },
    /// An obstacle absorbed a bullet.
    ShotDeflected,
    /// An enemy died. `score` includes the combo bonus; zero for rams.
    EnemyKilled { kind: EnemyKind, score: u64 },
    /// An enemy left the bottom of the playfield.
    EnemyEscaped { kind: EnemyKind },
    PlayerDamaged { slot: u8, amount: f32 },
    PlayerHealed { slot: u8, amount: f32 },
    /// A player's hp reached zero.
    PlayerDown { slot: u8 },
    PowerUpDropped { kind: PowerUpKind },
    PowerUpCollected { slot: u8, kind: PowerUpKind },
    SkillActivated { slot: u8, class: ShipClass },
    /// Boss or mini-boss entered the field.
    BossSpawned { kind: EnemyKind, level: u32 },
    LevelComplete { level: u32 },
    LevelStarted { level: u32 },
    PauseChanged { paused: bool },
    AchievementUnlocked { id: AchievementId },
    /// Terminal: every player is down.
    GameOver { score: u64 },
    /// Terminal: the player left to the menu.
    ExitToMenu,
}

impl GameEvent {
    /// One-shot notifications that end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. } | GameEvent::ExitToMenu)
    }
}
