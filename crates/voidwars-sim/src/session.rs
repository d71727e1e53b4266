//! Session-scoped state: level progression flags, score and combo, run
//! statistics, and the errors of session commands.

use std::collections::HashSet;

use voidwars_core::enums::{AchievementId, LevelPhase, UpgradeId};
use voidwars_core::state::{SessionStatsView, StatsView};

/// The single authoritative level/score state of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStats {
    pub score: u64,
    pub level_score: u64,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub level_complete: bool,
    /// The player left to the menu.
    pub exited: bool,
    /// The level boss is on the field.
    pub boss_active: bool,
    /// A mini-boss is on the field. Suppresses spawning only.
    pub mini_boss_active: bool,
    pub mini_boss_spawned: bool,
    /// Never negative. Counts down only while no level boss is active.
    pub mission_time_ms: f64,
    pub combo: u32,
    pub combo_window_ms: f64,
}

impl GameStats {
    pub fn new(mission_duration_ms: f64) -> Self {
        Self {
            score: 0,
            level_score: 0,
            level: 1,
            paused: false,
            game_over: false,
            level_complete: false,
            exited: false,
            boss_active: false,
            mini_boss_active: false,
            mini_boss_spawned: false,
            mission_time_ms: mission_duration_ms,
            combo: 0,
            combo_window_ms: 0.0,
        }
    }

    pub fn phase(&self) -> LevelPhase {
        if self.exited {
            LevelPhase::Exited
        } else if self.game_over {
            LevelPhase::GameOver
        } else if self.level_complete {
            LevelPhase::LevelComplete
        } else if self.boss_active {
            LevelPhase::BossEngaged
        } else {
            LevelPhase::Approach
        }
    }

    /// No gameplay mutation happens while frozen.
    pub fn is_frozen(&self) -> bool {
        self.paused || self.game_over || self.level_complete || self.exited
    }

    /// Whether the session has ended for good.
    pub fn is_finished(&self) -> bool {
        self.game_over || self.exited
    }

    /// Score multiplier at the current combo count.
    pub fn combo_multiplier(&self, combo_step: f64) -> f64 {
        1.0 + self.combo as f64 * combo_step
    }

    /// Reset per-level state for the next level.
    pub fn advance_level(&mut self, mission_duration_ms: f64) {
        self.level += 1;
        self.level_score = 0;
        self.mission_time_ms = mission_duration_ms;
        self.boss_active = false;
        self.mini_boss_active = false;
        self.mini_boss_spawned = false;
        self.level_complete = false;
        self.paused = false;
        self.combo = 0;
        self.combo_window_ms = 0.0;
    }

    pub fn view(&self) -> StatsView {
        StatsView {
            score: self.score,
            level_score: self.level_score,
            level: self.level,
            phase: self.phase(),
            mission_time_ms: self.mission_time_ms,
            paused: self.paused,
            game_over: self.game_over,
            level_complete: self.level_complete,
            boss_active: self.boss_active,
            mini_boss_active: self.mini_boss_active,
            combo: self.combo,
            combo_window_ms: self.combo_window_ms,
        }
    }
}

/// Per-run counters feeding the achievement list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub kills: u32,
    pub power_ups_collected: u32,
    /// Unpaused play time while at least one player is alive.
    pub time_alive_ms: f64,
    pub bosses_killed: u32,
    pub best_combo: u32,
    pub prior_total_kills: u64,
    pub unlocked: HashSet<AchievementId>,
}

impl SessionStats {
    pub fn new(prior_total_kills: u64, unlocked: &[AchievementId]) -> Self {
        Self {
            prior_total_kills,
            unlocked: unlocked.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn total_kills(&self) -> u64 {
        self.prior_total_kills + self.kills as u64
    }

    pub fn view(&self) -> SessionStatsView {
        // Fixed list order keeps snapshots deterministic.
        let unlocked_achievements = AchievementId::ALL
            .into_iter()
            .filter(|id| self.unlocked.contains(id))
            .collect();
        SessionStatsView {
            kills: self.kills,
            power_ups_collected: self.power_ups_collected,
            time_alive_ms: self.time_alive_ms,
            bosses_killed: self.bosses_killed,
            best_combo: self.best_combo,
            unlocked_achievements,
        }
    }
}

/// Why a session command was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No level is complete, so there is nothing to choose.
    NoUpgradePending,
    /// The id was not among the offered choices.
    UpgradeNotOffered(UpgradeId),
    /// The run is over or was exited.
    SessionFinished,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoUpgradePending => write!(f, "No upgrade selection is pending"),
            SessionError::UpgradeNotOffered(id) => {
                write!(f, "Upgrade {} was not offered", id.as_str())
            }
            SessionError::SessionFinished => write!(f, "The session has already ended"),
        }
    }
}

impl std::error::Error for SessionError {}
