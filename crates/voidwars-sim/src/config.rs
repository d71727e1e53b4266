//! Session configuration.
//!
//! `SimConfig` is fixed at session start. Gameplay tuning lives in the
//! nested `Tuning`, which defaults to the constants in `voidwars_core` and
//! can be partially overridden from JSON.

use serde::{Deserialize, Serialize};

use voidwars_core::constants::*;
use voidwars_core::enums::{AchievementId, GameMode, ShipClass};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs give the same run.
    pub seed: u64,
    pub mode: GameMode,
    /// Ship of slot 0.
    pub ship_class: ShipClass,
    /// Ship of slot 1 in co-op. Defaults to `ship_class`.
    pub partner_class: Option<ShipClass>,
    pub tuning: Tuning,
    /// Kills from earlier sessions, for career achievements.
    pub prior_total_kills: u64,
    /// Achievements already unlocked in earlier sessions. Never re-reported.
    pub unlocked_achievements: Vec<AchievementId>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: GameMode::Solo,
            ship_class: ShipClass::Cruiser,
            partner_class: None,
            tuning: Tuning::default(),
            prior_total_kills: 0,
            unlocked_achievements: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Ship class of each slot in play.
    pub fn classes(&self) -> Vec<ShipClass> {
        match self.mode {
            GameMode::Solo => vec![self.ship_class],
            GameMode::Coop => vec![self.ship_class, self.partner_class.unwrap_or(self.ship_class)],
        }
    }
}

/// Gameplay balance knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub mission_duration_ms: f64,
    pub combo_window_ms: f64,
    pub combo_step: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f32,
    pub power_up_drop_chance: f64,
    pub buff_duration_ms: f64,
    pub spawn_interval_base_ms: f64,
    pub coop_spawn_interval_factor: f64,
    pub coop_enemy_hp_factor: f32,
    pub mini_boss_min_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mission_duration_ms: MISSION_DURATION_MS,
            combo_window_ms: COMBO_WINDOW_MS,
            combo_step: COMBO_STEP,
            crit_chance: CRIT_CHANCE,
            crit_multiplier: CRIT_MULTIPLIER,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,
            buff_duration_ms: BUFF_DURATION_MS,
            spawn_interval_base_ms: ENEMY_SPAWN_INTERVAL_BASE_MS,
            coop_spawn_interval_factor: COOP_SPAWN_INTERVAL_FACTOR,
            coop_enemy_hp_factor: COOP_ENEMY_HP_FACTOR,
            mini_boss_min_level: MINI_BOSS_MIN_LEVEL,
        }
    }
}

impl Tuning {
    /// Reject values that would break the timer or probability contracts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("mission_duration_ms", self.mission_duration_ms),
            ("combo_window_ms", self.combo_window_ms),
            ("buff_duration_ms", self.buff_duration_ms),
            ("spawn_interval_base_ms", self.spawn_interval_base_ms),
            ("coop_spawn_interval_factor", self.coop_spawn_interval_factor),
            ("coop_enemy_hp_factor", self.coop_enemy_hp_factor as f64),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let probabilities = [
            ("crit_chance", self.crit_chance),
            ("power_up_drop_chance", self.power_up_drop_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { field, value });
            }
        }

        if self.combo_step.is_nan() || self.combo_step < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "combo_step",
                value: self.combo_step,
            });
        }
        if self.crit_multiplier.is_nan() || self.crit_multiplier < 1.0 {
            return Err(ConfigError::CritBelowOne(self.crit_multiplier));
        }
        Ok(())
    }
}

/// Why a config was rejected.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    NotPositive { field: &'static str, value: f64 },
    NotAProbability { field: &'static str, value: f64 },
    CritBelowOne(f32),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::NotPositive { field, value } => {
                write!(f, "Tuning value {} must be positive, got {}", field, value)
            }
            ConfigError::NotAProbability { field, value } => {
                write!(f, "Tuning value {} must be in [0, 1], got {}", field, value)
            }
            ConfigError::CritBelowOne(value) => {
                write!(f, "Critical multiplier must be at least 1, got {}", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
