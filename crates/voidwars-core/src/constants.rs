//! Simulation constants and tuning parameters.
//!
//! Distances are playfield pixels, velocities are pixels per tick,
//! times are milliseconds.

// --- Playfield ---

pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

/// Vertical start position of player ships.
pub const PLAYER_START_Y: f32 = PLAYFIELD_HEIGHT - 80.0;

/// Standard bullets are culled this far beyond the top/bottom edge.
pub const BULLET_CULL_MARGIN: f32 = 50.0;

// --- Progression ---

/// Mission duration per level before the boss arrives.
pub const MISSION_DURATION_MS: f64 = 60_000.0;

/// Number of upgrade options offered after a boss kill.
pub const UPGRADE_CHOICES: usize = 3;

/// Fraction of max hp restored to downed players when a level is cleared.
pub const REVIVE_HP_FRACTION: f32 = 0.5;

/// First level on which a mini-boss can appear.
pub const MINI_BOSS_MIN_LEVEL: u32 = 2;

/// Mini-boss appears once the mission timer falls to this fraction of the duration.
pub const MINI_BOSS_TRIGGER_FRACTION: f64 = 0.5;

// --- Combo & scoring ---

/// Window after a kill during which the next kill extends the combo.
pub const COMBO_WINDOW_MS: f64 = 2_500.0;

/// Score multiplier gained per combo step.
pub const COMBO_STEP: f64 = 0.1;

/// Chance that a player hit is a critical strike.
pub const CRIT_CHANCE: f64 = 0.1;

/// Damage multiplier of a critical strike.
pub const CRIT_MULTIPLIER: f32 = 2.0;

// --- Spawning ---

/// Base interval between regular spawn attempts (divided by sqrt(level)).
pub const ENEMY_SPAWN_INTERVAL_BASE_MS: f64 = 1_500.0;

/// Co-op spawn interval factor.
pub const COOP_SPAWN_INTERVAL_FACTOR: f64 = 0.7;

/// Co-op enemy hp factor.
pub const COOP_ENEMY_HP_FACTOR: f32 = 1.5;

/// Obstacle chance per level, capped at `ASTEROID_CHANCE_MAX`.
pub const ASTEROID_CHANCE_PER_LEVEL: f64 = 0.05;
pub const ASTEROID_CHANCE_MAX: f64 = 0.5;

/// Effectively unlimited obstacle hp.
pub const ASTEROID_HP: f32 = 999_999.0;

pub const ASTEROID_MIN_SIZE: f32 = 30.0;
pub const ASTEROID_MAX_SIZE: f32 = 60.0;

/// Enemies spawn this far above the top edge.
pub const ENEMY_SPAWN_Y: f32 = -50.0;

/// Maximum random delay before a fresh enemy's first shot.
pub const ENEMY_FIRST_SHOT_JITTER_MS: f64 = 2_000.0;

/// Maximum random jitter added to ordinary enemy fire cadence.
pub const ENEMY_FIRE_JITTER_MS: f64 = 1_000.0;

// --- Bosses ---

pub const BOSS_SPAWN_Y: f32 = -100.0;
pub const BOSS_HOLD_ALTITUDE: f32 = 80.0;
pub const BOSS_DESCENT_SPEED: f32 = 2.0;
pub const BOSS_FIRST_SHOT_DELAY_MS: f64 = 2_000.0;

/// Boss hp tier constant: hp = level*100 + tier*level*2.
pub const BOSS_HP_TIER: f32 = 50.0;
pub const MINI_BOSS_HP_TIER: f32 = 15.0;

// --- Power-ups & buffs ---

/// Chance of a power-up drop on any kill.
pub const POWER_UP_DROP_CHANCE: f64 = 0.05;

/// Duration of a timed buff granted by a pickup.
pub const BUFF_DURATION_MS: f64 = 5_000.0;

/// Hit points restored by a health pickup.
pub const HEALTH_PICKUP_AMOUNT: f32 = 30.0;

pub const POWER_UP_SIZE: f32 = 20.0;
pub const POWER_UP_FALL_SPEED: f32 = 2.0;

pub const SPEED_BUFF_MULTIPLIER: f32 = 1.5;
pub const RAPID_FIRE_DIVISOR: f64 = 2.0;

// --- Player weapons ---

pub const PLAYER_BULLET_SPEED: f32 = 12.0;
pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 12.0;

// --- Skills ---

pub const OVERDRIVE_FIRE_DIVISOR: f64 = 3.0;
pub const OVERDRIVE_SPEED_MULTIPLIER: f32 = 1.5;
pub const PHASE_SPEED_MULTIPLIER: f32 = 1.5;

pub const MISSILE_SWARM_COUNT: usize = 8;
pub const MISSILE_LAUNCH_SPEED: f32 = 5.0;
pub const MISSILE_SIZE: f32 = 8.0;
pub const MISSILE_DAMAGE_FACTOR: f32 = 2.0;

/// Steering acceleration applied to homing missiles each tick.
pub const HOMING_ACCELERATION: f32 = 0.5;

/// Hard cap on homing missile speed.
pub const HOMING_MAX_SPEED: f32 = 8.0;

pub const BEAM_WIDTH: f32 = 50.0;
pub const BEAM_DAMAGE: f32 = 200.0;
pub const BEAM_PARTICLES: usize = 30;

pub const BULWARK_HEAL_FRACTION: f32 = 0.3;
pub const BULWARK_SHIELD_MS: f64 = 5_000.0;

// --- Collisions ---

/// Raw ramming damage before collision resistance.
pub const RAM_DAMAGE: f32 = 30.0;

/// Obstacles hit twice as hard.
pub const OBSTACLE_RAM_DAMAGE: f32 = RAM_DAMAGE * 2.0;

/// Damage a boss takes when a player rams it.
pub const BOSS_RAM_CHIP_DAMAGE: f32 = 20.0;

// --- Feedback ---

pub const PARTICLE_SIZE: f32 = 3.0;
pub const PARTICLE_DECAY: f32 = 0.05;
pub const TEXT_DECAY: f32 = 0.02;
pub const TEXT_RISE_SPEED: f32 = 1.0;

pub const HIT_PARTICLES: usize = 2;
pub const PIERCING_HIT_PARTICLES: usize = 10;
pub const KILL_PARTICLES: usize = 10;
pub const DAMAGE_TAKEN_PARTICLES: usize = 3;
pub const RAM_PARTICLES: usize = 10;
pub const CLEAR_PARTICLES: usize = 5;

// --- Achievements ---

pub const FIRST_BLOOD_KILLS: u32 = 10;
pub const SURVIVOR_TIME_MS: f64 = 120_000.0;
pub const COLLECTOR_PICKUPS: u32 = 5;
pub const RAMPAGE_COMBO: u32 = 10;
pub const VETERAN_TOTAL_KILLS: u64 = 500;

// --- Adapter ---

/// Nominal frame rate of the headless loop (Hz).
pub const FRAME_RATE: u32 = 60;
