//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes session commands,
//! runs all systems, and produces `GameSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voidwars_core::commands::{FrameInput, SessionCommand};
use voidwars_core::components::Player;
use voidwars_core::constants::REVIVE_HP_FRACTION;
use voidwars_core::enums::{GameMode, UpgradeId};
use voidwars_core::events::GameEvent;
use voidwars_core::state::GameSnapshot;
use voidwars_core::types::SimTime;

use crate::config::SimConfig;
use crate::rng::RandomSource;
use crate::session::{GameStats, SessionError, SessionStats};
use crate::systems;
use crate::systems::collision::Combat;
use crate::systems::spawner::SpawnSchedule;
use crate::upgrades;
use crate::world_setup;

/// Salt separating the cosmetic stream from the gameplay stream.
const FX_SEED_SALT: u64 = 0x5EED_F00D_CAFE_0001;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: Box<dyn RandomSource + Send>,
    fx_rng: ChaCha8Rng,
    stats: GameStats,
    session: SessionStats,
    spawn_schedule: SpawnSchedule,
    upgrade_choices: Vec<UpgradeId>,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    /// Pause key state on the previous tick, for edge detection.
    pause_held: bool,
    /// Gameplay clock value when the current freeze began.
    frozen_since_ms: Option<f64>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config, seeding the
    /// gameplay stream from `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let rng = Box::new(ChaCha8Rng::seed_from_u64(config.seed));
        Self::with_random(config, rng)
    }

    /// Create an engine whose gameplay rolls come from `rng`.
    pub fn with_random(config: SimConfig, rng: Box<dyn RandomSource + Send>) -> Self {
        let mut world = World::new();
        world_setup::spawn_players(&mut world, &config.classes());
        info!(
            "New {:?} session with {:?}, seed {}",
            config.mode,
            config.classes(),
            config.seed
        );

        Self {
            world,
            time: SimTime::default(),
            fx_rng: ChaCha8Rng::seed_from_u64(config.seed ^ FX_SEED_SALT),
            rng,
            stats: GameStats::new(config.tuning.mission_duration_ms),
            session: SessionStats::new(config.prior_total_kills, &config.unlocked_achievements),
            spawn_schedule: SpawnSchedule::default(),
            upgrade_choices: Vec::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            pause_held: false,
            frozen_since_ms: None,
            config,
        }
    }

    /// Queue a session command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation to `timestamp_ms` and return the resulting
    /// snapshot. Frozen sessions still process commands and report state.
    pub fn tick(&mut self, timestamp_ms: f64, input: &FrameInput) -> GameSnapshot {
        self.time.advance(timestamp_ms);
        if self.stats.is_finished() {
            return self.snapshot();
        }

        self.process_commands();

        if input.pause && !self.pause_held {
            self.toggle_pause();
        }
        self.pause_held = input.pause;

        let now = self.time.timestamp_ms;
        let previous = now - self.time.dt_ms;
        if self.stats.is_frozen() {
            self.frozen_since_ms.get_or_insert(previous);
        } else {
            if let Some(since) = self.frozen_since_ms.take() {
                let frozen_for = previous - since;
                systems::timers::shift_clock(&mut self.world, frozen_for);
                self.spawn_schedule.shift(frozen_for);
            }
            self.run_systems(input);
            if self.stats.is_frozen() {
                self.frozen_since_ms = Some(now);
            }
        }

        self.snapshot()
    }

    /// Pick one of the offered upgrades: revive downed players, apply it to
    /// every ship and start the next level.
    pub fn select_upgrade(&mut self, id: UpgradeId) -> Result<(), SessionError> {
        if self.stats.is_finished() {
            return Err(SessionError::SessionFinished);
        }
        if !self.stats.level_complete {
            return Err(SessionError::NoUpgradePending);
        }
        if !self.upgrade_choices.contains(&id) {
            return Err(SessionError::UpgradeNotOffered(id));
        }
        let upgrade = upgrades::find(id).ok_or(SessionError::UpgradeNotOffered(id))?;

        for (_entity, player) in self.world.query_mut::<&mut Player>() {
            if !player.is_alive() {
                player.hp = player.max_hp * REVIVE_HP_FRACTION;
            }
            (upgrade.apply)(player);
        }

        self.upgrade_choices.clear();
        self.stats.advance_level(self.config.tuning.mission_duration_ms);
        info!("Upgrade {} chosen, starting level {}", id.as_str(), self.stats.level);
        self.events.push(GameEvent::LevelStarted {
            level: self.stats.level,
        });
        Ok(())
    }

    /// Flip the pause flag. Ignored while a level is complete or the run is
    /// over. Returns whether the flag changed.
    pub fn toggle_pause(&mut self) -> bool {
        if self.stats.level_complete || self.stats.is_finished() {
            return false;
        }
        self.stats.paused = !self.stats.paused;
        self.events.push(GameEvent::PauseChanged {
            paused: self.stats.paused,
        });
        true
    }

    /// Abandon the run.
    pub fn exit_to_menu(&mut self) -> Result<(), SessionError> {
        if self.stats.is_finished() {
            return Err(SessionError::SessionFinished);
        }
        self.stats.exited = true;
        info!("Exited to menu on level {} with score {}", self.stats.level, self.stats.score);
        self.events.push(GameEvent::ExitToMenu);
        Ok(())
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn session(&self) -> &SessionStats {
        &self.session
    }

    /// Upgrades on offer. Empty unless a level is complete.
    pub fn upgrade_choices(&self) -> &[UpgradeId] {
        &self.upgrade_choices
    }

    pub fn is_finished(&self) -> bool {
        self.stats.is_finished()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }

    /// Process all queued commands. Rejections are logged, not fatal.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                warn!("Rejected {:?}: {}", command, err);
            }
        }
    }

    /// Handle a single session command.
    fn handle_command(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        match command {
            SessionCommand::SelectUpgrade { id } => self.select_upgrade(id),
            SessionCommand::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            SessionCommand::ExitToMenu => self.exit_to_menu(),
        }
    }

    fn hp_factor(&self) -> f32 {
        match self.config.mode {
            GameMode::Solo => 1.0,
            GameMode::Coop => self.config.tuning.coop_enemy_hp_factor,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &FrameInput) {
        let timestamp_ms = self.time.timestamp_ms;
        let dt_ms = self.time.dt_ms;
        let hp_factor = self.hp_factor();

        // 1. Countdowns (skills, combo)
        systems::timers::run(&mut self.world, &mut self.stats, dt_ms);
        // 2. Mission timer and boss arrival
        systems::progression::advance_mission(
            &mut self.world,
            &mut self.stats,
            &self.config.tuning,
            hp_factor,
            timestamp_ms,
            dt_ms,
            &mut self.fx_rng,
            &mut self.events,
        );
        // 3. Player skills, movement and fire
        systems::player_control::run(
            &mut self.world,
            input,
            timestamp_ms,
            &mut self.fx_rng,
            &mut self.events,
        );
        // 4. Projectiles and pickups
        systems::projectiles::run(&mut self.world);
        systems::projectiles::fall_power_ups(&mut self.world);
        // 5. Enemy AI (movement, escape, fire)
        systems::enemy_ai::run(
            &mut self.world,
            self.rng.as_mut(),
            self.stats.level,
            timestamp_ms,
            &mut self.events,
        );
        // 6. Collisions
        let mut combat = Combat {
            stats: &mut self.stats,
            session: &mut self.session,
            tuning: &self.config.tuning,
            rng: self.rng.as_mut(),
            fx: &mut self.fx_rng,
            events: &mut self.events,
            upgrade_choices: &mut self.upgrade_choices,
            timestamp_ms,
        };
        systems::collision::run(&mut self.world, &mut combat);
        // 7. Game over
        systems::progression::check_game_over(&self.world, &mut self.stats, &mut self.events);
        // 8. Cosmetic decay
        systems::effects::run(&mut self.world);
        // 9. Buff expiry
        systems::timers::expire_buffs(&mut self.world, timestamp_ms);
        // 10. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 11. Spawning
        if !self.stats.is_frozen() {
            systems::spawner::run(
                &mut self.world,
                &mut self.spawn_schedule,
                &self.stats,
                &self.config.tuning,
                self.config.mode,
                hp_factor,
                self.rng.as_mut(),
                timestamp_ms,
            );
        }
        // 12. Session statistics and achievements
        let anyone_alive = self.world.query::<&Player>().iter().any(|(_, p)| p.is_alive());
        if anyone_alive {
            self.session.time_alive_ms += dt_ms;
        }
        systems::achievements::run(&mut self.session, &mut self.events);
    }

    fn snapshot(&mut self) -> GameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.config.mode,
            &self.stats,
            &self.session,
            &self.upgrade_choices,
            events,
        )
    }
}
