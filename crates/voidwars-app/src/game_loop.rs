//! Game loop thread. Runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Input and session commands arrive via `mpsc` channel. The latest snapshot
//! is stored in shared state for synchronous polling. The loop ends on
//! `Shutdown`, channel disconnect, or a terminal session event.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use voidwars_core::commands::FrameInput;
use voidwars_core::constants::FRAME_RATE;
use voidwars_core::events::GameEvent;
use voidwars_core::state::GameSnapshot;
use voidwars_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Receives the one-shot terminal notifications of a session.
pub trait SessionHooks: Send {
    fn on_game_over(&mut self, score: u64);
    fn on_exit_to_menu(&mut self);
}

/// Hooks that ignore every notification.
pub struct NoHooks;

impl SessionHooks for NoHooks {
    fn on_game_over(&mut self, _score: u64) {}
    fn on_exit_to_menu(&mut self) {}
}

/// Failures of the loop lifecycle.
#[derive(Debug)]
pub enum LoopError {
    AlreadyRunning,
    NotRunning,
    /// The loop thread has stopped and dropped its receiver.
    Disconnected,
    /// Shared state lock was poisoned by a panicking thread.
    Poisoned,
    /// The loop thread panicked.
    Panicked,
    Spawn(std::io::Error),
}

impl From<std::io::Error> for LoopError {
    fn from(e: std::io::Error) -> Self {
        LoopError::Spawn(e)
    }
}

impl std::fmt::Display for LoopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopError::AlreadyRunning => write!(f, "Game loop is already running"),
            LoopError::NotRunning => write!(f, "Game loop is not running"),
            LoopError::Disconnected => write!(f, "Game loop has stopped"),
            LoopError::Poisoned => write!(f, "Shared loop state is poisoned"),
            LoopError::Panicked => write!(f, "Game loop thread panicked"),
            LoopError::Spawn(e) => write!(f, "Failed to spawn game loop thread: {}", e),
        }
    }
}

impl std::error::Error for LoopError {}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    hooks: Box<dyn SessionHooks>,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), LoopError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("voidwars-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, cmd_rx, &latest_snapshot, hooks);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or the session ends.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
    mut hooks: Box<dyn SessionHooks>,
) {
    let started = Instant::now();
    let mut next_tick_time = started;
    let mut input = FrameInput::default();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(frame)) => input = frame,
                Ok(GameLoopCommand::Session(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("Game loop shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick at the monotonic clock
        let timestamp_ms = started.elapsed().as_secs_f64() * 1000.0;
        let snapshot = engine.tick(timestamp_ms, &input);

        // 3. Forward terminal notifications
        let ended = dispatch_terminal_events(&snapshot.events, hooks.as_mut());

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if ended || engine.is_finished() {
            info!("Session ended after {} ticks", engine.time().tick);
            return;
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Call the matching hook for each terminal event. Returns whether any fired.
pub fn dispatch_terminal_events(events: &[GameEvent], hooks: &mut dyn SessionHooks) -> bool {
    let mut ended = false;
    for event in events {
        match event {
            GameEvent::GameOver { score } => {
                hooks.on_game_over(*score);
                ended = true;
            }
            GameEvent::ExitToMenu => {
                hooks.on_exit_to_menu();
                ended = true;
            }
            _ => {}
        }
    }
    ended
}
