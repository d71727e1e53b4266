//! Application state shared between the embedding host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use voidwars_core::commands::{FrameInput, SessionCommand};
use voidwars_core::state::GameSnapshot;
use voidwars_sim::SimConfig;

use crate::game_loop::{self, LoopError, SessionHooks};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Replace the held input used for subsequent ticks.
    Input(FrameInput),
    /// A session command to forward to the simulation engine.
    Session(SessionCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start`
/// - `Arc<Mutex<...>>` holds the latest snapshot shared with the loop thread
pub struct AppState {
    /// Channel sender to the game loop thread. `None` before `start`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a loop thread exists and has not finished.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .map(|h| h.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Start a new session on a fresh loop thread.
    pub fn start(&self, config: SimConfig, hooks: Box<dyn SessionHooks>) -> Result<(), LoopError> {
        let mut handle = self.handle.lock().map_err(|_| LoopError::Poisoned)?;
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return Err(LoopError::AlreadyRunning);
        }

        *self.latest_snapshot.lock().map_err(|_| LoopError::Poisoned)? = None;
        let (tx, join) = game_loop::spawn_game_loop(config, hooks, self.latest_snapshot.clone())?;
        *self.command_tx.lock().map_err(|_| LoopError::Poisoned)? = Some(tx);
        *handle = Some(join);
        Ok(())
    }

    /// Forward a command to the running loop.
    pub fn send(&self, command: GameLoopCommand) -> Result<(), LoopError> {
        let tx = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        let tx = tx.as_ref().ok_or(LoopError::NotRunning)?;
        tx.send(command).map_err(|_| LoopError::Disconnected)
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    /// Stop the loop and wait for its thread. Stopping a loop that already
    /// ended on its own is not an error.
    pub fn stop(&self) -> Result<(), LoopError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| LoopError::Poisoned)?
            .take();
        let join = self.handle.lock().map_err(|_| LoopError::Poisoned)?.take();
        let (Some(tx), Some(join)) = (tx, join) else {
            return Err(LoopError::NotRunning);
        };
        // The receiver is gone if the session already ended.
        let _ = tx.send(GameLoopCommand::Shutdown);
        join.join().map_err(|_| LoopError::Panicked)
    }
}
