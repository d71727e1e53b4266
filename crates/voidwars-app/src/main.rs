//! Headless VOID WARS runner.
//!
//! Usage: `voidwars-app [config.json] [seconds]`
//!
//! Plays a session with a simple autopilot (strafe, fire, use the skill,
//! take the first upgrade offered) and prints the final snapshot as JSON.

use std::time::{Duration, Instant};

use log::{info, LevelFilter};

use voidwars_app::game_loop::SessionHooks;
use voidwars_app::state::{AppState, GameLoopCommand};
use voidwars_core::commands::{ActionSet, FrameInput, SessionCommand};
use voidwars_core::constants::PLAYFIELD_WIDTH;
use voidwars_core::state::GameSnapshot;
use voidwars_sim::SimConfig;

const DEFAULT_RUN_SECONDS: u64 = 30;

struct LogHooks;

impl SessionHooks for LogHooks {
    fn on_game_over(&mut self, score: u64) {
        info!("Game over, final score {}", score);
    }

    fn on_exit_to_menu(&mut self) {
        info!("Returned to menu");
    }
}

/// Sweep each ship across the field while firing and pressing the skill.
fn autopilot(snapshot: &GameSnapshot) -> FrameInput {
    let mut input = FrameInput::default();
    for ship in &snapshot.entities.players {
        let Some(slot) = input.slots.get_mut(ship.slot as usize) else {
            continue;
        };
        let heading_right = (snapshot.time.tick / 120) % 2 == 0;
        let x = ship.position.x;
        *slot = ActionSet {
            left: !heading_right && x > 0.0,
            right: heading_right && x + ship.width < PLAYFIELD_WIDTH,
            fire: true,
            skill: true,
            ..Default::default()
        };
    }
    input
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logging::log_to_stderr(LevelFilter::Info);

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    let run_for = Duration::from_secs(match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_RUN_SECONDS,
    });

    let state = AppState::new();
    state.start(config, Box::new(LogHooks))?;

    let deadline = Instant::now() + run_for;
    let mut last_tick = 0;
    while state.is_running() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(50));
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        if snapshot.time.tick == last_tick {
            continue;
        }
        last_tick = snapshot.time.tick;

        if let Some(choice) = snapshot.upgrade_choices.first() {
            let pick = SessionCommand::SelectUpgrade { id: choice.id };
            if state.send(GameLoopCommand::Session(pick)).is_err() {
                break;
            }
        }
        if state.send(GameLoopCommand::Input(autopilot(&snapshot))).is_err() {
            break;
        }
    }

    // Let the loop process the exit before shutting it down.
    if state.send(GameLoopCommand::Session(SessionCommand::ExitToMenu)).is_ok() {
        let grace = Instant::now() + Duration::from_secs(1);
        while state.is_running() && Instant::now() < grace {
            std::thread::sleep(Duration::from_millis(10));
        }
    }
    // The loop may already have ended on its own.
    let _ = state.stop();

    if let Some(snapshot) = state.snapshot() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
