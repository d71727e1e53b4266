//! Achievement evaluation over the session counters.

use log::info;

use voidwars_core::constants::*;
use voidwars_core::enums::AchievementId;
use voidwars_core::events::GameEvent;

use crate::session::SessionStats;

fn satisfied(id: AchievementId, session: &SessionStats) -> bool {
    match id {
        AchievementId::FirstBlood => session.kills >= FIRST_BLOOD_KILLS,
        AchievementId::Survivor => session.time_alive_ms >= SURVIVOR_TIME_MS,
        AchievementId::Collector => session.power_ups_collected >= COLLECTOR_PICKUPS,
        AchievementId::BossKiller => session.bosses_killed >= 1,
        AchievementId::Rampage => session.best_combo >= RAMPAGE_COMBO,
        AchievementId::Veteran => session.total_kills() >= VETERAN_TOTAL_KILLS,
    }
}

/// Unlock every newly satisfied achievement, reporting each one once.
pub fn run(session: &mut SessionStats, events: &mut Vec<GameEvent>) {
    for id in AchievementId::ALL {
        if session.unlocked.contains(&id) || !satisfied(id, session) {
            continue;
        }
        session.unlocked.insert(id);
        info!("Achievement unlocked: {:?}", id);
        events.push(GameEvent::AchievementUnlocked { id });
    }
}
