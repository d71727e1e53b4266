//! The fixed upgrade pool offered after each boss kill.

use voidwars_core::components::Player;
use voidwars_core::constants::UPGRADE_CHOICES;
use voidwars_core::enums::{Rarity, UpgradeId};
use voidwars_core::state::UpgradeView;

use crate::rng::{shuffle, RandomSource};

pub struct UpgradeOption {
    pub id: UpgradeId,
    pub name_key: &'static str,
    pub description_key: &'static str,
    pub rarity: Rarity,
    pub apply: fn(&mut Player),
}

impl UpgradeOption {
    pub fn view(&self) -> UpgradeView {
        UpgradeView {
            id: self.id,
            name: self.name_key.to_string(),
            description: self.description_key.to_string(),
            rarity: self.rarity,
        }
    }
}

pub static UPGRADE_POOL: [UpgradeOption; 5] = [
    UpgradeOption {
        id: UpgradeId::DmgBoost,
        name_key: "upgrade.dmg_boost.name",
        description_key: "upgrade.dmg_boost.desc",
        rarity: Rarity::Common,
        apply: |p| p.damage_multiplier += 0.2,
    },
    UpgradeOption {
        id: UpgradeId::HpBoost,
        name_key: "upgrade.hp_boost.name",
        description_key: "upgrade.hp_boost.desc",
        rarity: Rarity::Common,
        apply: |p| {
            p.max_hp *= 1.3;
            p.hp = p.max_hp;
        },
    },
    UpgradeOption {
        id: UpgradeId::FireRate,
        name_key: "upgrade.fire_rate.name",
        description_key: "upgrade.fire_rate.desc",
        rarity: Rarity::Rare,
        apply: |p| p.fire_interval_ms *= 0.85,
    },
    UpgradeOption {
        id: UpgradeId::SpeedBoost,
        name_key: "upgrade.speed_boost.name",
        description_key: "upgrade.speed_boost.desc",
        rarity: Rarity::Common,
        apply: |p| p.speed *= 1.15,
    },
    UpgradeOption {
        id: UpgradeId::SkillCd,
        name_key: "upgrade.skill_cd.name",
        description_key: "upgrade.skill_cd.desc",
        rarity: Rarity::Legendary,
        apply: |p| p.skill_cooldown_multiplier *= 0.8,
    },
];

pub fn find(id: UpgradeId) -> Option<&'static UpgradeOption> {
    UPGRADE_POOL.iter().find(|u| u.id == id)
}

/// Shuffle the pool and take the first `UPGRADE_CHOICES` ids. Never repeats.
pub fn draw_choices(rng: &mut dyn RandomSource) -> Vec<UpgradeId> {
    let mut ids: Vec<UpgradeId> = UPGRADE_POOL.iter().map(|u| u.id).collect();
    shuffle(rng, &mut ids);
    ids.truncate(UPGRADE_CHOICES);
    ids
}
