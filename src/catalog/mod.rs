//! Read-only registry of creature and skill definitions.

mod data;
pub mod types;

pub use data::{
    all, filter_by_rarity, find, find_skill, gacha_pool, get_all_creatures, get_all_skills,
    raid_bosses, FULL_TEAM_HEAL_SKILL,
};
