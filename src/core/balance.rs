//! Shared balance constants used by the gacha, progression, and battle modes.
//!
//! All core balance numbers should be defined here.
//! Change once, test everywhere.

use crate::catalog::types::Rarity;

// =============================================================================
// GACHA
// =============================================================================

/// Coin cost of a single pull.
pub const SINGLE_PULL_COST: u64 = 100;

/// Coin cost of a full batch (volume discount vs. 10 singles).
pub const BATCH_PULL_COST: u64 = 900;

/// Draws per batch pull.
pub const BATCH_PULL_SIZE: usize = 10;

/// Cumulative rarity boundaries, tested rarest-first against a roll in [0, 1).
///
/// cosmic 0.1%, legendary 1%, epic 5%, rare 14%, uncommon 30%,
/// common takes the remainder (~49.9%).
pub const RARITY_BOUNDARIES: [(Rarity, f64); 5] = [
    (Rarity::Cosmic, 0.001),
    (Rarity::Legendary, 0.011),
    (Rarity::Epic, 0.061),
    (Rarity::Rare, 0.201),
    (Rarity::Uncommon, 0.501),
];

/// Draw a rarity tier from a uniform roll in [0, 1).
pub fn rarity_for_roll(roll: f64) -> Rarity {
    for (rarity, boundary) in RARITY_BOUNDARIES {
        if roll < boundary {
            return rarity;
        }
    }
    Rarity::Common
}

// =============================================================================
// PROGRESSION
// =============================================================================

/// Stat growth per level above 1 (multiplicative).
pub const STAT_GROWTH_PER_LEVEL: f64 = 0.15;

/// Skill power growth per level above 1. Deliberately smaller than
/// STAT_GROWTH_PER_LEVEL so skills do not outscale base attacks.
pub const SKILL_GROWTH_PER_LEVEL: f64 = 0.08;

/// Skill power bonus per skill-bonus track point.
pub const SKILL_BONUS_STEP: f64 = 0.05;

/// Flat per-stat bonus per evolution-bonus track point.
pub const EVOLUTION_STAT_BONUS: u32 = 5;

/// Base exp threshold per rarity; threshold for level N -> N+1 is base * N.
pub fn exp_curve_base(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 100,
        Rarity::Uncommon => 120,
        Rarity::Rare => 150,
        Rarity::Epic => 200,
        Rarity::Legendary => 260,
        Rarity::Cosmic => 340,
    }
}

/// Rarity factor applied to skill power: 1.00 (common) to 1.30 (cosmic)
/// in fixed steps of 0.06.
pub fn rarity_skill_factor(rarity: Rarity) -> f64 {
    1.0 + rarity.index() as f64 * 0.06
}

// =============================================================================
// COMBAT
// =============================================================================

/// Elemental advantage multiplier.
pub const ELEMENT_ADVANTAGE: f64 = 1.3;

/// Elemental disadvantage multiplier.
pub const ELEMENT_DISADVANTAGE: f64 = 0.7;

/// NPC damage jitter: 0.8 + roll * 0.4 (plus/minus 20%).
pub const JITTER_BASE: f64 = 0.8;
pub const JITTER_SPREAD: f64 = 0.4;

/// Fallback defense buff for unlisted defense skills: 20% for 1 turn.
pub const DEFAULT_DEFENSE_REDUCTION: u32 = 20;
pub const DEFAULT_DEFENSE_DURATION: u32 = 1;

/// Team heal fraction of max hp (the full-restore skill uses 1.0).
pub const TEAM_HEAL_FRACTION: f64 = 0.5;

// =============================================================================
// DUEL (tug-of-war)
// =============================================================================

/// Duel progress scale; starts centered.
pub const DUEL_PROGRESS_START: f64 = 50.0;
pub const DUEL_PROGRESS_MAX: f64 = 100.0;

/// Deterministic countdown: ticks in the duel window.
pub const DUEL_TICKS: u32 = 30;

/// Thresholds at timeout: below wins for the player, above loses.
pub const DUEL_WIN_THRESHOLD: f64 = 45.0;
pub const DUEL_LOSS_THRESHOLD: f64 = 55.0;

// =============================================================================
// BOSS RAID
// =============================================================================

/// Fixed raid boss hp pool.
pub const RAID_BOSS_HP: u32 = 5000;

/// Fixed raid victory rewards, granted exactly once.
pub const RAID_COIN_REWARD: u64 = 500;
pub const RAID_EXP_REWARD: u32 = 120;

// =============================================================================
// REWARD TABLES
// =============================================================================

/// Base coins for a duel win / loss (before the rank coin multiplier).
pub const DUEL_WIN_COINS: u64 = 100;
pub const DUEL_LOSS_COINS: u64 = 20;

/// Base exp for a duel win / loss.
pub const DUEL_WIN_EXP: u32 = 40;
pub const DUEL_LOSS_EXP: u32 = 15;

/// Base coins by royale placement (1-indexed; worse than listed earns the
/// last entry).
pub const ROYALE_PLACEMENT_COINS: [u64; 5] = [200, 140, 100, 60, 60];
pub const ROYALE_FLOOR_COINS: u64 = 25;

/// Base exp by royale placement.
pub const ROYALE_PLACEMENT_EXP: [u32; 5] = [60, 45, 35, 20, 20];
pub const ROYALE_FLOOR_EXP: u32 = 10;

/// Coins for a given placement before rank multipliers.
pub fn placement_coins(placement: u32) -> u64 {
    match placement {
        1..=5 => ROYALE_PLACEMENT_COINS[(placement - 1) as usize],
        _ => ROYALE_FLOOR_COINS,
    }
}

/// Exp for a given placement.
pub fn placement_exp(placement: u32) -> u32 {
    match placement {
        1..=5 => ROYALE_PLACEMENT_EXP[(placement - 1) as usize],
        _ => ROYALE_FLOOR_EXP,
    }
}
