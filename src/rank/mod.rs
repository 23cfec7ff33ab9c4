//! Competitive rank model: tier/division derivation from rank points,
//! win/placement point deltas, and tier-derived reward multipliers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankTier {
    Bronze = 0,
    Silver = 1,
    Gold = 2,
    Platinum = 3,
    Diamond = 4,
    Master = 5,
    Legend = 6,
}

impl RankTier {
    pub fn all() -> [RankTier; 7] {
        [
            RankTier::Bronze,
            RankTier::Silver,
            RankTier::Gold,
            RankTier::Platinum,
            RankTier::Diamond,
            RankTier::Master,
            RankTier::Legend,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Master => "Master",
            RankTier::Legend => "Legend",
        }
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Minimum points to enter this tier.
    pub fn min_points(&self) -> u32 {
        match self {
            RankTier::Bronze => 0,
            RankTier::Silver => 100,
            RankTier::Gold => 250,
            RankTier::Platinum => 450,
            RankTier::Diamond => 700,
            RankTier::Master => 1000,
            RankTier::Legend => 1400,
        }
    }
}

/// Width used for division math in the final tier, which has no upper bound.
const LEGEND_RANGE_WIDTH: u32 = 400;

/// Battle outcome fed to the points model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOutcome {
    Win,
    Loss,
    Draw,
    /// Final placement in a royale-style mode (1 = winner).
    Placement(u32),
}

/// Tier, division, and the points they were derived from. Division is
/// always computed from points, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    pub tier: RankTier,
    /// 3 = just entered the tier, 1 = closest to promotion.
    pub division: u32,
    pub points: u32,
}

impl RankInfo {
    /// Display name, e.g. "Gold II".
    pub fn display_name(&self) -> String {
        let numeral = match self.division {
            1 => "I",
            2 => "II",
            _ => "III",
        };
        format!("{} {}", self.tier.name(), numeral)
    }
}

/// Derives tier and division from a points scalar.
pub fn rank_from_points(points: u32) -> RankInfo {
    let tier = RankTier::all()
        .into_iter()
        .rev()
        .find(|t| points >= t.min_points())
        .unwrap_or(RankTier::Bronze);

    let range_start = tier.min_points();
    let range_width = match next_tier(tier) {
        Some(next) => next.min_points() - range_start,
        None => LEGEND_RANGE_WIDTH,
    };

    // Bottom third -> division 3, top third -> division 1.
    let into_tier = (points - range_start).min(range_width.saturating_sub(1));
    let band = into_tier * 3 / range_width;
    let division = 3 - band.min(2);

    RankInfo {
        tier,
        division,
        points,
    }
}

fn next_tier(tier: RankTier) -> Option<RankTier> {
    let all = RankTier::all();
    let idx = tier.index() as usize;
    all.get(idx + 1).copied()
}

/// Base point gain for the tier: diminishing returns at high rank.
pub fn base_gain(tier: RankTier) -> i32 {
    (30 - 3 * tier.index() as i32).max(15)
}

/// Base point loss for the tier.
pub fn base_loss(tier: RankTier) -> i32 {
    (20 - 2 * tier.index() as i32).max(10)
}

/// Signed rank point delta for an outcome at the given rank.
pub fn points_delta(outcome: RankOutcome, rank: &RankInfo) -> i32 {
    let gain = base_gain(rank.tier);
    let loss = base_loss(rank.tier);
    match outcome {
        RankOutcome::Win => gain,
        RankOutcome::Loss => -loss,
        RankOutcome::Draw => 0,
        RankOutcome::Placement(p) => match p {
            1 => gain * 2,
            2 => gain * 3 / 2,
            3 => gain,
            4 | 5 => gain / 2,
            _ => -loss,
        },
    }
}

/// Applies a delta to a points scalar, clamped at a floor of 0.
pub fn apply_points_delta(points: u32, delta: i32) -> u32 {
    if delta >= 0 {
        points.saturating_add(delta as u32)
    } else {
        points.saturating_sub(delta.unsigned_abs())
    }
}

/// Currency reward multiplier for the player's rank.
pub fn coin_reward_multiplier(rank: &RankInfo) -> f64 {
    1.0 + rank.tier.index() as f64 * 0.1
}

/// Opposition strength multiplier: scales with tier and, within a tier,
/// with proximity to promotion.
pub fn npc_strength_multiplier(rank: &RankInfo) -> f64 {
    1.0 + rank.tier.index() as f64 * 0.2 + (3 - rank.division) as f64 * 0.05
}
