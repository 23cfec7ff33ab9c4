//! Experience curves and level-derived stat scaling.

use crate::catalog::types::{Rarity, Stats};
use crate::collection::CollectedCreature;
use crate::core::balance::{
    exp_curve_base, rarity_skill_factor, EVOLUTION_STAT_BONUS, SKILL_BONUS_STEP,
    SKILL_GROWTH_PER_LEVEL, STAT_GROWTH_PER_LEVEL,
};
use crate::core::constants::MAX_LEVEL;

/// Exp thresholds per level for a rarity. Index 0 is the cost of going
/// from level 1 to 2; higher rarities level slower.
pub fn level_up_curve(rarity: Rarity) -> [u32; MAX_LEVEL as usize] {
    let base = exp_curve_base(rarity);
    let mut curve = [0u32; MAX_LEVEL as usize];
    for (i, slot) in curve.iter_mut().enumerate() {
        *slot = base * (i as u32 + 1);
    }
    curve
}

/// Exp needed to advance from `level` to `level + 1`.
fn threshold_for(rarity: Rarity, level: u32) -> u32 {
    let curve = level_up_curve(rarity);
    let idx = (level.saturating_sub(1) as usize).min(curve.len() - 1);
    curve[idx]
}

/// Adds exp to a creature and resolves any level-ups. Returns the number
/// of levels gained. At the level cap exp is forced to 0 (no banking).
pub fn grant_exp(creature: &mut CollectedCreature, amount: u32) -> u32 {
    let rarity = match creature.definition() {
        Some(def) => def.rarity,
        None => return 0,
    };

    if creature.level >= MAX_LEVEL {
        creature.exp = 0;
        return 0;
    }

    creature.exp += amount;
    let mut levels_gained = 0;

    while creature.level < MAX_LEVEL {
        let needed = threshold_for(rarity, creature.level);
        if creature.exp < needed {
            break;
        }
        creature.exp -= needed;
        creature.level += 1;
        levels_gained += 1;
    }

    if creature.level >= MAX_LEVEL {
        creature.exp = 0;
    }

    levels_gained
}

/// Level-scaled stats: base * (1 + (level - 1) * 0.15), floored, plus the
/// flat evolution bonus on every stat.
pub fn effective_stats(creature: &CollectedCreature) -> Stats {
    let def = match creature.definition() {
        Some(def) => def,
        None => return Stats::default(),
    };

    let scale = 1.0 + (creature.level.saturating_sub(1)) as f64 * STAT_GROWTH_PER_LEVEL;
    let flat = creature.evolution_bonus * EVOLUTION_STAT_BONUS;

    Stats {
        power: (def.base_stats.power as f64 * scale) as u32 + flat,
        speed: (def.base_stats.speed as f64 * scale) as u32 + flat,
        grip: (def.base_stats.grip as f64 * scale) as u32 + flat,
    }
}

/// Skill power multiplier: grows slower per level than raw stats and is
/// weighted by rarity and the skill bonus track.
pub fn skill_power_multiplier(creature: &CollectedCreature) -> f64 {
    let rarity = match creature.definition() {
        Some(def) => def.rarity,
        None => return 1.0,
    };

    let level_part = 1.0
        + (creature.level.saturating_sub(1)) as f64 * SKILL_GROWTH_PER_LEVEL
        + creature.skill_bonus as f64 * SKILL_BONUS_STEP;
    level_part * rarity_skill_factor(rarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(definition_id: u32) -> CollectedCreature {
        CollectedCreature::new(definition_id)
    }

    #[test]
    fn test_curve_is_increasing_and_rarity_scaled() {
        let common = level_up_curve(Rarity::Common);
        let cosmic = level_up_curve(Rarity::Cosmic);
        for i in 1..common.len() {
            assert!(common[i] > common[i - 1]);
        }
        for i in 0..common.len() {
            assert!(cosmic[i] > common[i]);
        }
    }

    #[test]
    fn test_grant_exp_levels_up() {
        let mut c = owned(1); // Sproutling, common: 100 exp to level 2
        let gained = grant_exp(&mut c, 100);
        assert_eq!(gained, 1);
        assert_eq!(c.level, 2);
        assert_eq!(c.exp, 0);
    }

    #[test]
    fn test_grant_exp_carries_remainder() {
        let mut c = owned(1);
        grant_exp(&mut c, 150);
        assert_eq!(c.level, 2);
        assert_eq!(c.exp, 50);
    }

    #[test]
    fn test_grant_exp_multi_level() {
        let mut c = owned(1);
        // 100 + 200 = 300 to reach level 3.
        let gained = grant_exp(&mut c, 300);
        assert_eq!(gained, 2);
        assert_eq!(c.level, 3);
        assert_eq!(c.exp, 0);
    }

    #[test]
    fn test_level_cap_forces_zero_exp() {
        let mut c = owned(1);
        grant_exp(&mut c, 1_000_000);
        assert_eq!(c.level, MAX_LEVEL);
        assert_eq!(c.exp, 0);

        // Further grants stay clamped.
        grant_exp(&mut c, 500);
        assert_eq!(c.level, MAX_LEVEL);
        assert_eq!(c.exp, 0);
    }

    #[test]
    fn test_effective_stats_monotonic_in_level() {
        for def in crate::catalog::all() {
            let mut c = owned(def.id);
            let mut prev = effective_stats(&c);
            assert!(prev.power >= def.base_stats.power);
            assert!(prev.speed >= def.base_stats.speed);
            assert!(prev.grip >= def.base_stats.grip);
            for level in 2..=MAX_LEVEL {
                c.level = level;
                let next = effective_stats(&c);
                assert!(next.power >= prev.power, "{} power regressed", def.name);
                assert!(next.speed >= prev.speed, "{} speed regressed", def.name);
                assert!(next.grip >= prev.grip, "{} grip regressed", def.name);
                prev = next;
            }
        }
    }

    #[test]
    fn test_effective_stats_level_one_equals_base() {
        let c = owned(1);
        let def = c.definition().unwrap();
        assert_eq!(effective_stats(&c), def.base_stats);
    }

    #[test]
    fn test_evolution_bonus_adds_flat_stats() {
        let mut c = owned(1);
        let base = effective_stats(&c);
        c.evolution_bonus = 2;
        let boosted = effective_stats(&c);
        assert_eq!(boosted.power, base.power + 10);
        assert_eq!(boosted.speed, base.speed + 10);
        assert_eq!(boosted.grip, base.grip + 10);
    }

    #[test]
    fn test_skill_multiplier_smaller_than_stat_growth() {
        let mut c = owned(1); // common: rarity factor 1.0
        c.level = MAX_LEVEL;
        let skill = skill_power_multiplier(&c);
        let stat = 1.0 + (MAX_LEVEL - 1) as f64 * STAT_GROWTH_PER_LEVEL;
        assert!(skill < stat);
    }

    #[test]
    fn test_skill_multiplier_rarity_weighting() {
        let common = owned(1);
        let cosmic = owned(24);
        assert!(skill_power_multiplier(&cosmic) > skill_power_multiplier(&common));
        assert!((skill_power_multiplier(&common) - 1.0).abs() < 1e-9);
    }
}
