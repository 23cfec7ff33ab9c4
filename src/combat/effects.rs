//! Effect descriptors keyed by skill id.
//!
//! Every skill resolves to one small data record interpreted by the engine's
//! generic executor, instead of per-skill branching scattered through the
//! battle modes.

use crate::catalog::types::{DotPayload, Skill, SkillKind};
use crate::catalog::FULL_TEAM_HEAL_SKILL;
use crate::combat::types::BuffStat;
use crate::core::balance::{DEFAULT_DEFENSE_DURATION, DEFAULT_DEFENSE_REDUCTION, TEAM_HEAL_FRACTION};

/// What executing a skill does. Interpreted by `engine::BattleCore`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    /// Single-target damage from the base formula.
    Attack,
    /// Damage to 1..max_targets enemies.
    Aoe { max_targets: u32 },
    /// Single-target damage plus a dot application.
    DotHit { payload: DotPayload },
    /// Timed damage-reduction shield on self.
    DefenseBuff { reduction: u32, duration: u32 },
    /// Heals all living teammates (self alone outside team modes).
    TeamHeal { fraction: f64 },
    /// Heals self by a fraction of max hp.
    SelfHeal { fraction: f64 },
    /// Timed additive stat change on self.
    StatBuff {
        stat: BuffStat,
        amount: i32,
        duration: u32,
    },
    /// Single-target stun; duration scales with skill power.
    Stun { duration: u32 },
    /// Dot application on up to max_targets enemies, no direct hit.
    MultiDot {
        name: &'static str,
        damage: u32,
        duration: u32,
        max_targets: u32,
    },
    /// Zeroes a single target's hp unconditionally.
    InstantKill,
    /// One-hit perfect dodge plus counter damage on trigger.
    PerfectGuard { counter: u32 },
}

/// How many explicit targets an effect needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Exactly one living enemy.
    Single,
    /// 1..=n living enemies.
    UpTo(u32),
    /// Self or team-wide; explicit targets are rejected as invalid.
    None,
}

/// Defense shield table: skill id -> (reduction %, duration). Unlisted
/// defense skills fall back to the generic 20% / 1 turn shield.
fn defense_entry(skill_id: u32) -> (u32, u32) {
    match skill_id {
        4 => (35, 2), // Iron Scalp
        _ => (DEFAULT_DEFENSE_REDUCTION, DEFAULT_DEFENSE_DURATION),
    }
}

/// Resolves the effect descriptor for a skill.
pub fn effect_for(skill: &Skill) -> SkillEffect {
    match skill.kind {
        SkillKind::Attack => SkillEffect::Attack,
        SkillKind::Aoe => SkillEffect::Aoe {
            max_targets: skill.target_cap(),
        },
        SkillKind::Dot => match skill.dot {
            Some(payload) => SkillEffect::DotHit { payload },
            // A dot skill without a payload hits like a plain attack.
            None => SkillEffect::Attack,
        },
        SkillKind::Defense => {
            let (reduction, duration) = defense_entry(skill.id);
            SkillEffect::DefenseBuff {
                reduction,
                duration,
            }
        }
        SkillKind::TeamHeal => SkillEffect::TeamHeal {
            fraction: if skill.id == FULL_TEAM_HEAL_SKILL {
                1.0
            } else {
                TEAM_HEAL_FRACTION
            },
        },
        SkillKind::Dodge => SkillEffect::PerfectGuard { counter: 200 },
        SkillKind::Special => special_effect(skill.id),
    }
}

/// The closed set of named special effects.
fn special_effect(skill_id: u32) -> SkillEffect {
    match skill_id {
        11 => SkillEffect::StatBuff {
            stat: BuffStat::Power,
            amount: 20,
            duration: 2,
        },
        12 => SkillEffect::StatBuff {
            stat: BuffStat::Speed,
            amount: 15,
            duration: 2,
        },
        13 => SkillEffect::Stun { duration: 1 },
        14 => SkillEffect::Stun { duration: 2 },
        15 => SkillEffect::SelfHeal { fraction: 0.3 },
        16 => SkillEffect::SelfHeal { fraction: 0.6 },
        17 => SkillEffect::MultiDot {
            name: "Burn",
            damage: 12,
            duration: 3,
            max_targets: 3,
        },
        18 => SkillEffect::MultiDot {
            name: "Poison",
            damage: 10,
            duration: 4,
            max_targets: 3,
        },
        20 => SkillEffect::InstantKill,
        // Unmapped specials act as a mild self buff rather than a fault.
        _ => SkillEffect::StatBuff {
            stat: BuffStat::Power,
            amount: 10,
            duration: 1,
        },
    }
}

/// Target requirements for an effect.
pub fn target_policy(effect: &SkillEffect) -> TargetPolicy {
    match effect {
        SkillEffect::Attack | SkillEffect::DotHit { .. } | SkillEffect::InstantKill => {
            TargetPolicy::Single
        }
        SkillEffect::Stun { .. } => TargetPolicy::Single,
        SkillEffect::Aoe { max_targets } => TargetPolicy::UpTo(*max_targets),
        SkillEffect::MultiDot { max_targets, .. } => TargetPolicy::UpTo(*max_targets),
        SkillEffect::DefenseBuff { .. }
        | SkillEffect::TeamHeal { .. }
        | SkillEffect::SelfHeal { .. }
        | SkillEffect::StatBuff { .. }
        | SkillEffect::PerfectGuard { .. } => TargetPolicy::None,
    }
}
