use crate::catalog;
use crate::catalog::types::{CreatureDefinition, Element, Stats};
use crate::collection::CollectedCreature;
use crate::progression::{effective_stats, skill_power_multiplier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hp pool for a participant: a fixed base plus grip scaling.
pub const BATTLE_BASE_HP: u32 = 500;
pub const HP_PER_GRIP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Stun,
    Buff,
    Debuff,
    Dot,
}

/// Which stat a buff or debuff moves. DamageReduction is the timed defense
/// shield applied by defense skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffStat {
    Power,
    Speed,
    Grip,
    DamageReduction,
}

/// A timed status effect on a participant. Duration is decremented at the
/// end of each round and the effect is removed at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub name: String,
    pub duration: u32,
    /// Damage per turn for dots, stat delta for buffs/debuffs, counter
    /// damage for the counter-ready marker.
    pub value: i32,
    pub stat: Option<BuffStat>,
}

/// Temporary additive stat deltas from active buffs/debuffs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffedStats {
    pub power: i32,
    pub speed: i32,
    pub grip: i32,
}

/// An ephemeral battle actor. Constructed at battle start from an owned
/// creature (or NPC-generated), mutated through the battle, and discarded
/// afterwards — only the reward record survives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleParticipant {
    pub id: u32,
    pub name: String,
    pub definition_id: u32,
    pub element: Element,
    pub skill_ids: Vec<u32>,
    /// Progression-scaled stats, fixed for the battle.
    pub stats: Stats,
    pub skill_multiplier: f64,
    pub max_hp: u32,
    pub hp: u32,
    pub prev_hp: u32,
    pub is_npc: bool,
    pub is_eliminated: bool,
    pub team: Option<u8>,
    /// Remaining cooldown turns per skill id.
    pub cooldowns: HashMap<u32, u32>,
    pub status_effects: Vec<StatusEffect>,
    pub buffed_stats: BuffedStats,
}

impl BattleParticipant {
    /// Builds a participant from an owned creature.
    pub fn from_collected(
        id: u32,
        name: String,
        creature: &CollectedCreature,
        is_npc: bool,
        team: Option<u8>,
    ) -> Option<Self> {
        let def = creature.definition()?;
        let stats = effective_stats(creature);
        let multiplier = skill_power_multiplier(creature);
        Some(Self::from_parts(id, name, &def, stats, multiplier, is_npc, team))
    }

    /// Builds a participant directly from a definition with scaled stats
    /// (NPC generation path).
    pub fn from_definition(
        id: u32,
        name: String,
        def: &CreatureDefinition,
        stats: Stats,
        skill_multiplier: f64,
        is_npc: bool,
        team: Option<u8>,
    ) -> Self {
        Self::from_parts(id, name, def, stats, skill_multiplier, is_npc, team)
    }

    fn from_parts(
        id: u32,
        name: String,
        def: &CreatureDefinition,
        stats: Stats,
        skill_multiplier: f64,
        is_npc: bool,
        team: Option<u8>,
    ) -> Self {
        let max_hp = BATTLE_BASE_HP + stats.grip * HP_PER_GRIP;
        Self {
            id,
            name,
            definition_id: def.id,
            element: def.element,
            skill_ids: def.skill_ids.clone(),
            stats,
            skill_multiplier,
            max_hp,
            hp: max_hp,
            prev_hp: max_hp,
            is_npc,
            is_eliminated: false,
            team,
            cooldowns: HashMap::new(),
            status_effects: Vec::new(),
            buffed_stats: BuffedStats::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_eliminated
    }

    /// Power total feeding the damage formula.
    pub fn attack_power(&self) -> i32 {
        self.stats.power as i32 + self.buffed_stats.power
    }

    /// Speed total used for turn ordering.
    pub fn current_speed(&self) -> i32 {
        self.stats.speed as i32 + self.buffed_stats.speed
    }

    pub fn is_stunned(&self) -> bool {
        self.status_effects
            .iter()
            .any(|e| e.kind == StatusKind::Stun)
    }

    /// Strongest active damage-reduction percentage.
    pub fn defense_reduction(&self) -> u32 {
        self.status_effects
            .iter()
            .filter(|e| e.stat == Some(BuffStat::DamageReduction))
            .map(|e| e.value.max(0) as u32)
            .max()
            .unwrap_or(0)
    }

    pub fn has_status(&self, name: &str) -> bool {
        self.status_effects.iter().any(|e| e.name == name)
    }

    /// True when the skill is known and not cooling down.
    pub fn can_use_skill(&self, skill_id: u32) -> bool {
        self.skill_ids.contains(&skill_id)
            && self.cooldowns.get(&skill_id).copied().unwrap_or(0) == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.prev_hp = self.hp;
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.prev_hp = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Applies a status effect, folding buff/debuff deltas into the
    /// temporary stat block.
    pub fn apply_status(&mut self, effect: StatusEffect) {
        if matches!(effect.kind, StatusKind::Buff | StatusKind::Debuff) {
            match effect.stat {
                Some(BuffStat::Power) => self.buffed_stats.power += effect.value,
                Some(BuffStat::Speed) => self.buffed_stats.speed += effect.value,
                Some(BuffStat::Grip) => self.buffed_stats.grip += effect.value,
                _ => {}
            }
        }
        self.status_effects.push(effect);
    }

    /// Removes a status effect by list index, reverting its stat delta.
    pub fn remove_status(&mut self, index: usize) -> StatusEffect {
        let effect = self.status_effects.remove(index);
        if matches!(effect.kind, StatusKind::Buff | StatusKind::Debuff) {
            match effect.stat {
                Some(BuffStat::Power) => self.buffed_stats.power -= effect.value,
                Some(BuffStat::Speed) => self.buffed_stats.speed -= effect.value,
                Some(BuffStat::Grip) => self.buffed_stats.grip -= effect.value,
                _ => {}
            }
        }
        effect
    }

    /// Looks up a known skill in the catalog.
    pub fn skill(&self, skill_id: u32) -> Option<crate::catalog::types::Skill> {
        if self.skill_ids.contains(&skill_id) {
            catalog::find_skill(skill_id)
        } else {
            None
        }
    }
}

/// Why a submitted action was rejected. Rejections never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    BattleOver,
    ActorEliminated,
    SkillNotKnown,
    SkillOnCooldown,
    MissingTarget,
    InvalidTarget,
    TooManyTargets,
}

/// High-level battle lifecycle. `Spectating` covers the FFA case where the
/// human is out but the simulation runs on for the placement screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    InProgress,
    Spectating,
    Finished,
}

/// Structured entries appended during resolution; the presentation layer
/// renders these however it likes.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    SkillUsed {
        actor: u32,
        skill_id: u32,
        skill_name: String,
    },
    DamageDealt {
        attacker: u32,
        target: u32,
        amount: u32,
    },
    GuardTriggered {
        target: u32,
        attacker: u32,
        counter_damage: u32,
    },
    Healed {
        target: u32,
        amount: u32,
    },
    StatusApplied {
        target: u32,
        name: String,
        duration: u32,
    },
    StatusExpired {
        target: u32,
        name: String,
    },
    DotTick {
        target: u32,
        name: String,
        amount: u32,
    },
    StunnedSkip {
        actor: u32,
    },
    Eliminated {
        participant: u32,
    },
    TeamEliminated {
        team: u8,
    },
    RoundCompleted {
        round: u32,
    },
}

/// The action a player submits for their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub skill_id: u32,
    pub target_ids: Vec<u32>,
}
