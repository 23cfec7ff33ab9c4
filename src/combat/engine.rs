//! Shared turn-resolution machinery for every skill-based battle mode.
//!
//! `BattleCore` owns the participant list, the event log, and the
//! elimination order. Mode drivers (royale/team/boss) decide turn
//! orchestration and win conditions; everything about executing a single
//! action and the end-of-round maintenance lives here.

use crate::catalog::types::{Element, Skill};
use crate::combat::effects::{effect_for, target_policy, SkillEffect, TargetPolicy};
use crate::combat::types::{
    ActionError, BattleEvent, BattleParticipant, BuffStat, StatusEffect, StatusKind,
};
use crate::core::balance::{
    ELEMENT_ADVANTAGE, ELEMENT_DISADVANTAGE, JITTER_BASE, JITTER_SPREAD,
};
use crate::core::constants::{COUNTER_READY_NAME, PERFECT_GUARD_NAME};
use rand::Rng;

/// Elemental modifier from the attacker's element against the defender's.
///
/// Directed triangle fire>wind>water>fire, mutual light/dark advantage,
/// and divine strong against the triangle but weak against light/dark.
pub fn element_modifier(attacker: Element, defender: Element) -> f64 {
    use Element::*;
    match (attacker, defender) {
        (Fire, Wind) | (Water, Fire) | (Wind, Water) => ELEMENT_ADVANTAGE,
        (Wind, Fire) | (Fire, Water) | (Water, Wind) => ELEMENT_DISADVANTAGE,
        // Light and dark are advantaged against each other in both
        // directions (intentional asymmetry vs. the triangle).
        (Light, Dark) | (Dark, Light) => ELEMENT_ADVANTAGE,
        (Divine, Fire) | (Divine, Water) | (Divine, Wind) => ELEMENT_ADVANTAGE,
        (Fire, Divine) | (Water, Divine) | (Wind, Divine) => ELEMENT_DISADVANTAGE,
        (Divine, Light) | (Divine, Dark) => ELEMENT_DISADVANTAGE,
        (Light, Divine) | (Dark, Divine) => ELEMENT_ADVANTAGE,
        _ => 1.0,
    }
}

/// Base damage product: skill damage, skill power multiplier, power
/// contribution, elemental modifier, and jitter — floored once.
pub fn compute_skill_damage(
    skill_damage: u32,
    skill_multiplier: f64,
    attack_power: i32,
    element_mod: f64,
    jitter: f64,
) -> u32 {
    let power_factor = 1.0 + attack_power.max(0) as f64 / 100.0;
    (skill_damage as f64 * skill_multiplier * power_factor * element_mod * jitter).floor() as u32
}

/// Applies a defense reduction percentage to an already-computed damage
/// value. Ordering is fixed: elemental modifier first, reduction second.
pub fn apply_defense_reduction(damage: u32, reduction_percent: u32) -> u32 {
    (damage as f64 * (1.0 - reduction_percent.min(100) as f64 / 100.0)).floor() as u32
}

/// Shared battle state for skill-based modes.
#[derive(Debug, Clone)]
pub struct BattleCore {
    pub participants: Vec<BattleParticipant>,
    pub round: u32,
    pub log: Vec<BattleEvent>,
    /// Participant ids in the order they were eliminated.
    pub elimination_order: Vec<u32>,
}

impl BattleCore {
    pub fn new(participants: Vec<BattleParticipant>) -> Self {
        Self {
            participants,
            round: 1,
            log: Vec::new(),
            elimination_order: Vec::new(),
        }
    }

    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    pub fn participant(&self, id: u32) -> Option<&BattleParticipant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: u32) -> Option<&mut BattleParticipant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    pub fn living_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_alive()).count()
    }

    /// Living participant ids in action order: fastest first, id breaking
    /// ties.
    pub fn turn_order(&self) -> Vec<u32> {
        let mut living: Vec<&BattleParticipant> =
            self.participants.iter().filter(|p| p.is_alive()).collect();
        living.sort_by(|a, b| {
            b.current_speed()
                .cmp(&a.current_speed())
                .then(a.id.cmp(&b.id))
        });
        living.into_iter().map(|p| p.id).collect()
    }

    /// True when the two participants can damage each other.
    fn is_enemy(&self, a: u32, b: u32) -> bool {
        if a == b {
            return false;
        }
        let (pa, pb) = match (self.participant(a), self.participant(b)) {
            (Some(pa), Some(pb)) => (pa, pb),
            _ => return false,
        };
        match (pa.team, pb.team) {
            (Some(ta), Some(tb)) => ta != tb,
            _ => true,
        }
    }

    /// Living enemies of the given participant.
    pub fn living_enemies_of(&self, id: u32) -> Vec<u32> {
        self.participants
            .iter()
            .filter(|p| p.is_alive() && self.is_enemy(id, p.id))
            .map(|p| p.id)
            .collect()
    }

    /// True when the participant has at least one skill it could legally
    /// use right now. False means the turn can only be passed.
    pub fn has_usable_move(&self, id: u32) -> bool {
        let p = match self.participant(id) {
            Some(p) if p.is_alive() => p,
            _ => return false,
        };
        if p.is_stunned() {
            return false;
        }
        let has_enemy = !self.living_enemies_of(id).is_empty();
        p.skill_ids.iter().any(|skill_id| {
            if !p.can_use_skill(*skill_id) {
                return false;
            }
            match crate::catalog::find_skill(*skill_id).map(|s| target_policy(&effect_for(&s))) {
                Some(TargetPolicy::None) => true,
                Some(_) => has_enemy,
                None => false,
            }
        })
    }

    /// Validates an action without mutating anything. A stunned actor
    /// validates successfully — the stun is resolved as a skip in
    /// `execute_action`.
    pub fn validate_action(
        &self,
        actor_id: u32,
        skill_id: u32,
        targets: &[u32],
    ) -> Result<Skill, ActionError> {
        let actor = self
            .participant(actor_id)
            .ok_or(ActionError::ActorEliminated)?;
        if !actor.is_alive() {
            return Err(ActionError::ActorEliminated);
        }

        let skill = actor.skill(skill_id).ok_or(ActionError::SkillNotKnown)?;

        if actor.is_stunned() {
            // The turn will be skipped; target selection is irrelevant.
            return Ok(skill);
        }

        if !actor.can_use_skill(skill_id) {
            return Err(ActionError::SkillOnCooldown);
        }

        let effect = effect_for(&skill);
        match target_policy(&effect) {
            TargetPolicy::Single => {
                if targets.len() != 1 {
                    return Err(if targets.is_empty() {
                        ActionError::MissingTarget
                    } else {
                        ActionError::TooManyTargets
                    });
                }
                self.check_enemy_target(actor_id, targets[0])?;
            }
            TargetPolicy::UpTo(cap) => {
                if targets.is_empty() {
                    return Err(ActionError::MissingTarget);
                }
                if targets.len() as u32 > cap {
                    return Err(ActionError::TooManyTargets);
                }
                for (i, t) in targets.iter().enumerate() {
                    if targets[..i].contains(t) {
                        return Err(ActionError::InvalidTarget);
                    }
                    self.check_enemy_target(actor_id, *t)?;
                }
            }
            TargetPolicy::None => {
                if !targets.is_empty() {
                    return Err(ActionError::InvalidTarget);
                }
            }
        }

        Ok(skill)
    }

    fn check_enemy_target(&self, actor_id: u32, target_id: u32) -> Result<(), ActionError> {
        let target = self
            .participant(target_id)
            .ok_or(ActionError::InvalidTarget)?;
        if !target.is_alive() {
            return Err(ActionError::InvalidTarget);
        }
        if !self.is_enemy(actor_id, target_id) {
            return Err(ActionError::InvalidTarget);
        }
        Ok(())
    }

    /// Executes one validated action. Returns Ok(false) when the actor was
    /// stunned and the turn was skipped. The cooldown is committed only on
    /// actual execution.
    pub fn execute_action(
        &mut self,
        actor_id: u32,
        skill_id: u32,
        targets: &[u32],
        rng: &mut impl Rng,
    ) -> Result<bool, ActionError> {
        let skill = self.validate_action(actor_id, skill_id, targets)?;

        {
            let actor = self.participant(actor_id).ok_or(ActionError::ActorEliminated)?;
            if actor.is_stunned() {
                self.log.push(BattleEvent::StunnedSkip { actor: actor_id });
                return Ok(false);
            }
        }

        self.log.push(BattleEvent::SkillUsed {
            actor: actor_id,
            skill_id,
            skill_name: skill.name.to_string(),
        });

        let effect = effect_for(&skill);
        match effect {
            SkillEffect::Attack => {
                self.deal_damage(actor_id, targets[0], &skill, rng);
            }
            SkillEffect::Aoe { .. } => {
                for target in targets {
                    // Earlier hits in the sweep may have eliminated a target.
                    if self.participant(*target).map(|p| p.is_alive()) == Some(true) {
                        self.deal_damage(actor_id, *target, &skill, rng);
                    }
                }
            }
            SkillEffect::DotHit { payload } => {
                let landed = self.deal_damage(actor_id, targets[0], &skill, rng);
                if landed {
                    self.apply_dot(targets[0], payload.name, payload.damage, payload.duration);
                }
            }
            SkillEffect::DefenseBuff {
                reduction,
                duration,
            } => {
                self.apply_to(
                    actor_id,
                    StatusEffect {
                        kind: StatusKind::Buff,
                        name: skill.name.to_string(),
                        duration,
                        value: reduction as i32,
                        stat: Some(BuffStat::DamageReduction),
                    },
                );
            }
            SkillEffect::TeamHeal { fraction } => {
                self.team_heal(actor_id, fraction);
            }
            SkillEffect::SelfHeal { fraction } => {
                if let Some(actor) = self.participant_mut(actor_id) {
                    let amount = (actor.max_hp as f64 * fraction) as u32;
                    actor.heal(amount);
                    self.log.push(BattleEvent::Healed {
                        target: actor_id,
                        amount,
                    });
                }
            }
            SkillEffect::StatBuff {
                stat,
                amount,
                duration,
            } => {
                self.apply_to(
                    actor_id,
                    StatusEffect {
                        kind: StatusKind::Buff,
                        name: skill.name.to_string(),
                        duration,
                        value: amount,
                        stat: Some(stat),
                    },
                );
            }
            SkillEffect::Stun { duration } => {
                let multiplier = self
                    .participant(actor_id)
                    .map(|p| p.skill_multiplier)
                    .unwrap_or(1.0);
                let scaled = ((duration as f64 * multiplier).floor() as u32).max(1);
                self.apply_to(
                    targets[0],
                    StatusEffect {
                        kind: StatusKind::Stun,
                        name: skill.name.to_string(),
                        duration: scaled,
                        value: 0,
                        stat: None,
                    },
                );
            }
            SkillEffect::MultiDot {
                name,
                damage,
                duration,
                ..
            } => {
                for target in targets {
                    self.apply_dot(*target, name, damage, duration);
                }
            }
            SkillEffect::InstantKill => {
                self.instant_kill(actor_id, targets[0]);
            }
            SkillEffect::PerfectGuard { counter } => {
                self.apply_to(
                    actor_id,
                    StatusEffect {
                        kind: StatusKind::Buff,
                        name: PERFECT_GUARD_NAME.to_string(),
                        duration: 2,
                        value: 0,
                        stat: None,
                    },
                );
                self.apply_to(
                    actor_id,
                    StatusEffect {
                        kind: StatusKind::Buff,
                        name: COUNTER_READY_NAME.to_string(),
                        duration: 2,
                        value: counter as i32,
                        stat: None,
                    },
                );
            }
        }

        if skill.cooldown > 0 {
            if let Some(actor) = self.participant_mut(actor_id) {
                actor.cooldowns.insert(skill.id, skill.cooldown);
            }
        }

        Ok(true)
    }

    /// Computes and applies one damaging hit. Returns false when the hit
    /// was nullified by a perfect guard.
    fn deal_damage(
        &mut self,
        attacker_id: u32,
        target_id: u32,
        skill: &Skill,
        rng: &mut impl Rng,
    ) -> bool {
        if self.try_perfect_guard(attacker_id, target_id) {
            return false;
        }

        let (skill_multiplier, attack_power, attacker_element, is_npc) = {
            let attacker = match self.participant(attacker_id) {
                Some(a) => a,
                None => return false,
            };
            (
                attacker.skill_multiplier,
                attacker.attack_power(),
                attacker.element,
                attacker.is_npc,
            )
        };
        let (target_element, reduction) = {
            let target = match self.participant(target_id) {
                Some(t) => t,
                None => return false,
            };
            (target.element, target.defense_reduction())
        };

        let element_mod = element_modifier(attacker_element, target_element);
        // Player-initiated hits are deterministic; NPC auto-battle jitters.
        let jitter = if is_npc {
            JITTER_BASE + rng.gen::<f64>() * JITTER_SPREAD
        } else {
            1.0
        };

        let base = compute_skill_damage(
            skill.damage,
            skill_multiplier,
            attack_power,
            element_mod,
            jitter,
        );
        let final_damage = apply_defense_reduction(base, reduction);

        if let Some(target) = self.participant_mut(target_id) {
            target.take_damage(final_damage);
        }
        self.log.push(BattleEvent::DamageDealt {
            attacker: attacker_id,
            target: target_id,
            amount: final_damage,
        });
        self.check_elimination(target_id);
        true
    }

    /// Consumes an active perfect guard on the target, nullifying the hit
    /// and reflecting the counter damage onto the attacker. Returns true
    /// when the guard triggered.
    fn try_perfect_guard(&mut self, attacker_id: u32, target_id: u32) -> bool {
        let counter = {
            let target = match self.participant(target_id) {
                Some(t) => t,
                None => return false,
            };
            if !target.has_status(PERFECT_GUARD_NAME) {
                return false;
            }
            target
                .status_effects
                .iter()
                .find(|e| e.name == COUNTER_READY_NAME)
                .map(|e| e.value.max(0) as u32)
        };

        if let Some(target) = self.participant_mut(target_id) {
            // Both the guard and the paired counter marker are single-use.
            while let Some(idx) = target
                .status_effects
                .iter()
                .position(|e| e.name == PERFECT_GUARD_NAME || e.name == COUNTER_READY_NAME)
            {
                target.remove_status(idx);
            }
        }

        let counter_damage = counter.unwrap_or(0);
        self.log.push(BattleEvent::GuardTriggered {
            target: target_id,
            attacker: attacker_id,
            counter_damage,
        });

        if counter_damage > 0 {
            if let Some(attacker) = self.participant_mut(attacker_id) {
                attacker.take_damage(counter_damage);
            }
            self.check_elimination(attacker_id);
        }
        true
    }

    fn instant_kill(&mut self, attacker_id: u32, target_id: u32) {
        if self.try_perfect_guard(attacker_id, target_id) {
            return;
        }
        let hp = match self.participant(target_id) {
            Some(t) => t.hp,
            None => return,
        };
        if let Some(target) = self.participant_mut(target_id) {
            target.take_damage(hp);
        }
        self.log.push(BattleEvent::DamageDealt {
            attacker: attacker_id,
            target: target_id,
            amount: hp,
        });
        self.check_elimination(target_id);
    }

    fn apply_dot(&mut self, target_id: u32, name: &str, damage: u32, duration: u32) {
        self.apply_to(
            target_id,
            StatusEffect {
                kind: StatusKind::Dot,
                name: name.to_string(),
                duration,
                value: damage as i32,
                stat: None,
            },
        );
    }

    fn apply_to(&mut self, target_id: u32, effect: StatusEffect) {
        let (name, duration) = (effect.name.clone(), effect.duration);
        if let Some(target) = self.participant_mut(target_id) {
            target.apply_status(effect);
            self.log.push(BattleEvent::StatusApplied {
                target: target_id,
                name,
                duration,
            });
        }
    }

    /// Heals the actor's living teammates (or the actor alone outside team
    /// modes) by a fraction of each max hp, scaled by skill power.
    fn team_heal(&mut self, actor_id: u32, fraction: f64) {
        let (team, multiplier) = match self.participant(actor_id) {
            Some(actor) => (actor.team, actor.skill_multiplier),
            None => return,
        };

        let recipients: Vec<u32> = match team {
            Some(t) => self
                .participants
                .iter()
                .filter(|p| p.is_alive() && p.team == Some(t))
                .map(|p| p.id)
                .collect(),
            None => vec![actor_id],
        };

        for id in recipients {
            if let Some(p) = self.participant_mut(id) {
                let amount = (p.max_hp as f64 * fraction * multiplier) as u32;
                p.heal(amount);
                self.log.push(BattleEvent::Healed { target: id, amount });
            }
        }
    }

    fn check_elimination(&mut self, id: u32) {
        let newly_down = match self.participant(id) {
            Some(p) => p.hp == 0 && !p.is_eliminated,
            None => false,
        };
        if !newly_down {
            return;
        }

        if let Some(p) = self.participant_mut(id) {
            p.is_eliminated = true;
        }
        self.elimination_order.push(id);
        self.log.push(BattleEvent::Eliminated { participant: id });

        // Team wipe bookkeeping.
        if let Some(team) = self.participant(id).and_then(|p| p.team) {
            let team_alive = self
                .participants
                .iter()
                .any(|p| p.team == Some(team) && p.is_alive());
            if !team_alive {
                self.log.push(BattleEvent::TeamEliminated { team });
            }
        }
    }

    /// End-of-round maintenance for every living participant: dot ticks,
    /// status decay with expiry, and cooldown decrement.
    pub fn end_of_turn(&mut self) {
        let ids: Vec<u32> = self
            .participants
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.id)
            .collect();

        for id in ids {
            // Dot damage first; a dot whose duration hits 0 this round has
            // already dealt its final tick.
            let dots: Vec<(String, u32)> = match self.participant(id) {
                Some(p) => p
                    .status_effects
                    .iter()
                    .filter(|e| e.kind == StatusKind::Dot)
                    .map(|e| (e.name.clone(), e.value.max(0) as u32))
                    .collect(),
                None => continue,
            };
            for (name, damage) in dots {
                if self.participant(id).map(|p| p.is_alive()) != Some(true) {
                    break;
                }
                if let Some(p) = self.participant_mut(id) {
                    p.take_damage(damage);
                }
                self.log.push(BattleEvent::DotTick {
                    target: id,
                    name,
                    amount: damage,
                });
                self.check_elimination(id);
            }

            // Status decay.
            if let Some(p) = self.participant_mut(id) {
                for e in p.status_effects.iter_mut() {
                    e.duration = e.duration.saturating_sub(1);
                }
            }
            loop {
                let expired_idx = match self.participant(id) {
                    Some(p) => p.status_effects.iter().position(|e| e.duration == 0),
                    None => None,
                };
                let idx = match expired_idx {
                    Some(idx) => idx,
                    None => break,
                };
                let name = self
                    .participant_mut(id)
                    .map(|p| p.remove_status(idx).name)
                    .unwrap_or_default();
                self.log.push(BattleEvent::StatusExpired { target: id, name });
            }

            // Cooldowns tick down, floored at 0.
            if let Some(p) = self.participant_mut(id) {
                for remaining in p.cooldowns.values_mut() {
                    *remaining = remaining.saturating_sub(1);
                }
            }
        }

        self.log.push(BattleEvent::RoundCompleted { round: self.round });
        self.round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::catalog::types::Stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn fighter(id: u32, element: Element, power: u32, team: Option<u8>) -> BattleParticipant {
        let def = catalog::find(1).unwrap();
        let mut p = BattleParticipant::from_definition(
            id,
            format!("F{}", id),
            &def,
            Stats {
                power,
                speed: 20 + id,
                grip: 20,
            },
            1.0,
            false,
            team,
        );
        p.element = element;
        // Known skills for tests: plain attack, defense, dot, aoe, stun,
        // guard, heal, instant kill.
        p.skill_ids = vec![1, 3, 4, 7, 5, 13, 9, 19, 20];
        p
    }

    fn duo() -> BattleCore {
        BattleCore::new(vec![
            fighter(1, Element::Fire, 50, None),
            fighter(2, Element::Fire, 30, None),
        ])
    }

    #[test]
    fn test_element_modifier_chart() {
        use Element::*;
        assert!((element_modifier(Fire, Wind) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Wind, Fire) - 0.7).abs() < 1e-9);
        assert!((element_modifier(Water, Fire) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Wind, Water) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Light, Dark) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Dark, Light) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Divine, Fire) - 1.3).abs() < 1e-9);
        assert!((element_modifier(Fire, Divine) - 0.7).abs() < 1e-9);
        assert!((element_modifier(Divine, Light) - 0.7).abs() < 1e-9);
        assert!((element_modifier(Dark, Divine) - 1.3).abs() < 1e-9);
        for e in Element::all() {
            assert!((element_modifier(e, e) - 1.0).abs() < 1e-9, "{:?}", e);
        }
    }

    #[test]
    fn test_damage_formula_reference_case() {
        // Power 50, skill damage 100, neutral matchup, no buffs:
        // floor(100 * 1.5) = 150.
        assert_eq!(compute_skill_damage(100, 1.0, 50, 1.0, 1.0), 150);
    }

    #[test]
    fn test_damage_order_element_then_defense() {
        // Base product 140, disadvantaged 0.7, then 30% reduction: 68.
        let base = compute_skill_damage(140, 1.0, 0, 0.7, 1.0);
        assert_eq!(base, 98);
        assert_eq!(apply_defense_reduction(base, 30), 68);
    }

    #[test]
    fn test_attack_deals_damage_and_sets_cooldown() {
        let mut core = duo();
        let hp_before = core.participant(2).unwrap().hp;

        // Skill 2 is not known; skill 1 (Root Strike, 80 dmg, cd 0) is.
        core.execute_action(1, 1, &[2], &mut rng()).unwrap();

        let target = core.participant(2).unwrap();
        // floor(80 * 1.5) = 120, no jitter for player hits.
        assert_eq!(hp_before - target.hp, 120);
        // Cooldown 0 skills set no cooldown entry.
        assert!(core.participant(1).unwrap().can_use_skill(1));
    }

    #[test]
    fn test_cooldown_blocks_reuse() {
        let mut core = duo();
        core.execute_action(1, 7, &[2], &mut rng()).unwrap(); // Scorch Coil cd 3
        let err = core.validate_action(1, 7, &[2]).unwrap_err();
        assert_eq!(err, ActionError::SkillOnCooldown);
    }

    #[test]
    fn test_rejected_action_consumes_nothing() {
        let mut core = duo();
        // Missing target.
        assert_eq!(
            core.execute_action(1, 1, &[], &mut rng()).unwrap_err(),
            ActionError::MissingTarget
        );
        // Dead target.
        core.participant_mut(2).unwrap().is_eliminated = true;
        assert_eq!(
            core.execute_action(1, 7, &[2], &mut rng()).unwrap_err(),
            ActionError::InvalidTarget
        );
        // No cooldown was spent and no log entry written.
        assert!(core.participant(1).unwrap().cooldowns.is_empty());
        assert!(core.log.is_empty());
    }

    #[test]
    fn test_stunned_actor_skips() {
        let mut core = duo();
        core.apply_to(
            1,
            StatusEffect {
                kind: StatusKind::Stun,
                name: "Binding Coil".to_string(),
                duration: 1,
                value: 0,
                stat: None,
            },
        );
        let hp_before = core.participant(2).unwrap().hp;
        let acted = core.execute_action(1, 1, &[2], &mut rng()).unwrap();
        assert!(!acted);
        assert_eq!(core.participant(2).unwrap().hp, hp_before);
        assert!(core
            .log
            .iter()
            .any(|e| matches!(e, BattleEvent::StunnedSkip { actor: 1 })));
    }

    #[test]
    fn test_defense_buff_reduces_damage() {
        let mut core = duo();
        // Target raises Iron Scalp (35% for 2 turns).
        core.execute_action(2, 4, &[], &mut rng()).unwrap();
        let hp_before = core.participant(2).unwrap().hp;
        core.execute_action(1, 1, &[2], &mut rng()).unwrap();
        // floor(120 * 0.65) = 78.
        assert_eq!(hp_before - core.participant(2).unwrap().hp, 78);
    }

    #[test]
    fn test_dot_ticks_and_expires() {
        let mut core = duo();
        core.execute_action(1, 7, &[2], &mut rng()).unwrap(); // Burn 15 x3
        let hp_after_hit = core.participant(2).unwrap().hp;

        core.end_of_turn();
        assert_eq!(core.participant(2).unwrap().hp, hp_after_hit - 15);
        core.end_of_turn();
        core.end_of_turn();
        assert_eq!(core.participant(2).unwrap().hp, hp_after_hit - 45);
        assert!(!core.participant(2).unwrap().has_status("Burn"));

        // No further ticks after expiry.
        core.end_of_turn();
        assert_eq!(core.participant(2).unwrap().hp, hp_after_hit - 45);
    }

    #[test]
    fn test_buff_expiry_reverts_stats() {
        let mut core = duo();
        core.participant_mut(1).unwrap().skill_ids.push(11);
        core.execute_action(1, 11, &[], &mut rng()).unwrap(); // +20 power, 2 turns
        assert_eq!(core.participant(1).unwrap().buffed_stats.power, 20);
        core.end_of_turn();
        assert_eq!(core.participant(1).unwrap().buffed_stats.power, 20);
        core.end_of_turn();
        assert_eq!(core.participant(1).unwrap().buffed_stats.power, 0);
    }

    #[test]
    fn test_perfect_guard_nullifies_and_counters() {
        let mut core = duo();
        core.execute_action(2, 19, &[], &mut rng()).unwrap(); // All-Father Guard
        let defender_hp = core.participant(2).unwrap().hp;
        let attacker_hp = core.participant(1).unwrap().hp;

        core.execute_action(1, 1, &[2], &mut rng()).unwrap();

        // Hit nullified, counter (200) landed on the attacker.
        assert_eq!(core.participant(2).unwrap().hp, defender_hp);
        assert_eq!(core.participant(1).unwrap().hp, attacker_hp - 200);
        assert!(!core.participant(2).unwrap().has_status(PERFECT_GUARD_NAME));
        assert!(!core.participant(2).unwrap().has_status(COUNTER_READY_NAME));

        // Guard is single-use: the next hit lands.
        let hp_before = core.participant(2).unwrap().hp;
        core.execute_action(1, 1, &[2], &mut rng()).unwrap();
        assert!(core.participant(2).unwrap().hp < hp_before);
    }

    #[test]
    fn test_instant_kill_zeroes_target() {
        let mut core = duo();
        core.execute_action(1, 20, &[2], &mut rng()).unwrap();
        assert_eq!(core.participant(2).unwrap().hp, 0);
        assert!(core.participant(2).unwrap().is_eliminated);
        assert_eq!(core.elimination_order, vec![2]);
    }

    #[test]
    fn test_stun_duration_scales_with_skill_power() {
        let mut core = duo();
        core.participant_mut(1).unwrap().skill_multiplier = 2.0;
        core.execute_action(1, 13, &[2], &mut rng()).unwrap(); // base 1 turn
        let stun = core
            .participant(2)
            .unwrap()
            .status_effects
            .iter()
            .find(|e| e.kind == StatusKind::Stun)
            .unwrap()
            .duration;
        assert_eq!(stun, 2);
    }

    #[test]
    fn test_self_heal_outside_team_mode() {
        let mut core = duo();
        core.participant_mut(1).unwrap().take_damage(300);
        let hp = core.participant(1).unwrap().hp;
        core.execute_action(1, 9, &[], &mut rng()).unwrap(); // Soothing Balm 50%
        let healed = core.participant(1).unwrap().hp - hp;
        let expected = (core.participant(1).unwrap().max_hp as f64 * 0.5) as u32;
        assert_eq!(healed, expected.min(300));
    }

    #[test]
    fn test_turn_order_by_speed() {
        let mut core = BattleCore::new(vec![
            fighter(1, Element::Fire, 10, None),
            fighter(2, Element::Fire, 10, None),
            fighter(3, Element::Fire, 10, None),
        ]);
        // speeds are 21, 22, 23.
        assert_eq!(core.turn_order(), vec![3, 2, 1]);
        core.participant_mut(3).unwrap().is_eliminated = true;
        assert_eq!(core.turn_order(), vec![2, 1]);
    }

    #[test]
    fn test_npc_damage_jittered_within_bounds() {
        let mut core = duo();
        core.participant_mut(1).unwrap().is_npc = true;
        let hp_before = core.participant(2).unwrap().hp;
        let mut r = rng();
        core.execute_action(1, 1, &[2], &mut r).unwrap();
        let dealt = hp_before - core.participant(2).unwrap().hp;
        // floor(120 * [0.8, 1.2)) => 96..=143.
        assert!((96..=143).contains(&dealt), "dealt {}", dealt);
    }

    #[test]
    fn test_team_targeting_rules() {
        let core = BattleCore::new(vec![
            fighter(1, Element::Fire, 10, Some(0)),
            fighter(2, Element::Fire, 10, Some(0)),
            fighter(3, Element::Fire, 10, Some(1)),
        ]);
        // Teammate is not a valid attack target.
        assert_eq!(
            core.validate_action(1, 1, &[2]).unwrap_err(),
            ActionError::InvalidTarget
        );
        assert!(core.validate_action(1, 1, &[3]).is_ok());
        assert_eq!(core.living_enemies_of(1), vec![3]);
    }
}
