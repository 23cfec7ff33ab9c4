//! Boss raid: a five-member party against one boss with a large fixed hp
//! pool. One party member acts per round, the boss answers, and maintenance
//! runs. Victory pays a fixed reward plus one guaranteed rare-or-better
//! creature, claimable exactly once.

use crate::catalog;
use crate::catalog::types::Rarity;
use crate::collection::add_copy;
use crate::combat::engine::BattleCore;
use crate::combat::npc::{generate_npc, npc_take_turn};
use crate::combat::types::{ActionError, BattleParticipant, BattlePhase, PlayerAction};
use crate::core::balance::{RAID_BOSS_HP, RAID_COIN_REWARD, RAID_EXP_REWARD};
use crate::core::constants::RAID_PARTY_SIZE;
use crate::core::game_state::GameState;
use crate::progression::grant_exp;
use crate::rank::RankInfo;
use rand::Rng;

pub const PLAYER_ID: u32 = 1;
pub const BOSS_ID: u32 = 99;

const PARTY_TEAM: u8 = 0;
const BOSS_TEAM: u8 = 1;

/// What a claimed raid victory actually granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidRewards {
    pub coins: u64,
    pub exp: u32,
    pub levels_gained: u32,
    /// The guaranteed rare-or-better grant.
    pub creature_definition_id: u32,
}

#[derive(Debug, Clone)]
pub struct RaidBattle {
    pub core: BattleCore,
    pub phase: BattlePhase,
    /// Rotation cursor over party seats.
    next_seat: usize,
    victory: bool,
    reward_claimed: bool,
}

impl RaidBattle {
    /// Seats the player's participant first, pads the party to five with
    /// rank-scaled allies, and rolls a boss from the boss-exclusive pool.
    pub fn new(mut player: BattleParticipant, rank: &RankInfo, rng: &mut impl Rng) -> Self {
        player.id = PLAYER_ID;
        player.team = Some(PARTY_TEAM);
        let mut participants = vec![player];
        for id in 2..=RAID_PARTY_SIZE as u32 {
            participants.push(generate_npc(id, rank, 1.0, Some(PARTY_TEAM), rng));
        }

        let bosses = catalog::raid_bosses();
        let def = bosses[rng.gen_range(0..bosses.len())].clone();
        let mut boss = BattleParticipant::from_definition(
            BOSS_ID,
            def.name.to_string(),
            &def,
            def.base_stats,
            1.0,
            true,
            Some(BOSS_TEAM),
        );
        boss.max_hp = RAID_BOSS_HP;
        boss.hp = RAID_BOSS_HP;
        boss.prev_hp = RAID_BOSS_HP;
        participants.push(boss);

        Self {
            core: BattleCore::new(participants),
            phase: BattlePhase::InProgress,
            next_seat: 0,
            victory: false,
            reward_claimed: false,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.phase == BattlePhase::Finished && self.victory
    }

    pub fn boss_hp(&self) -> u32 {
        self.core.participant(BOSS_ID).map(|b| b.hp).unwrap_or(0)
    }

    fn party_ids(&self) -> Vec<u32> {
        (1..=RAID_PARTY_SIZE as u32).collect()
    }

    fn party_alive(&self) -> bool {
        self.party_ids()
            .iter()
            .any(|id| self.core.participant(*id).map(|p| p.is_alive()) == Some(true))
    }

    /// The party member whose turn the next round is, skipping the fallen.
    pub fn active_member(&self) -> Option<u32> {
        let ids = self.party_ids();
        for offset in 0..ids.len() {
            let id = ids[(self.next_seat + offset) % ids.len()];
            if self.core.participant(id).map(|p| p.is_alive()) == Some(true) {
                return Some(id);
            }
        }
        None
    }

    /// Runs one raid round: the active member acts, then the boss, then
    /// maintenance. When the active member is the player, `action` follows
    /// the usual contract (required unless nothing is usable).
    pub fn play_round(
        &mut self,
        action: Option<&PlayerAction>,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if self.phase == BattlePhase::Finished {
            return Err(ActionError::BattleOver);
        }
        let active = match self.active_member() {
            Some(id) => id,
            None => return Err(ActionError::BattleOver),
        };

        if active == PLAYER_ID {
            match action {
                Some(action) => {
                    self.core
                        .validate_action(PLAYER_ID, action.skill_id, &action.target_ids)?;
                    let _ = self
                        .core
                        .execute_action(PLAYER_ID, action.skill_id, &action.target_ids, rng);
                }
                None => {
                    if self.core.has_usable_move(PLAYER_ID) {
                        return Err(ActionError::MissingTarget);
                    }
                }
            }
        } else {
            npc_take_turn(&mut self.core, active, rng);
        }

        // Boss answers after the active member, cooldowns permitting.
        if self.core.participant(BOSS_ID).map(|b| b.is_alive()) == Some(true) {
            npc_take_turn(&mut self.core, BOSS_ID, rng);
        }

        self.core.end_of_turn();

        let ids = self.party_ids();
        self.next_seat = ids
            .iter()
            .position(|id| *id == active)
            .map(|i| (i + 1) % ids.len())
            .unwrap_or(0);

        self.update_phase();
        Ok(())
    }

    fn update_phase(&mut self) {
        let boss_alive = self.core.participant(BOSS_ID).map(|b| b.is_alive()) == Some(true);
        if !boss_alive {
            self.victory = true;
            self.phase = BattlePhase::Finished;
        } else if !self.party_alive() {
            self.victory = false;
            self.phase = BattlePhase::Finished;
        } else if self.core.participant(PLAYER_ID).map(|p| p.is_alive()) != Some(true) {
            self.phase = BattlePhase::Spectating;
        }
    }

    /// Commits the victory reward: fixed coins, exp to the given creature,
    /// and one guaranteed rare-or-better grant. Returns None on defeat, an
    /// unfinished raid, or a second claim.
    pub fn claim_rewards(
        &mut self,
        state: &mut GameState,
        exp_target_id: Option<u32>,
        rng: &mut impl Rng,
    ) -> Option<RaidRewards> {
        if !self.is_victory() || self.reward_claimed {
            return None;
        }
        self.reward_claimed = true;

        let pool: Vec<u32> = catalog::all()
            .into_iter()
            .filter(|d| !d.boss_exclusive && d.rarity.index() >= Rarity::Rare.index())
            .map(|d| d.id)
            .collect();
        let granted_id = pool[rng.gen_range(0..pool.len())];
        add_copy(&mut state.collection, granted_id);

        state.add_coins(RAID_COIN_REWARD);
        let mut levels_gained = 0;
        if let Some(target_id) = exp_target_id {
            if let Some(creature) =
                crate::collection::find_in_collection_mut(&mut state.collection, target_id)
            {
                levels_gained = grant_exp(creature, RAID_EXP_REWARD);
            }
        }

        Some(RaidRewards {
            coins: RAID_COIN_REWARD,
            exp: RAID_EXP_REWARD,
            levels_gained,
            creature_definition_id: granted_id,
        })
    }
}
