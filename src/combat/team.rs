//! Four-team battle royale. Three creatures per team; the human controls
//! one member of team 0 and everything else runs on auto-selection.

use crate::combat::engine::BattleCore;
use crate::combat::npc::{generate_npc, npc_take_turn};
use crate::combat::types::{
    ActionError, BattleEvent, BattleParticipant, BattlePhase, PlayerAction,
};
use crate::core::balance::{placement_coins, placement_exp};
use crate::core::constants::{TEAM_COUNT, TEAM_SIZE};
use crate::core::game_state::RankMode;
use crate::core::rewards::BattleRewards;
use crate::rank::{RankInfo, RankOutcome};
use rand::Rng;

pub const PLAYER_ID: u32 = 1;
pub const PLAYER_TEAM: u8 = 0;

#[derive(Debug, Clone)]
pub struct TeamBattle {
    pub core: BattleCore,
    pub phase: BattlePhase,
    winner_team: Option<u8>,
}

impl TeamBattle {
    /// Seats the player on team 0 with two generated allies, against three
    /// full NPC teams.
    pub fn new(mut player: BattleParticipant, rank: &RankInfo, rng: &mut impl Rng) -> Self {
        player.id = PLAYER_ID;
        player.team = Some(PLAYER_TEAM);
        let mut participants = vec![player];
        let mut next_id = PLAYER_ID + 1;
        for team in 0..TEAM_COUNT as u8 {
            let seats = if team == PLAYER_TEAM { TEAM_SIZE - 1 } else { TEAM_SIZE };
            for _ in 0..seats {
                participants.push(generate_npc(next_id, rank, 1.0, Some(team), rng));
                next_id += 1;
            }
        }
        Self {
            core: BattleCore::new(participants),
            phase: BattlePhase::InProgress,
            winner_team: None,
        }
    }

    pub fn winner_team(&self) -> Option<u8> {
        self.winner_team
    }

    fn player_alive(&self) -> bool {
        self.core
            .participant(PLAYER_ID)
            .map(|p| p.is_alive())
            .unwrap_or(false)
    }

    fn living_teams(&self) -> Vec<u8> {
        let mut teams: Vec<u8> = self
            .core
            .participants
            .iter()
            .filter(|p| p.is_alive())
            .filter_map(|p| p.team)
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }

    /// Teams in the order they were wiped out.
    pub fn team_elimination_order(&self) -> Vec<u8> {
        self.core
            .log
            .iter()
            .filter_map(|e| match e {
                BattleEvent::TeamEliminated { team } => Some(*team),
                _ => None,
            })
            .collect()
    }

    /// Runs one full round; same action contract as the solo royale.
    pub fn play_round(
        &mut self,
        action: Option<&PlayerAction>,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if self.phase == BattlePhase::Finished {
            return Err(ActionError::BattleOver);
        }

        let player_acts = self.phase == BattlePhase::InProgress && self.player_alive();
        if player_acts {
            match action {
                Some(action) => {
                    self.core
                        .validate_action(PLAYER_ID, action.skill_id, &action.target_ids)?;
                }
                None => {
                    if self.core.has_usable_move(PLAYER_ID) {
                        return Err(ActionError::MissingTarget);
                    }
                }
            }
        }

        for actor_id in self.core.turn_order() {
            if self.core.participant(actor_id).map(|p| p.is_alive()) != Some(true) {
                continue;
            }
            if actor_id == PLAYER_ID && player_acts {
                if let Some(action) = action {
                    let _ = self
                        .core
                        .execute_action(PLAYER_ID, action.skill_id, &action.target_ids, rng);
                }
            } else if actor_id != PLAYER_ID {
                npc_take_turn(&mut self.core, actor_id, rng);
            }
            if self.living_teams().len() <= 1 {
                break;
            }
        }

        self.core.end_of_turn();
        self.update_phase();
        Ok(())
    }

    /// Simulates remaining rounds to a winning team.
    pub fn run_to_completion(&mut self, rng: &mut impl Rng) {
        for _ in 0..500 {
            if self.phase == BattlePhase::Finished {
                return;
            }
            if self.play_round(None, rng).is_err() {
                break;
            }
        }
        if self.phase != BattlePhase::Finished {
            // Stalemate cutoff: the team with the most remaining hp takes it.
            let mut totals = vec![0u64; TEAM_COUNT];
            for p in self.core.participants.iter().filter(|p| p.is_alive()) {
                if let Some(t) = p.team {
                    totals[t as usize] += p.hp as u64;
                }
            }
            self.winner_team = totals
                .iter()
                .enumerate()
                .max_by_key(|&(t, &hp)| (hp, std::cmp::Reverse(t)))
                .map(|(t, _)| t as u8);
            self.phase = BattlePhase::Finished;
        }
    }

    fn update_phase(&mut self) {
        let living = self.living_teams();
        if living.len() <= 1 {
            self.winner_team = living.first().copied();
            self.phase = BattlePhase::Finished;
        } else if !self.player_alive() {
            self.phase = BattlePhase::Spectating;
        }
    }

    /// Final placement for a team.
    pub fn placement_of_team(&self, team: u8) -> Option<u32> {
        if self.winner_team == Some(team) {
            return Some(1);
        }
        self.team_elimination_order()
            .iter()
            .position(|t| *t == team)
            .map(|idx| (TEAM_COUNT - idx) as u32)
    }

    /// Reward record for the human, from their team's placement.
    pub fn rewards(&self, exp_target_id: Option<u32>) -> Option<BattleRewards> {
        if self.phase != BattlePhase::Finished {
            return None;
        }
        let placement = self.placement_of_team(PLAYER_TEAM)?;
        Some(BattleRewards {
            mode: RankMode::TeamRoyale,
            outcome: RankOutcome::Placement(placement),
            base_coins: placement_coins(placement),
            exp: placement_exp(placement),
            exp_target_id,
        })
    }
}
