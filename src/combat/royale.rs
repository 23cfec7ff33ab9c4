//! Eight-participant free-for-all battle royale.
//!
//! The human controls one participant; the other seven are rank-scaled NPCs
//! on auto-selection. Rounds run in speed order. When the human falls, the
//! battle enters a spectate phase and the simulation carries on to a winner.

use crate::combat::engine::BattleCore;
use crate::combat::npc::{generate_npc, npc_take_turn};
use crate::combat::types::{ActionError, BattleParticipant, BattlePhase, PlayerAction};
use crate::core::balance::{placement_coins, placement_exp};
use crate::core::constants::ROYALE_PARTICIPANTS;
use crate::core::game_state::RankMode;
use crate::core::rewards::BattleRewards;
use crate::rank::{RankInfo, RankOutcome};
use rand::Rng;

pub const PLAYER_ID: u32 = 1;

#[derive(Debug, Clone)]
pub struct RoyaleBattle {
    pub core: BattleCore,
    pub phase: BattlePhase,
    winner: Option<u32>,
}

impl RoyaleBattle {
    /// Seats the player's participant against seven generated opponents.
    /// The player's id is reassigned to `PLAYER_ID`.
    pub fn new(mut player: BattleParticipant, rank: &RankInfo, rng: &mut impl Rng) -> Self {
        player.id = PLAYER_ID;
        player.team = None;
        let mut participants = vec![player];
        for id in 2..=ROYALE_PARTICIPANTS as u32 {
            participants.push(generate_npc(id, rank, 1.0, None, rng));
        }
        Self {
            core: BattleCore::new(participants),
            phase: BattlePhase::InProgress,
            winner: None,
        }
    }

    pub fn winner(&self) -> Option<u32> {
        self.winner
    }

    fn player_alive(&self) -> bool {
        self.core
            .participant(PLAYER_ID)
            .map(|p| p.is_alive())
            .unwrap_or(false)
    }

    /// Runs one full round. While the player lives, `action` is required and
    /// validated up front; a rejected action returns the error with the
    /// round untouched. During spectate the action is ignored.
    pub fn play_round(
        &mut self,
        action: Option<&PlayerAction>,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if self.phase == BattlePhase::Finished {
            return Err(ActionError::BattleOver);
        }

        // While the player lives an action is required, except when every
        // skill is cooling down or the player is stunned; that round may be
        // passed with None.
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
            // Earlier actors this round may have eliminated this one.
            if self.core.participant(actor_id).map(|p| p.is_alive()) != Some(true) {
                continue;
            }
            if actor_id == PLAYER_ID && player_acts {
                if let Some(action) = action {
                    // The pre-validated target may have fallen earlier in
                    // the round; the turn is forfeited in that case.
                    let _ = self
                        .core
                        .execute_action(PLAYER_ID, action.skill_id, &action.target_ids, rng);
                }
            } else if actor_id != PLAYER_ID {
                npc_take_turn(&mut self.core, actor_id, rng);
            }
            if self.core.living_count() <= 1 {
                break;
            }
        }

        self.core.end_of_turn();
        self.update_phase();
        Ok(())
    }

    /// Spectate helper: simulates remaining rounds until a winner stands.
    pub fn run_to_completion(&mut self, rng: &mut impl Rng) {
        // Bounded so a pathological stalemate cannot spin forever.
        for _ in 0..500 {
            if self.phase == BattlePhase::Finished {
                return;
            }
            if self.play_round(None, rng).is_err() {
                break;
            }
        }
        // Stalemate cutoff: highest remaining hp takes it.
        if self.phase != BattlePhase::Finished {
            self.winner = self
                .core
                .participants
                .iter()
                .filter(|p| p.is_alive())
                .max_by_key(|p| (p.hp, std::cmp::Reverse(p.id)))
                .map(|p| p.id);
            self.phase = BattlePhase::Finished;
        }
    }

    fn update_phase(&mut self) {
        if self.core.living_count() <= 1 {
            self.winner = self
                .core
                .participants
                .iter()
                .find(|p| p.is_alive())
                .map(|p| p.id);
            self.phase = BattlePhase::Finished;
        } else if !self.player_alive() {
            self.phase = BattlePhase::Spectating;
        }
    }

    /// Final placement for a participant: the winner places 1st, the first
    /// eliminated places last.
    pub fn placement_of(&self, id: u32) -> Option<u32> {
        if self.winner == Some(id) {
            return Some(1);
        }
        self.core
            .elimination_order
            .iter()
            .position(|e| *e == id)
            .map(|idx| (ROYALE_PARTICIPANTS - idx) as u32)
    }

    /// Reward record for the human participant; None until finished.
    pub fn rewards(&self, exp_target_id: Option<u32>) -> Option<BattleRewards> {
        if self.phase != BattlePhase::Finished {
            return None;
        }
        let placement = self.placement_of(PLAYER_ID)?;
        Some(BattleRewards {
            mode: RankMode::Royale,
            outcome: RankOutcome::Placement(placement),
            base_coins: placement_coins(placement),
            exp: placement_exp(placement),
            exp_target_id,
        })
    }
}
