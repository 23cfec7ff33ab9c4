//! 1v1 tug-of-war duel.
//!
//! Not a skill battle: a fixed-duration countdown over a pull-progress
//! scalar in [0, 100] starting centered. Player taps pull the marker down,
//! opponent ticks pull it up. The timeout is a deterministic countdown, so
//! the outcome is a pure function of the seed and the tap sequence.

use crate::combat::npc::generate_npc;
use crate::combat::types::BattleParticipant;
use crate::core::balance::{
    DUEL_LOSS_COINS, DUEL_LOSS_EXP, DUEL_LOSS_THRESHOLD, DUEL_PROGRESS_MAX, DUEL_PROGRESS_START,
    DUEL_TICKS, DUEL_WIN_COINS, DUEL_WIN_EXP, DUEL_WIN_THRESHOLD, JITTER_BASE, JITTER_SPREAD,
};
use crate::core::game_state::RankMode;
use crate::core::rewards::BattleRewards;
use crate::rank::{RankInfo, RankOutcome};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone)]
pub struct DuelBattle {
    pub player: BattleParticipant,
    pub opponent: BattleParticipant,
    /// Pull progress in [0, 100]; below center favors the player.
    pub progress: f64,
    pub ticks_remaining: u32,
    tap_count: u32,
    /// Accumulated opponent pull, the NPC side of the tiebreak.
    opponent_contribution: f64,
    outcome: Option<DuelOutcome>,
}

impl DuelBattle {
    pub fn new(player: BattleParticipant, rank: &RankInfo, rng: &mut impl Rng) -> Self {
        let opponent = generate_npc(2, rank, 1.0, None, rng);
        Self {
            player,
            opponent,
            progress: DUEL_PROGRESS_START,
            ticks_remaining: DUEL_TICKS,
            tap_count: 0,
            opponent_contribution: 0.0,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<DuelOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn pull_strength(grip: u32) -> f64 {
        1.0 + grip as f64 / 100.0
    }

    /// One player tap between ticks. Ignored once the countdown has run out.
    pub fn player_tap(&mut self) {
        if self.is_finished() {
            return;
        }
        self.tap_count += 1;
        self.progress =
            (self.progress - Self::pull_strength(self.player.stats.grip)).max(0.0);
    }

    /// One countdown tick: the opponent pulls (jittered) and the clock runs
    /// down. The final tick resolves the duel.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.is_finished() {
            return;
        }
        let jitter = JITTER_BASE + rng.gen::<f64>() * JITTER_SPREAD;
        let pull = Self::pull_strength(self.opponent.stats.grip) * jitter;
        self.opponent_contribution += pull;
        self.progress = (self.progress + pull).min(DUEL_PROGRESS_MAX);

        self.ticks_remaining -= 1;
        if self.ticks_remaining == 0 {
            self.outcome = Some(self.resolve());
        }
    }

    /// Timeout resolution: clear zones first, aggregate strength tiebreak
    /// inside the dead band, exact tie is a draw.
    fn resolve(&self) -> DuelOutcome {
        if self.progress < DUEL_WIN_THRESHOLD {
            return DuelOutcome::Win;
        }
        if self.progress > DUEL_LOSS_THRESHOLD {
            return DuelOutcome::Loss;
        }
        let player_total = self.player.stats.total() as u64 + self.tap_count as u64;
        let opponent_total =
            self.opponent.stats.total() as u64 + self.opponent_contribution.floor() as u64;
        if player_total > opponent_total {
            DuelOutcome::Win
        } else if player_total < opponent_total {
            DuelOutcome::Loss
        } else {
            DuelOutcome::Draw
        }
    }

    /// Reward record for a finished duel; None while still running.
    pub fn rewards(&self, exp_target_id: Option<u32>) -> Option<BattleRewards> {
        let (outcome, base_coins, exp) = match self.outcome? {
            DuelOutcome::Win => (RankOutcome::Win, DUEL_WIN_COINS, DUEL_WIN_EXP),
            DuelOutcome::Loss => (RankOutcome::Loss, DUEL_LOSS_COINS, DUEL_LOSS_EXP),
            DuelOutcome::Draw => (RankOutcome::Draw, DUEL_LOSS_COINS, DUEL_LOSS_EXP),
        };
        Some(BattleRewards {
            mode: RankMode::Duel,
            outcome,
            base_coins,
            exp,
            exp_target_id,
        })
    }
}
