//! Post-battle reward application.
//!
//! A finished battle yields one `BattleRewards` record; applying it mutates
//! coins, creature exp, and rank points as a single visible transition so a
//! caller can never observe coins credited without the rank update.
//! Abandoned battles simply never produce a record.

use super::game_state::{GameState, RankMode};
use crate::collection::find_in_collection_mut;
use crate::progression::grant_exp;
use crate::rank::{
    apply_points_delta, coin_reward_multiplier, points_delta, rank_from_points, RankOutcome,
};

/// Rewards earned by a finished battle. Coin amounts are pre-multiplier;
/// the rank coin multiplier is applied at commit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleRewards {
    pub mode: RankMode,
    pub outcome: RankOutcome,
    pub base_coins: u64,
    pub exp: u32,
    /// Creature the exp goes to (usually the selected creature).
    pub exp_target_id: Option<u32>,
}

/// What a commit actually changed, for the caller's display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedRewards {
    pub coins_granted: u64,
    pub exp_granted: u32,
    pub levels_gained: u32,
    pub rank_points_delta: i32,
    pub new_rank_points: u32,
}

/// Commits a reward record against the game state.
pub fn apply_battle_rewards(state: &mut GameState, rewards: &BattleRewards) -> AppliedRewards {
    let rank = rank_from_points(state.rank_points(rewards.mode));

    let coins = (rewards.base_coins as f64 * coin_reward_multiplier(&rank)) as u64;
    let delta = points_delta(rewards.outcome, &rank);
    let new_points = apply_points_delta(state.rank_points(rewards.mode), delta);

    let mut levels_gained = 0;
    let mut exp_granted = 0;
    if rewards.exp > 0 {
        if let Some(target_id) = rewards.exp_target_id {
            if let Some(creature) = find_in_collection_mut(&mut state.collection, target_id) {
                levels_gained = grant_exp(creature, rewards.exp);
                exp_granted = rewards.exp;
            }
        }
    }

    state.add_coins(coins);
    state.set_rank_points(rewards.mode, new_points);

    AppliedRewards {
        coins_granted: coins,
        exp_granted,
        levels_gained,
        rank_points_delta: delta,
        new_rank_points: new_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::add_copy;

    fn state_with_creature() -> GameState {
        let mut gs = GameState::new("Tester".to_string(), 0);
        add_copy(&mut gs.collection, 1);
        gs.selected_creature_id = Some(1);
        gs
    }

    #[test]
    fn test_win_applies_coins_exp_and_rank_together() {
        let mut gs = state_with_creature();
        let rewards = BattleRewards {
            mode: RankMode::Duel,
            outcome: RankOutcome::Win,
            base_coins: 100,
            exp: 100,
            exp_target_id: Some(1),
        };

        let applied = apply_battle_rewards(&mut gs, &rewards);

        assert_eq!(applied.coins_granted, 100); // bronze: multiplier 1.0
        assert_eq!(gs.coins, 1100);
        assert_eq!(applied.rank_points_delta, 30);
        assert_eq!(gs.battle_rank_points, 30);
        assert_eq!(applied.levels_gained, 1);
        assert_eq!(gs.collection[0].level, 2);
    }

    #[test]
    fn test_loss_floors_rank_at_zero() {
        let mut gs = state_with_creature();
        let rewards = BattleRewards {
            mode: RankMode::Royale,
            outcome: RankOutcome::Placement(8),
            base_coins: 25,
            exp: 10,
            exp_target_id: Some(1),
        };

        let applied = apply_battle_rewards(&mut gs, &rewards);
        assert_eq!(applied.rank_points_delta, -20);
        assert_eq!(gs.royale_rank_points, 0);
    }

    #[test]
    fn test_coin_multiplier_scales_with_tier() {
        let mut gs = state_with_creature();
        gs.battle_rank_points = 250; // Gold: x1.2
        let rewards = BattleRewards {
            mode: RankMode::Duel,
            outcome: RankOutcome::Win,
            base_coins: 100,
            exp: 0,
            exp_target_id: None,
        };

        let applied = apply_battle_rewards(&mut gs, &rewards);
        assert_eq!(applied.coins_granted, 120);
    }

    #[test]
    fn test_missing_exp_target_still_commits_rest() {
        let mut gs = state_with_creature();
        let rewards = BattleRewards {
            mode: RankMode::Duel,
            outcome: RankOutcome::Win,
            base_coins: 50,
            exp: 40,
            exp_target_id: Some(999),
        };

        let applied = apply_battle_rewards(&mut gs, &rewards);
        assert_eq!(applied.exp_granted, 0);
        assert_eq!(gs.coins, 1050);
        assert_eq!(gs.battle_rank_points, 30);
    }
}
