//! Weighted-random creature acquisition and duplicate-fueled evolution.

use crate::catalog;
use crate::catalog::types::{CreatureDefinition, Rarity};
use crate::collection::{add_copy, find_in_collection, find_in_collection_mut, CollectedCreature};
use crate::core::balance::{
    rarity_for_roll, BATCH_PULL_COST, BATCH_PULL_SIZE, SINGLE_PULL_COST,
};
use crate::core::constants::{BONUS_TRACK_CAP, EVOLUTION_COST};
use crate::core::game_state::GameState;
use rand::Rng;

/// One gacha draw as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullResult {
    pub definition_id: u32,
    pub rarity: Rarity,
    /// True when the player already owned this creature before the draw.
    pub duplicate: bool,
}

/// Draws one definition: a cumulative rarity roll tested rarest-first,
/// then a uniform pick within that rarity's gacha pool.
pub fn draw(rng: &mut impl Rng) -> CreatureDefinition {
    let rarity = rarity_for_roll(rng.gen::<f64>());
    let pool = catalog::gacha_pool(rarity);
    // Catalog invariant: every rarity has a non-empty pool.
    let idx = rng.gen_range(0..pool.len());
    pool[idx].clone()
}

/// Performs one paid pull. Returns None without mutating anything when the
/// balance cannot cover the cost.
pub fn pull_single(state: &mut GameState, rng: &mut impl Rng) -> Option<PullResult> {
    if !state.spend_coins(SINGLE_PULL_COST) {
        return None;
    }
    let def = draw(rng);
    let duplicate = find_in_collection(&state.collection, def.id).is_some();
    add_copy(&mut state.collection, def.id);
    Some(PullResult {
        definition_id: def.id,
        rarity: def.rarity,
        duplicate,
    })
}

/// Performs one paid batch of BATCH_PULL_SIZE draws at the discounted
/// price. All draws are resolved against a single snapshot of the
/// collection, then applied together, so duplicate detection inside the
/// batch cannot race with itself.
pub fn pull_batch(state: &mut GameState, rng: &mut impl Rng) -> Option<Vec<PullResult>> {
    if !state.spend_coins(BATCH_PULL_COST) {
        return None;
    }

    let owned_before: Vec<u32> = state.collection.iter().map(|c| c.definition_id).collect();
    let mut results = Vec::with_capacity(BATCH_PULL_SIZE);

    for _ in 0..BATCH_PULL_SIZE {
        let def = draw(rng);
        results.push(PullResult {
            definition_id: def.id,
            rarity: def.rarity,
            duplicate: owned_before.contains(&def.id),
        });
    }
    for result in &results {
        add_copy(&mut state.collection, result.definition_id);
    }

    Some(results)
}

/// True iff the creature has an evolution target and enough duplicates.
pub fn can_evolve(state: &GameState, definition_id: u32) -> bool {
    let owned = match find_in_collection(&state.collection, definition_id) {
        Some(owned) => owned,
        None => return false,
    };
    let def = match owned.definition() {
        Some(def) => def,
        None => return false,
    };
    def.evolution_target_id.is_some() && owned.count >= EVOLUTION_COST
}

/// Executes an evolution. Consumes EVOLUTION_COST copies of the source
/// (the source row persists even at count 0) and creates or merges the
/// target holding. Returns the target holding, or None when ineligible.
pub fn evolve<'a>(
    state: &'a mut GameState,
    definition_id: u32,
) -> Option<&'a CollectedCreature> {
    if !can_evolve(state, definition_id) {
        return None;
    }

    let (target_id, new_bonus) = {
        let source = find_in_collection(&state.collection, definition_id)?;
        let def = source.definition()?;
        // Each evolution into a target advances the bonus tracks by one,
        // capped so chained evolutions stay bounded.
        let new_bonus = (source.evolution_bonus + 1).min(BONUS_TRACK_CAP);
        (def.evolution_target_id?, new_bonus)
    };

    find_in_collection_mut(&mut state.collection, definition_id)?.count -= EVOLUTION_COST;

    match find_in_collection_mut(&mut state.collection, target_id) {
        Some(existing) => {
            existing.count += 1;
            // Merge takes the max of old and newly computed value, not the
            // sum, so repeated evolutions into the same target are bounded.
            existing.evolution_bonus = existing.evolution_bonus.max(new_bonus);
            existing.skill_bonus = existing.skill_bonus.max(new_bonus);
        }
        None => {
            let mut fresh = CollectedCreature::new(target_id);
            fresh.evolution_bonus = new_bonus;
            fresh.skill_bonus = new_bonus;
            state.collection.push(fresh);
        }
    }

    find_in_collection(&state.collection, target_id)
}
