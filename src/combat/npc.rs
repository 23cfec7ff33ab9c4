//! NPC participant generation and the auto-battle skill picker.

use crate::catalog;
use crate::catalog::types::Stats;
use crate::combat::effects::{effect_for, target_policy, TargetPolicy};
use crate::combat::engine::BattleCore;
use crate::combat::types::BattleParticipant;
use crate::rank::{npc_strength_multiplier, RankInfo};
use rand::Rng;

/// Rolls a flavor name for a generated opponent.
pub fn generate_npc_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Brist", "Tang", "Snar", "Wisp", "Curl", "Matt", "Frizz", "Knot", "Silk", "Shag",
    ];
    let roots = [
        "le", "led", "weave", "strand", "lock", "tuft", "wick", "mane", "coil", "braid",
    ];
    let suffixes = [
        "Stalker", "Weaver", "Brute", "Wisp", "Howler", "Creeper", "Sprout", "Warden", "Fiend",
        "Prowler",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let root = roots[rng.gen_range(0..roots.len())];
    let suffix = suffixes[rng.gen_range(0..suffixes.len())];

    format!("{}{} {}", prefix, root, suffix)
}

/// Generates one NPC opponent scaled to the player's rank. `extra` is a
/// per-mode strength tweak; 1.0 leaves the rank multiplier alone.
pub fn generate_npc(
    id: u32,
    rank: &RankInfo,
    extra: f64,
    team: Option<u8>,
    rng: &mut impl Rng,
) -> BattleParticipant {
    let pool: Vec<_> = catalog::all()
        .into_iter()
        .filter(|d| !d.boss_exclusive)
        .collect();
    let def = &pool[rng.gen_range(0..pool.len())];

    let scale = npc_strength_multiplier(rank) * extra;
    let stats = Stats {
        power: (def.base_stats.power as f64 * scale) as u32,
        speed: (def.base_stats.speed as f64 * scale) as u32,
        grip: (def.base_stats.grip as f64 * scale) as u32,
    };

    BattleParticipant::from_definition(
        id,
        generate_npc_name(rng),
        def,
        stats,
        scale,
        true,
        team,
    )
}

/// One candidate move: a usable skill with a legal target set.
fn candidate_moves(core: &BattleCore, actor_id: u32, rng: &mut impl Rng) -> Vec<(u32, Vec<u32>)> {
    let actor = match core.participant(actor_id) {
        Some(a) => a,
        None => return Vec::new(),
    };
    let mut enemies = core.living_enemies_of(actor_id);
    let mut moves = Vec::new();

    for skill_id in &actor.skill_ids {
        if !actor.can_use_skill(*skill_id) {
            continue;
        }
        let skill = match catalog::find_skill(*skill_id) {
            Some(s) => s,
            None => continue,
        };
        let targets = match target_policy(&effect_for(&skill)) {
            TargetPolicy::Single => {
                if enemies.is_empty() {
                    continue;
                }
                vec![enemies[rng.gen_range(0..enemies.len())]]
            }
            TargetPolicy::UpTo(cap) => {
                if enemies.is_empty() {
                    continue;
                }
                // Shuffle-free sample: rotate a random start and take a
                // prefix.
                let start = rng.gen_range(0..enemies.len());
                enemies.rotate_left(start);
                enemies.iter().take(cap as usize).copied().collect()
            }
            TargetPolicy::None => Vec::new(),
        };
        moves.push((*skill_id, targets));
    }

    moves
}

/// Plays the NPC's turn: picks a random usable skill with legal targets and
/// executes it. Returns false when the NPC had no usable move (everything
/// cooling down) or was stunned.
pub fn npc_take_turn(core: &mut BattleCore, actor_id: u32, rng: &mut impl Rng) -> bool {
    let stunned = match core.participant(actor_id) {
        Some(a) if a.is_alive() => a.is_stunned(),
        _ => return false,
    };
    if stunned {
        // Resolve the stun skip through the normal path with any known
        // skill so the event is logged.
        let skill_id = match core.participant(actor_id).and_then(|a| a.skill_ids.first().copied()) {
            Some(s) => s,
            None => return false,
        };
        return core
            .execute_action(actor_id, skill_id, &[], rng)
            .unwrap_or(false);
    }

    let moves = candidate_moves(core, actor_id, rng);
    if moves.is_empty() {
        return false;
    }
    let (skill_id, targets) = moves[rng.gen_range(0..moves.len())].clone();
    core.execute_action(actor_id, skill_id, &targets, rng)
        .unwrap_or(false)
}
